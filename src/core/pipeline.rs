//! The table data pipeline: filter → sort → paginate.
//!
//! [`Pipeline`] owns the control state (query, search field, sort, pager) and
//! a cache of the ordered row indices.  The cache is keyed by everything the
//! ordering depends on and rebuilt lazily on the next read after a change.
//!
//! A pipeline serves one record slice for its whole life.  The cache notices
//! a change in the slice's length but not edits in place, so swap in a new
//! `Pipeline` when the data is replaced.

use super::filter::filter_records;
use super::paginate::Pager;
use super::record::{Candidate, ColumnKey, SearchField};
use super::sort::{sort_records, SortState};

/// Everything the ordered list depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OrderKey {
    query: String,
    field: SearchField,
    sort: SortState,
    /// Length of the slice the indices point into.
    len: usize,
}

/// A record tagged with its position in the source slice.
struct Indexed<'a> {
    index: usize,
    candidate: &'a Candidate,
}

impl AsRef<Candidate> for Indexed<'_> {
    fn as_ref(&self) -> &Candidate {
        self.candidate
    }
}

/// Snapshot handed to the renderer.
#[derive(Debug)]
pub struct PageView<'a> {
    pub rows: Vec<&'a Candidate>,
    pub current_page: usize,
    pub total_pages: usize,
    /// Number of records that survived the filter.
    pub matched: usize,
}

#[derive(Debug, Default)]
pub struct Pipeline {
    query: String,
    field: SearchField,
    sort: SortState,
    pager: Pager,
    /// Indices into the source slice, filtered and sorted.
    ordered: Vec<usize>,
    cached_for: Option<OrderKey>,
}

impl Pipeline {
    pub fn new(pager: Pager) -> Self {
        Self {
            pager,
            ..Self::default()
        }
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    #[cfg(test)]
    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    // ── user actions ────────────────────────────────────────────

    /// New search text.  Any edit sends the user back to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.query {
            self.query = query;
            self.pager.first();
        }
    }

    pub fn set_search_field(&mut self, field: SearchField) {
        if field != self.field {
            self.field = field;
            self.pager.first();
        }
    }

    /// Header click on `key`; ignored for non-sortable columns.
    pub fn click_header(&mut self, key: ColumnKey, sortable: bool) {
        if sortable {
            self.sort.click(key);
            tracing::debug!(column = %key, direction = ?self.sort.direction(), "sort changed");
        }
    }

    pub fn go_to_page(&mut self, records: &[Candidate], page: usize) -> bool {
        let len = self.matched(records);
        self.pager.go_to(page, len)
    }

    /// Whether `page` exists for the current filter.
    pub fn page_in_range(&mut self, records: &[Candidate], page: usize) -> bool {
        let len = self.matched(records);
        self.pager.in_range(page, len)
    }

    pub fn next_page(&mut self, records: &[Candidate]) -> bool {
        let len = self.matched(records);
        self.pager.next(len)
    }

    pub fn prev_page(&mut self, records: &[Candidate]) -> bool {
        let len = self.matched(records);
        self.pager.prev(len)
    }

    /// Viewport-derived page size.  Keeps the current page valid.
    pub fn set_per_page(&mut self, records: &[Candidate], per_page: usize) {
        if self.pager.set_per_page(per_page) {
            let len = self.matched(records);
            self.pager.clamp(len);
            tracing::debug!(per_page, "page size changed");
        }
    }

    // ── derived data ────────────────────────────────────────────

    fn key(&self, records: &[Candidate]) -> OrderKey {
        OrderKey {
            query: self.query.clone(),
            field: self.field,
            sort: self.sort,
            len: records.len(),
        }
    }

    fn refresh(&mut self, records: &[Candidate]) {
        let key = self.key(records);
        if self.cached_for.as_ref() == Some(&key) {
            return;
        }
        let tagged = records
            .iter()
            .enumerate()
            .map(|(index, candidate)| Indexed { index, candidate });
        let matched = filter_records(tagged, &self.query, self.field);
        self.ordered = sort_records(matched, &self.sort)
            .into_iter()
            .map(|row| row.index)
            .collect();
        tracing::debug!(matched = self.ordered.len(), query = %self.query, "pipeline recomputed");
        self.cached_for = Some(key);
    }

    /// Number of records passing the current filter.
    pub fn matched(&mut self, records: &[Candidate]) -> usize {
        self.refresh(records);
        self.ordered.len()
    }

    /// Full filtered + sorted list (all pages).
    pub fn ordered<'a>(&mut self, records: &'a [Candidate]) -> Vec<&'a Candidate> {
        self.refresh(records);
        self.ordered.iter().map(|&i| &records[i]).collect()
    }

    /// Current page of the pipeline.  Resets to page 1 first if the filter
    /// shrank the list below the current page.
    pub fn view<'a>(&mut self, records: &'a [Candidate]) -> PageView<'a> {
        self.refresh(records);
        let len = self.ordered.len();
        if self.pager.clamp(len) {
            tracing::debug!("current page out of range, reset to 1");
        }
        let rows = self.ordered[self.pager.range(len)]
            .iter()
            .map(|&i| &records[i])
            .collect();
        PageView {
            rows,
            current_page: self.pager.current(),
            total_pages: self.pager.total_pages(len),
            matched: len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::seed_candidates;
    use crate::core::sort::SortDirection;

    fn ids(rows: &[&Candidate]) -> Vec<u32> {
        rows.iter().map(|c| c.id).collect()
    }

    #[test]
    fn pages_reassemble_the_sorted_filtered_list() {
        let seed = seed_candidates();
        let mut p = Pipeline::new(Pager::new(5));
        p.set_query("a");
        p.click_header(ColumnKey::Score, true);
        let expected = ids(&p.ordered(&seed));

        let total = p.view(&seed).total_pages;
        let mut got = Vec::new();
        for page in 1..=total {
            p.go_to_page(&seed, page);
            got.extend(ids(&p.view(&seed).rows));
        }
        assert_eq!(got, expected);
        assert_eq!(total, expected.len().div_ceil(5).max(1));
    }

    #[test]
    fn filter_runs_before_sort() {
        let seed = seed_candidates();
        let mut p = Pipeline::new(Pager::new(12));
        p.set_query("engineer");
        p.set_search_field(SearchField::Job);
        p.click_header(ColumnKey::Score, true);
        p.click_header(ColumnKey::Score, true);
        assert_eq!(ids(&p.view(&seed).rows), vec![6, 2, 7]);
        assert_eq!(p.sort().direction(), Some(SortDirection::Desc));
    }

    #[test]
    fn shrinking_filter_resets_page() {
        let seed = seed_candidates();
        let mut p = Pipeline::new(Pager::new(3));
        assert!(p.go_to_page(&seed, 4));
        assert_eq!(p.view(&seed).current_page, 4);

        p.set_query("Mahm");
        let v = p.view(&seed);
        assert_eq!(v.current_page, 1);
        assert_eq!(v.total_pages, 1);
        assert_eq!(ids(&v.rows), vec![7]);
    }

    #[test]
    fn page_size_change_clamps() {
        let seed = seed_candidates();
        let mut p = Pipeline::new(Pager::new(2));
        p.go_to_page(&seed, 6);
        p.set_per_page(&seed, 6);
        assert_eq!(p.pager().current(), 1);
        assert_eq!(p.view(&seed).rows.len(), 6);
    }

    #[test]
    fn non_sortable_header_is_ignored() {
        let seed = seed_candidates();
        let mut p = Pipeline::new(Pager::new(12));
        p.click_header(ColumnKey::Status, false);
        assert_eq!(p.sort(), &SortState::default());
        assert_eq!(ids(&p.view(&seed).rows), (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn empty_match_still_has_one_page() {
        let seed = seed_candidates();
        let mut p = Pipeline::new(Pager::new(5));
        p.set_query("zzz");
        let v = p.view(&seed);
        assert!(v.rows.is_empty());
        assert_eq!(v.total_pages, 1);
        assert!(!p.next_page(&seed));
        assert!(p.page_in_range(&seed, 1));
        assert!(!p.page_in_range(&seed, 2));
    }

    #[test]
    fn declared_total_demo() {
        let seed = seed_candidates();
        let mut p = Pipeline::new(Pager::new(12).with_declared_total(25));
        assert!(!p.prev_page(&seed));
        assert!(p.go_to_page(&seed, 25));
        assert!(!p.next_page(&seed));
        let v = p.view(&seed);
        assert_eq!(v.current_page, 25);
        assert!(v.rows.is_empty());
    }

    #[test]
    fn current_page_is_in_range_but_not_a_move() {
        let seed = seed_candidates();
        let mut p = Pipeline::new(Pager::new(5));
        assert!(p.page_in_range(&seed, 1));
        assert!(!p.go_to_page(&seed, 1));
        assert!(!p.page_in_range(&seed, 0));
        assert!(!p.page_in_range(&seed, 4));
    }

    #[test]
    fn shorter_slice_invalidates_the_cache() {
        let seed = seed_candidates();
        let mut p = Pipeline::new(Pager::new(12));
        assert_eq!(p.view(&seed).rows.len(), 12);
        let fewer = &seed[..4];
        assert_eq!(ids(&p.view(fewer).rows), vec![1, 2, 3, 4]);
        assert_eq!(p.matched(fewer), 4);
    }
}
