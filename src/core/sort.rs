//! Single-column, three-state sorting.
//!
//! Sorting always works on a fresh vector of references; the source slice is
//! never reordered, so dropping back to "unsorted" is just the source order.

use std::cmp::Ordering;

use super::record::{Candidate, ColumnKey, FieldValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn factor(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

/// Next state of the per-column cycle: none → asc → desc → none.
pub fn next_direction(current: Option<SortDirection>) -> Option<SortDirection> {
    match current {
        None => Some(SortDirection::Asc),
        Some(SortDirection::Asc) => Some(SortDirection::Desc),
        Some(SortDirection::Desc) => None,
    }
}

/// The table's one sort setting.  `column` is `None` exactly when
/// `direction` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SortState {
    column: Option<ColumnKey>,
    direction: Option<SortDirection>,
}

impl SortState {
    pub fn new(column: ColumnKey, direction: Option<SortDirection>) -> Self {
        match direction {
            Some(_) => Self {
                column: Some(column),
                direction,
            },
            None => Self::default(),
        }
    }

    pub fn direction(&self) -> Option<SortDirection> {
        self.direction
    }

    /// Direction shown on the header of `key` (only the active column has one).
    pub fn direction_for(&self, key: ColumnKey) -> Option<SortDirection> {
        if self.column == Some(key) {
            self.direction
        } else {
            None
        }
    }

    /// Apply a header click on `key`.  A different column starts over at
    /// ascending; the active column advances its cycle.
    pub fn click(&mut self, key: ColumnKey) {
        let next = next_direction(self.direction_for(key));
        *self = Self::new(key, next);
    }
}

/// Locale-style string ordering: letters compare case-insensitively first,
/// lower-case sorts before upper-case on an otherwise equal string, and code
/// points break any remaining tie.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    if primary != Ordering::Equal {
        return primary;
    }
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca == cb {
            continue;
        }
        match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => return ca.cmp(&cb),
        }
    }
    a.len().cmp(&b.len())
}

fn compare_fields(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Number(x), FieldValue::Number(y)) => x.cmp(&y),
        (FieldValue::Text(x), FieldValue::Text(y)) => locale_cmp(x, y),
        // Same key always yields the same variant; keep numbers first anyway.
        (FieldValue::Number(_), FieldValue::Text(_)) => Ordering::Less,
        (FieldValue::Text(_), FieldValue::Number(_)) => Ordering::Greater,
    }
}

/// Comparator for `sort`.  Everything compares equal while unsorted, so a
/// stable sort leaves the input order untouched.
pub fn compare(a: &Candidate, b: &Candidate, sort: &SortState) -> Ordering {
    match (sort.column, sort.direction) {
        (Some(column), Some(direction)) => {
            direction.factor(compare_fields(a.field(column), b.field(column)))
        }
        _ => Ordering::Equal,
    }
}

/// Return `records` ordered by `sort`.  Stable: equal keys keep their
/// relative input order.
pub fn sort_records<T, I>(records: I, sort: &SortState) -> Vec<T>
where
    T: AsRef<Candidate>,
    I: IntoIterator<Item = T>,
{
    let mut out: Vec<T> = records.into_iter().collect();
    out.sort_by(|a, b| compare(a.as_ref(), b.as_ref(), sort));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::seed_candidates;

    fn ids(list: &[&Candidate]) -> Vec<u32> {
        list.iter().map(|c| c.id).collect()
    }

    #[test]
    fn click_cycles_through_three_states() {
        let mut s = SortState::default();
        s.click(ColumnKey::Score);
        assert_eq!(s.direction_for(ColumnKey::Score), Some(SortDirection::Asc));
        s.click(ColumnKey::Score);
        assert_eq!(s.direction_for(ColumnKey::Score), Some(SortDirection::Desc));
        s.click(ColumnKey::Score);
        assert_eq!(s, SortState::default());
        assert_eq!(s.direction_for(ColumnKey::Score), None);
    }

    #[test]
    fn switching_column_resets_previous() {
        let mut s = SortState::default();
        s.click(ColumnKey::Score);
        s.click(ColumnKey::Score);
        s.click(ColumnKey::Name);
        assert_eq!(s.direction_for(ColumnKey::Score), None);
        assert_eq!(s.direction_for(ColumnKey::Name), Some(SortDirection::Asc));
    }

    #[test]
    fn score_desc_puts_top_scorer_first_and_restores_order() {
        let seed = seed_candidates();
        let mut s = SortState::default();
        s.click(ColumnKey::Score);
        s.click(ColumnKey::Score);
        let sorted = sort_records(&seed, &s);
        assert_eq!(sorted[0].name, "Lina Markovic");
        assert_eq!(sorted[0].score, 97);

        s.click(ColumnKey::Score);
        let restored = sort_records(&seed, &s);
        assert_eq!(ids(&restored), (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn asc_and_desc_are_reverses_for_distinct_keys() {
        let seed = seed_candidates();
        let asc = sort_records(&seed, &SortState::new(ColumnKey::Name, Some(SortDirection::Asc)));
        let mut desc =
            sort_records(&seed, &SortState::new(ColumnKey::Name, Some(SortDirection::Desc)));
        desc.reverse();
        assert_eq!(ids(&asc), ids(&desc));
        assert_eq!(asc[0].name, "Ahmed ElSayed");
    }

    #[test]
    fn sort_does_not_touch_source() {
        let seed = seed_candidates();
        let before = seed.clone();
        let _ = sort_records(&seed, &SortState::new(ColumnKey::Job, Some(SortDirection::Desc)));
        assert_eq!(seed, before);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let seed = seed_candidates();
        let sorted = sort_records(&seed, &SortState::new(ColumnKey::Date, Some(SortDirection::Asc)));
        let feb5: Vec<u32> = sorted
            .iter()
            .filter(|c| c.date == "Feb 5, 2025")
            .map(|c| c.id)
            .collect();
        assert_eq!(feb5, vec![4, 5, 6, 7]);
    }

    #[test]
    fn locale_cmp_ignores_case_first() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("Zed", "zed"), Ordering::Greater);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }
}
