//! Free-text search over one designated field.
//!
//! Case-insensitive substring match.  No tokenising, no ranking.

use super::record::{Candidate, SearchField};

/// A compiled query: lower-cased once, applied to many records.
#[derive(Debug, Clone)]
pub struct Matcher {
    /// `None` for a blank query, which matches everything.
    needle: Option<String>,
    field: SearchField,
}

impl Matcher {
    pub fn new(query: &str, field: SearchField) -> Self {
        let needle = if query.trim().is_empty() {
            None
        } else {
            Some(query.to_lowercase())
        };
        Self { needle, field }
    }

    pub fn matches(&self, candidate: &Candidate) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => candidate
                .search_text(self.field)
                .to_lowercase()
                .contains(needle.as_str()),
        }
    }
}

/// Records whose `field` contains `query` (case-insensitive).  A blank query
/// keeps everything, in order.  Works on anything that can lend a
/// [`Candidate`], so callers may carry their own tags through.
pub fn filter_records<T, I>(records: I, query: &str, field: SearchField) -> Vec<T>
where
    T: AsRef<Candidate>,
    I: IntoIterator<Item = T>,
{
    let matcher = Matcher::new(query, field);
    records
        .into_iter()
        .filter(|c| matcher.matches(c.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::seed_candidates;

    #[test]
    fn empty_query_is_identity() {
        let seed = seed_candidates();
        let all = filter_records(&seed, "", SearchField::Name);
        assert_eq!(all.len(), seed.len());
        assert!(all.iter().zip(&seed).all(|(a, b)| std::ptr::eq(*a, b)));
        assert_eq!(filter_records(&seed, "   ", SearchField::Name).len(), 12);
    }

    #[test]
    fn substring_match_is_case_insensitive() {
        let seed = seed_candidates();
        let hits = filter_records(&seed, "MAHM", SearchField::Name);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Aya Mahmoud");
    }

    #[test]
    fn no_seed_name_contains_ama() {
        let seed = seed_candidates();
        assert!(filter_records(&seed, "ama", SearchField::Name).is_empty());
    }

    #[test]
    fn results_are_a_subset_that_all_match() {
        let seed = seed_candidates();
        for q in ["a", "ar", "engineer", "x", "an"] {
            for field in [SearchField::Name, SearchField::Job] {
                let hits = filter_records(&seed, q, field);
                assert!(hits.len() <= seed.len());
                for h in hits {
                    assert!(seed.iter().any(|s| std::ptr::eq(s, h)));
                    assert!(h.search_text(field).to_lowercase().contains(q));
                }
            }
        }
    }

    #[test]
    fn job_field_search() {
        let seed = seed_candidates();
        let hits = filter_records(&seed, "engineer", SearchField::Job);
        let ids: Vec<u32> = hits.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 6, 7]);
    }
}
