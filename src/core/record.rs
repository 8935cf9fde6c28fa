//! Candidate records and the built-in seed list.
//!
//! A [`Candidate`] is immutable once loaded; nothing in the app edits it.
//! Field access for sorting and searching goes through [`ColumnKey`] so the
//! pipeline never needs to know the struct layout.

use std::fmt;

// ───────────────────────────────────────── enums ─────────────

/// Result of the anti-cheat review attached to an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AntiCheat {
    Clean,
    Flagged,
    Critical,
}

impl AntiCheat {
    pub const ALL: &[AntiCheat] = &[AntiCheat::Clean, AntiCheat::Flagged, AntiCheat::Critical];

    /// Key used in data files and the badge table.
    pub fn key(self) -> &'static str {
        match self {
            AntiCheat::Clean => "clean",
            AntiCheat::Flagged => "flagged",
            AntiCheat::Critical => "critical",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.key() == s)
    }
}

/// Where a candidate currently sits in the hiring pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateStatus {
    Accepted,
    Pending,
    Shortlist,
    Rejected,
}

impl CandidateStatus {
    pub const ALL: &[CandidateStatus] = &[
        CandidateStatus::Accepted,
        CandidateStatus::Pending,
        CandidateStatus::Shortlist,
        CandidateStatus::Rejected,
    ];

    pub fn key(self) -> &'static str {
        match self {
            CandidateStatus::Accepted => "accepted",
            CandidateStatus::Pending => "pending",
            CandidateStatus::Shortlist => "shortlist",
            CandidateStatus::Rejected => "rejected",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.key() == s)
    }
}

// ───────────────────────────────────────── record ────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: u32,
    pub name: String,
    pub job: String,
    /// Assessment score, always within `0..=100`.
    pub score: u8,
    /// Display date, e.g. `"Feb 7, 2025"`.
    pub date: String,
    pub anti_cheat: AntiCheat,
    pub status: CandidateStatus,
}

/// A borrowed view of one field, used by the comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Number(i64),
    Text(&'a str),
}

/// Identifies a record field (and the table column showing it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    Name,
    Job,
    Score,
    Date,
    AntiCheat,
    Status,
}

impl ColumnKey {
    pub fn key(self) -> &'static str {
        match self {
            ColumnKey::Name => "name",
            ColumnKey::Job => "job",
            ColumnKey::Score => "score",
            ColumnKey::Date => "date",
            ColumnKey::AntiCheat => "anti_cheat",
            ColumnKey::Status => "status",
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Text field the search box matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchField {
    #[default]
    Name,
    Job,
}

impl SearchField {
    pub const ALL: &[SearchField] = &[SearchField::Name, SearchField::Job];

    pub fn key(self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::Job => "job",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.key() == s)
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchField::Name => "Name",
            SearchField::Job => "Job",
        }
    }
}

impl AsRef<Candidate> for Candidate {
    fn as_ref(&self) -> &Candidate {
        self
    }
}

impl Candidate {
    pub fn field(&self, key: ColumnKey) -> FieldValue<'_> {
        match key {
            ColumnKey::Name => FieldValue::Text(&self.name),
            ColumnKey::Job => FieldValue::Text(&self.job),
            ColumnKey::Score => FieldValue::Number(i64::from(self.score)),
            ColumnKey::Date => FieldValue::Text(&self.date),
            ColumnKey::AntiCheat => FieldValue::Text(self.anti_cheat.key()),
            ColumnKey::Status => FieldValue::Text(self.status.key()),
        }
    }

    pub fn search_text(&self, field: SearchField) -> &str {
        match field {
            SearchField::Name => &self.name,
            SearchField::Job => &self.job,
        }
    }
}

// ───────────────────────────────────────── seed ──────────────

type SeedRow = (u32, &'static str, &'static str, u8, &'static str, AntiCheat, CandidateStatus);

const SEED: &[SeedRow] = {
    use AntiCheat::*;
    use CandidateStatus::*;
    &[
        (1, "Sarah Johnson", "Frontend Developer", 92, "Feb 7, 2025", Clean, Accepted),
        (2, "Ahmed ElSayed", "Backend Engineer", 88, "Feb 6, 2025", Flagged, Shortlist),
        (3, "Lina Markovic", "UX Designer", 97, "Feb 6, 2025", Flagged, Accepted),
        (4, "Omar Khaled", "Data Analyst", 75, "Feb 5, 2025", Clean, Pending),
        (5, "Maria Lopez", "Product Manager", 89, "Feb 5, 2025", Critical, Rejected),
        (6, "David Kim", "ML Engineer", 93, "Feb 5, 2025", Clean, Shortlist),
        (7, "Aya Mahmoud", "Data Engineer", 55, "Feb 5, 2025", Clean, Rejected),
        (8, "Rania Ibrahim", "Fullstack Developer", 94, "Jan 29, 2025", Clean, Accepted),
        (9, "Samuel Carter", "HR Specialist", 81, "Jan 29, 2025", Critical, Shortlist),
        (10, "Mark Reed", "SysAdmin", 76, "Jan 28, 2025", Clean, Rejected),
        (11, "Youssef Hamed", "SEO Specialist", 83, "Jan 28, 2025", Clean, Accepted),
        (12, "Hadi Mansour", "Business Analyst", 96, "Jan 27, 2025", Flagged, Shortlist),
    ]
};

/// The twelve demo candidates, in their original order.
pub fn seed_candidates() -> Vec<Candidate> {
    SEED.iter()
        .map(|&(id, name, job, score, date, anti_cheat, status)| Candidate {
            id,
            name: name.to_string(),
            job: job.to_string(),
            score,
            date: date.to_string(),
            anti_cheat,
            status,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_in_id_order() {
        let ids: Vec<u32> = seed_candidates().iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn enum_keys_round_trip() {
        for &s in CandidateStatus::ALL {
            assert_eq!(CandidateStatus::from_key(s.key()), Some(s));
        }
        assert_eq!(AntiCheat::from_key("bogus"), None);
    }

    #[test]
    fn field_access_distinguishes_numbers() {
        let c = &seed_candidates()[2];
        assert_eq!(c.field(ColumnKey::Score), FieldValue::Number(97));
        assert_eq!(c.field(ColumnKey::Name), FieldValue::Text("Lina Markovic"));
    }
}
