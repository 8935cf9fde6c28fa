//! Static badge catalogue: `(type, variant) → label, color, icon`.
//!
//! Lookups never fail loudly; an unknown pair just has no entry and the
//! badge widget draws nothing.

use super::record::{AntiCheat, CandidateStatus};

/// Named palette colors used by badges.  Mapped to terminal colors by the
/// UI theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeColor {
    Green,
    Yellow,
    Blue,
    Red,
    Gray,
    Purple,
    Teal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeKind {
    CandidateState,
    CheatingFlag,
    JobStatus,
    Role,
}

impl BadgeKind {
    /// Every variant of this kind, in catalogue order.
    pub fn variants(self) -> &'static [BadgeSpec] {
        BADGES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, specs)| *specs)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeSpec {
    pub variant: &'static str,
    pub label: &'static str,
    pub color: BadgeColor,
    /// Single-cell glyph standing in for the icon.
    pub icon: &'static str,
}

const fn spec(
    variant: &'static str,
    label: &'static str,
    color: BadgeColor,
    icon: &'static str,
) -> BadgeSpec {
    BadgeSpec {
        variant,
        label,
        color,
        icon,
    }
}

pub static BADGES: &[(BadgeKind, &[BadgeSpec])] = &[
    (
        BadgeKind::CandidateState,
        &[
            spec("accepted", "Accepted", BadgeColor::Green, "✔"),
            spec("pending", "Pending", BadgeColor::Yellow, "◷"),
            spec("shortlist", "Shortlist", BadgeColor::Blue, "★"),
            spec("rejected", "Rejected", BadgeColor::Red, "⊘"),
        ],
    ),
    (
        BadgeKind::CheatingFlag,
        &[
            spec("clean", "Clean", BadgeColor::Green, "◆"),
            spec("flagged", "Flagged", BadgeColor::Yellow, "▲"),
            spec("critical", "Critical", BadgeColor::Red, "✖"),
        ],
    ),
    (
        BadgeKind::JobStatus,
        &[
            spec("active", "Active", BadgeColor::Green, "✦"),
            spec("scheduled", "Scheduled", BadgeColor::Yellow, "◔"),
            spec("closed", "Closed", BadgeColor::Gray, "⊖"),
        ],
    ),
    (
        BadgeKind::Role,
        &[
            spec("owner", "Owner", BadgeColor::Purple, "♛"),
            spec("editor", "Editor", BadgeColor::Teal, "✎"),
            spec("viewer", "Viewer", BadgeColor::Gray, "◉"),
        ],
    ),
];

pub fn lookup(kind: BadgeKind, variant: &str) -> Option<&'static BadgeSpec> {
    kind.variants().iter().find(|s| s.variant == variant)
}

pub fn for_status(status: CandidateStatus) -> Option<&'static BadgeSpec> {
    lookup(BadgeKind::CandidateState, status.key())
}

pub fn for_anti_cheat(flag: AntiCheat) -> Option<&'static BadgeSpec> {
    lookup(BadgeKind::CheatingFlag, flag.key())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_pairs_resolve() {
        let s = lookup(BadgeKind::Role, "editor").unwrap();
        assert_eq!(s.label, "Editor");
        assert_eq!(s.color, BadgeColor::Teal);
        assert_eq!(lookup(BadgeKind::CheatingFlag, "critical").unwrap().color, BadgeColor::Red);
    }

    #[test]
    fn unknown_pairs_are_none() {
        assert!(lookup(BadgeKind::Role, "admin").is_none());
        assert!(lookup(BadgeKind::JobStatus, "accepted").is_none());
        assert!(lookup(BadgeKind::CandidateState, "").is_none());
    }

    #[test]
    fn every_record_enum_has_a_badge() {
        for &s in CandidateStatus::ALL {
            assert!(for_status(s).is_some());
        }
        for &a in AntiCheat::ALL {
            assert!(for_anti_cheat(a).is_some());
        }
    }
}
