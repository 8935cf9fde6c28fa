//! Chart math: donut segment shares and stats-bar fill.

use super::record::{AntiCheat, Candidate, CandidateStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: u64,
}

impl Slice {
    pub fn new(label: impl Into<String>, value: u64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// One donut segment after normalisation.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub label: String,
    pub value: u64,
    /// Share of the total, 0.0..=100.0.
    pub percent: f64,
    /// Cumulative share before this segment (where the arc starts).
    pub offset: f64,
    /// Index into the color palette (wraps).
    pub color_index: usize,
}

/// Normalise `data` into segments.  A zero total yields 0% everywhere.
pub fn donut_segments(data: &[Slice], palette_len: usize) -> Vec<Segment> {
    let total: u64 = data.iter().map(|s| s.value).sum();
    let mut offset = 0.0;
    data.iter()
        .enumerate()
        .map(|(i, s)| {
            let percent = if total > 0 {
                s.value as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            let seg = Segment {
                label: s.label.clone(),
                value: s.value,
                percent,
                offset,
                color_index: if palette_len == 0 { 0 } else { i % palette_len },
            };
            offset += percent;
            seg
        })
        .collect()
}

pub fn donut_total(data: &[Slice]) -> u64 {
    data.iter().map(|s| s.value).sum()
}

/// Split `width` cells among segments by share; rounding leftovers go to the
/// largest segments first so the bar is always exactly `width` wide (when
/// the total is non-zero).
pub fn segment_cells(segments: &[Segment], width: u16) -> Vec<u16> {
    if segments.iter().all(|s| s.percent == 0.0) {
        return vec![0; segments.len()];
    }
    let exact: Vec<f64> = segments
        .iter()
        .map(|s| s.percent / 100.0 * f64::from(width))
        .collect();
    let mut cells: Vec<u16> = exact.iter().map(|e| e.floor() as u16).collect();
    let mut spare = width.saturating_sub(cells.iter().sum());
    let mut order: Vec<usize> = (0..segments.len()).collect();
    order.sort_by(|&a, &b| {
        let fa = exact[a] - exact[a].floor();
        let fb = exact[b] - exact[b].floor();
        fb.total_cmp(&fa)
    });
    for i in order {
        if spare == 0 {
            break;
        }
        cells[i] += 1;
        spare -= 1;
    }
    cells
}

/// Stats-bar fill: the value clamped into 0..=100.
pub fn bar_percent(value: i64) -> u16 {
    value.clamp(0, 100) as u16
}

/// Candidates per status, in the badge table's order.
pub fn status_breakdown(records: &[&Candidate]) -> Vec<Slice> {
    let statuses = [
        (CandidateStatus::Accepted, "Accepted"),
        (CandidateStatus::Shortlist, "Shortlist"),
        (CandidateStatus::Pending, "Pending"),
        (CandidateStatus::Rejected, "Rejected"),
    ];
    statuses
        .iter()
        .map(|&(status, label)| {
            let count = records.iter().filter(|r| r.status == status).count();
            Slice::new(label, count as u64)
        })
        .collect()
}

/// Headline percentages for the overview stats chart.
pub fn health_bars(records: &[&Candidate]) -> Vec<(&'static str, i64)> {
    let n = records.len() as i64;
    let share = |count: usize| if n == 0 { 0 } else { count as i64 * 100 / n };
    let accepted = records
        .iter()
        .filter(|r| r.status == CandidateStatus::Accepted)
        .count();
    let clean = records
        .iter()
        .filter(|r| r.anti_cheat == AntiCheat::Clean)
        .count();
    let avg = if n == 0 {
        0
    } else {
        records.iter().map(|r| i64::from(r.score)).sum::<i64>() / n
    };
    vec![
        ("Accepted", share(accepted)),
        ("Clean", share(clean)),
        ("Avg score", avg),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::seed_candidates;

    fn sample() -> Vec<Slice> {
        vec![
            Slice::new("Accepted", 30),
            Slice::new("Shortlist", 10),
            Slice::new("Pending", 40),
            Slice::new("Rejected", 20),
        ]
    }

    #[test]
    fn percentages_and_offsets() {
        let segs = donut_segments(&sample(), 4);
        let pct: Vec<f64> = segs.iter().map(|s| s.percent).collect();
        assert_eq!(pct, vec![30.0, 10.0, 40.0, 20.0]);
        assert_eq!(segs[2].offset, 40.0);
        assert_eq!(donut_total(&sample()), 100);
    }

    #[test]
    fn zero_total_is_all_zero() {
        let segs = donut_segments(&[Slice::new("a", 0), Slice::new("b", 0)], 4);
        assert!(segs.iter().all(|s| s.percent == 0.0));
        assert_eq!(segment_cells(&segs, 10), vec![0, 0]);
    }

    #[test]
    fn palette_wraps() {
        let segs = donut_segments(&sample(), 3);
        assert_eq!(segs[3].color_index, 0);
    }

    #[test]
    fn cells_fill_width_exactly() {
        let segs = donut_segments(&[Slice::new("a", 1), Slice::new("b", 1), Slice::new("c", 1)], 4);
        let cells = segment_cells(&segs, 10);
        assert_eq!(cells.iter().sum::<u16>(), 10);
    }

    #[test]
    fn bar_is_clamped() {
        assert_eq!(bar_percent(-5), 0);
        assert_eq!(bar_percent(42), 42);
        assert_eq!(bar_percent(180), 100);
    }

    #[test]
    fn seed_breakdown() {
        let seed = seed_candidates();
        let rows: Vec<&Candidate> = seed.iter().collect();
        let counts: Vec<u64> = status_breakdown(&rows).iter().map(|s| s.value).collect();
        assert_eq!(counts, vec![4, 4, 1, 3]);
        assert_eq!(
            health_bars(&rows),
            vec![("Accepted", 33), ("Clean", 58), ("Avg score", 84)]
        );
        assert_eq!(health_bars(&[]), vec![("Accepted", 0), ("Clean", 0), ("Avg score", 0)]);
    }
}
