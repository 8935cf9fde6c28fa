//! Table column descriptors.

use super::record::ColumnKey;
use super::sort::{SortDirection, SortState};

/// Width of a column: an exact cell count, or a proportional `fr` share of
/// whatever space the fixed columns leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    Fixed(u16),
    Fr(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub key: ColumnKey,
    pub label: &'static str,
    pub sortable: bool,
    pub width: ColumnWidth,
}

/// A column paired with its header state for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderColumn {
    pub def: ColumnDef,
    pub sort: Option<SortDirection>,
}

/// Candidate pipeline columns.  Scores are at most three digits, so that
/// column is fixed; the rest keep the design widths (200/200/150/160/150 px)
/// as `fr` shares in tens of pixels.
pub const PIPELINE_COLUMNS: &[ColumnDef] = &[
    ColumnDef {
        key: ColumnKey::Name,
        label: "Name",
        sortable: true,
        width: ColumnWidth::Fr(20),
    },
    ColumnDef {
        key: ColumnKey::Job,
        label: "Job",
        sortable: true,
        width: ColumnWidth::Fr(20),
    },
    ColumnDef {
        key: ColumnKey::Score,
        label: "Score",
        sortable: true,
        width: ColumnWidth::Fixed(9),
    },
    ColumnDef {
        key: ColumnKey::Date,
        label: "Date",
        sortable: true,
        width: ColumnWidth::Fr(15),
    },
    ColumnDef {
        key: ColumnKey::AntiCheat,
        label: "Anti-cheat",
        sortable: false,
        width: ColumnWidth::Fr(16),
    },
    ColumnDef {
        key: ColumnKey::Status,
        label: "Status",
        sortable: false,
        width: ColumnWidth::Fr(15),
    },
];

/// Attach the current sort state to each column.
pub fn with_sort_state(columns: &[ColumnDef], sort: &SortState) -> Vec<HeaderColumn> {
    columns
        .iter()
        .map(|&def| HeaderColumn {
            def,
            sort: sort.direction_for(def.key),
        })
        .collect()
}

/// Resolve column widths for a row `total` cells wide.  Fixed columns get
/// their width (clipped to what is left); `fr` columns split the remainder
/// proportionally, with rounding leftovers going to the leftmost columns.
pub fn resolve_widths(columns: &[ColumnDef], total: u16) -> Vec<u16> {
    let mut widths = vec![0u16; columns.len()];
    let mut left = total;
    for (w, col) in widths.iter_mut().zip(columns) {
        if let ColumnWidth::Fixed(n) = col.width {
            *w = n.min(left);
            left -= *w;
        }
    }
    let fr_sum: u32 = columns
        .iter()
        .filter_map(|c| match c.width {
            ColumnWidth::Fr(f) => Some(u32::from(f)),
            ColumnWidth::Fixed(_) => None,
        })
        .sum();
    if fr_sum == 0 {
        return widths;
    }
    let mut given = 0u16;
    for (w, col) in widths.iter_mut().zip(columns) {
        if let ColumnWidth::Fr(f) = col.width {
            *w = (u32::from(left) * u32::from(f) / fr_sum) as u16;
            given += *w;
        }
    }
    let mut spare = left - given;
    for (w, col) in widths.iter_mut().zip(columns) {
        if spare == 0 {
            break;
        }
        if matches!(col.width, ColumnWidth::Fr(_)) {
            *w += 1;
            spare -= 1;
        }
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(width: ColumnWidth) -> ColumnDef {
        ColumnDef {
            key: ColumnKey::Name,
            label: "x",
            sortable: false,
            width,
        }
    }

    #[test]
    fn pipeline_columns_fill_the_row_exactly() {
        for total in [40, 100, 137] {
            let widths = resolve_widths(PIPELINE_COLUMNS, total);
            assert_eq!(widths.iter().sum::<u16>(), total);
            assert_eq!(widths[2], 9);
        }
        assert_eq!(resolve_widths(PIPELINE_COLUMNS, 5)[2], 5);
    }

    #[test]
    fn fixed_then_fr() {
        let cols = [col(ColumnWidth::Fixed(10)), col(ColumnWidth::Fr(1)), col(ColumnWidth::Fr(3))];
        assert_eq!(resolve_widths(&cols, 50), vec![10, 10, 30]);
    }

    #[test]
    fn fixed_columns_are_clipped() {
        let cols = [col(ColumnWidth::Fixed(30)), col(ColumnWidth::Fixed(30))];
        assert_eq!(resolve_widths(&cols, 40), vec![30, 10]);
    }

    #[test]
    fn sort_state_is_attached_to_active_column_only() {
        let sort = SortState::new(ColumnKey::Score, Some(SortDirection::Desc));
        let header = with_sort_state(PIPELINE_COLUMNS, &sort);
        let active: Vec<_> = header.iter().filter(|h| h.sort.is_some()).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].def.key, ColumnKey::Score);
    }
}
