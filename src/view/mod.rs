use std::cmp::Ordering;

use itertools::Itertools;

use crate::catalog::{Catalog, VariantFiles};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortColumn {
    No,
    Title,
}

impl SortColumn {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "no" | "position" => Some(Self::No),
            "title" => Some(Self::Title),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::No => "no",
            Self::Title => "title",
        }
    }
}

/// Active sort column and direction for the session. Toggling the current
/// column flips the direction; selecting another column resets to ascending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub ascending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: SortColumn::No,
            ascending: true,
        }
    }
}

impl SortState {
    pub fn new(column: SortColumn, ascending: bool) -> Self {
        Self { column, ascending }
    }

    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == column {
            self.ascending = !self.ascending;
        } else {
            self.column = column;
            self.ascending = true;
        }
    }
}

/// One renderable table row. `position` reflects the row's place after the
/// active sort and filter were applied; it is recomputed on every pass and
/// never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayRow {
    pub position: usize,
    pub title: String,
    pub files: VariantFiles,
}

// Stand-in for localeCompare: case-insensitive comparison with a
// case-sensitive tiebreak so equal-ignoring-case titles still order
// deterministically.
fn title_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Produces the ordered, numbered row list for a (possibly filtered) catalog.
///
/// Each entry gets a provisional 1-based index from its catalog order, which
/// serves only as the sort key for the `no` column. Rows are renumbered 1..N
/// by final position afterwards, so ascending `no` sort is an identity
/// ordering by construction and descending `no` reverses the catalog order.
/// The upstream page behaves the same way; keep it that way.
pub fn build_rows(catalog: &Catalog, sort: SortState) -> Vec<DisplayRow> {
    let rows = catalog
        .entries()
        .iter()
        .enumerate()
        .map(|(idx, entry)| DisplayRow {
            position: idx + 1,
            title: entry.title.clone(),
            files: entry.files.clone(),
        })
        .sorted_by(|a, b| {
            let ordering = match sort.column {
                SortColumn::No => a.position.cmp(&b.position),
                SortColumn::Title => title_cmp(&a.title, &b.title),
            };
            if sort.ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });

    rows.enumerate()
        .map(|(idx, mut row)| {
            row.position = idx + 1;
            row
        })
        .collect()
}
