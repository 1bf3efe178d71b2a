use std::cmp::Ordering;

use crate::data::filter::{FilterState, FilteredView};
use crate::data::model::Cell;
use crate::data::schema::{GAMES_WON, STANDINGS_COLUMNS, TEAM_NAME};

// ---------------------------------------------------------------------------
// Standings table
// ---------------------------------------------------------------------------

pub const DEFAULT_PAGE_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// One displayed row; `cells` is aligned with [`StandingsTable::columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct StandingsRow {
    /// Index of the source record in the dataset.
    pub row: usize,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StandingsTable {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<StandingsRow>,
    /// Active sort column index and direction.
    pub sort: (usize, SortDirection),
}

/// Result of a table derivation. `NoUpdate` keeps whatever is on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum TableUpdate {
    NoUpdate,
    Replace(StandingsTable),
}

/// Build the standings for `view`, most wins first.
///
/// Without a selected year nothing is derived and the caller keeps its
/// current table.
pub fn derive_table(view: &FilteredView<'_>, state: &FilterState) -> TableUpdate {
    let Some(year) = state.year else {
        return TableUpdate::NoUpdate;
    };

    let title = match &state.division {
        Some(division) => format!("{division} standings for {year} season"),
        None => format!("Overall standings for {year} season"),
    };

    let dataset = view.dataset();
    let rows = view
        .indices()
        .iter()
        .zip(view.records())
        .map(|(&row, rec)| StandingsRow {
            row,
            cells: STANDINGS_COLUMNS
                .iter()
                .map(|col| dataset.cell(rec, col))
                .collect(),
        })
        .collect();

    let mut table = StandingsTable {
        title,
        columns: STANDINGS_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows,
        sort: (0, SortDirection::Descending),
    };
    let wins = table.column_index(GAMES_WON).unwrap_or(0);
    table.sort_by(wins, SortDirection::Descending);
    TableUpdate::Replace(table)
}

impl StandingsTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Stable re-sort on `column`. Blank cells go last in either direction;
    /// ties fall back to team name ascending.
    pub fn sort_by(&mut self, column: usize, direction: SortDirection) {
        let team = self.column_index(TEAM_NAME);
        self.rows.sort_by(|a, b| {
            let primary = match (a.cells.get(column), b.cells.get(column)) {
                (Some(x), Some(y)) => compare_cells(x, y, direction),
                _ => Ordering::Equal,
            };
            primary.then_with(|| match team {
                Some(t) => compare_cells(&a.cells[t], &b.cells[t], SortDirection::Ascending),
                None => Ordering::Equal,
            })
        });
        self.sort = (column, direction);
    }

    /// Header click: same column flips direction, a new column starts descending.
    pub fn toggle_sort(&mut self, column: usize) {
        let direction = if self.sort.0 == column {
            self.sort.1.flipped()
        } else {
            SortDirection::Descending
        };
        self.sort_by(column, direction);
    }

    /// Rows on page `index` (zero-based); out of range pages are empty.
    pub fn page(&self, index: usize, page_size: usize) -> &[StandingsRow] {
        let page_size = page_size.max(1);
        let start = (index * page_size).min(self.rows.len());
        let end = (start + page_size).min(self.rows.len());
        &self.rows[start..end]
    }

    pub fn page_count(&self, page_size: usize) -> usize {
        self.rows.len().div_ceil(page_size.max(1)).max(1)
    }
}

fn compare_cells(a: &Cell, b: &Cell, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        _ => {}
    }
    let ord = match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => a.cmp(b),
    };
    match direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}
