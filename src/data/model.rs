use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::RangeInclusive;

use super::error::LoadError;
use super::schema::{self, CONFERENCE, DIVISION, LOGO_PATH, SEASON_YEAR, TEAM_NAME};

// ---------------------------------------------------------------------------
// Cell – a single value in a source column
// ---------------------------------------------------------------------------

/// A dynamically-typed table value as read from CSV / JSON / Parquet.
/// Using `BTreeSet` downstream so `Cell` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Float(f64),
    Null,
}

// -- Manual Eq/Ord so we can put Cell in BTreeSet --

impl Eq for Cell {}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Cell::*;
        fn discriminant(v: &Cell) -> u8 {
            match v {
                Null => 0,
                Integer(_) => 1,
                Float(_) => 2,
                Text(_) => 3,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) if v.fract() == 0.0 => write!(f, "{v:.0}"),
            Cell::Float(v) => write!(f, "{v:.2}"),
            Cell::Null => write!(f, ""),
        }
    }
}

impl Cell {
    /// Interpret the value as an `f64` for sorting and plotting.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Float(v) => Some(*v),
            Cell::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Guess the type of a text field, as read from CSV.
    pub fn parse(s: &str) -> Cell {
        let s = s.trim();
        if s.is_empty() {
            return Cell::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return Cell::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return Cell::Float(f);
        }
        Cell::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// RawTable – what every loader produces
// ---------------------------------------------------------------------------

/// Header row plus typed cells, before validation.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

// ---------------------------------------------------------------------------
// TeamSeason – one row of the table
// ---------------------------------------------------------------------------

/// One team's statistics for one season.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamSeason {
    pub team: String,
    pub year: i32,
    pub conference: String,
    pub division: String,
    /// Aligned with [`Dataset::metric_columns`]; `None` where the source was blank.
    pub metrics: Vec<Option<f64>>,
    /// Relative path of the team's marker image.
    pub logo_path: Option<String>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed column indices.
///
/// Never mutated after construction; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<TeamSeason>,
    columns: Vec<String>,
    metric_columns: Vec<String>,
    unique_values: BTreeMap<String, BTreeSet<Cell>>,
    teams: Vec<String>,
    /// `(conference, division)` in first-seen order.
    divisions: Vec<(String, String)>,
}

impl Dataset {
    /// Validate a raw table and build the dataset.
    pub fn from_table(table: RawTable) -> Result<Self, LoadError> {
        let headers: Vec<String> = table
            .headers
            .iter()
            .map(|h| schema::display_name(h))
            .collect();

        let position = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            position(name).ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };

        for name in schema::REQUIRED_COLUMNS {
            require(name)?;
        }
        let team_idx = require(TEAM_NAME)?;
        let year_idx = require(SEASON_YEAR)?;
        let conf_idx = require(CONFERENCE)?;
        let div_idx = require(DIVISION)?;
        let logo_idx = position(LOGO_PATH);

        // Everything that is not identity text is a numeric metric.
        let mut metric_cols: Vec<(usize, String)> = Vec::new();
        for (i, h) in headers.iter().enumerate() {
            if schema::is_identity(h) {
                continue;
            }
            if metric_cols.iter().any(|(_, seen)| seen == h) {
                log::warn!("Ignoring duplicate column '{h}'");
                continue;
            }
            metric_cols.push((i, h.clone()));
        }
        let win_loss_idx = metric_cols
            .iter()
            .position(|(_, h)| h == schema::WIN_LOSS_PERCENTAGE);

        let mut records = Vec::with_capacity(table.rows.len());
        for (row, cells) in table.rows.iter().enumerate() {
            let get = |idx: usize| cells.get(idx).unwrap_or(&Cell::Null);

            let team = required_text(get(team_idx), row, TEAM_NAME)?;
            let year = parse_year(get(year_idx), row)?;
            let conference = required_text(get(conf_idx), row, CONFERENCE)?;
            let division = required_text(get(div_idx), row, DIVISION)?;

            let mut metrics = metric_cols
                .iter()
                .map(|(idx, name)| parse_metric(get(*idx), row, name))
                .collect::<Result<Vec<_>, _>>()?;
            if let Some(wl) = win_loss_idx {
                metrics[wl] = metrics[wl].map(|v| (v * 100.0).round_ties_even() / 100.0);
            }

            let logo_path = logo_idx.and_then(|idx| match get(idx) {
                Cell::Null => None,
                Cell::Text(s) if s.trim().is_empty() => None,
                other => Some(other.to_string()),
            });

            records.push(TeamSeason {
                team,
                year,
                conference,
                division,
                metrics,
                logo_path,
            });
        }

        if records.is_empty() {
            return Err(LoadError::Empty);
        }

        let metric_columns: Vec<String> = metric_cols.into_iter().map(|(_, h)| h).collect();
        let mut columns: Vec<String> = schema::IDENTITY_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .collect();
        columns.extend(metric_columns.iter().cloned());
        if logo_idx.is_some() {
            columns.push(LOGO_PATH.to_string());
        }

        let mut dataset = Dataset {
            records,
            columns,
            metric_columns,
            unique_values: BTreeMap::new(),
            teams: Vec::new(),
            divisions: Vec::new(),
        };
        dataset.build_indices();
        Ok(dataset)
    }

    fn build_indices(&mut self) {
        let mut unique_values: BTreeMap<String, BTreeSet<Cell>> = BTreeMap::new();
        let mut teams: Vec<String> = Vec::new();
        let mut divisions: Vec<(String, String)> = Vec::new();
        for rec in &self.records {
            for col in &self.columns {
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(self.cell(rec, col));
            }
            if !teams.contains(&rec.team) {
                teams.push(rec.team.clone());
            }
            let pair = (rec.conference.clone(), rec.division.clone());
            if !divisions.contains(&pair) {
                divisions.push(pair);
            }
        }
        self.unique_values = unique_values;
        self.teams = teams;
        self.divisions = divisions;
    }

    /// All records in source order.
    pub fn records(&self) -> &[TeamSeason] {
        &self.records
    }

    /// Every column: identity columns, then metrics, then the logo column if present.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Numeric metric columns in source order (the plot axis choices).
    pub fn metric_columns(&self) -> &[String] {
        &self.metric_columns
    }

    /// The sorted set of unique values in `column`.
    pub fn unique_values(&self, column: &str) -> Option<&BTreeSet<Cell>> {
        self.unique_values.get(column)
    }

    pub fn metric_index(&self, column: &str) -> Option<usize> {
        self.metric_columns.iter().position(|c| c == column)
    }

    /// Value of a numeric metric for `record`.
    pub fn metric(&self, record: &TeamSeason, column: &str) -> Option<f64> {
        self.metric_index(column)
            .and_then(|idx| record.metrics.get(idx).copied().flatten())
    }

    /// Value of any column for `record`; unknown columns read as `Null`.
    pub fn cell(&self, record: &TeamSeason, column: &str) -> Cell {
        match column {
            TEAM_NAME => Cell::Text(record.team.clone()),
            SEASON_YEAR => Cell::Integer(record.year as i64),
            CONFERENCE => Cell::Text(record.conference.clone()),
            DIVISION => Cell::Text(record.division.clone()),
            LOGO_PATH => record
                .logo_path
                .clone()
                .map(Cell::Text)
                .unwrap_or(Cell::Null),
            metric => self
                .metric(record, metric)
                .map(Cell::Float)
                .unwrap_or(Cell::Null),
        }
    }

    /// Team names in first-seen order.
    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    /// Conference names in first-seen order.
    pub fn conferences(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for (conf, _) in &self.divisions {
            if !out.contains(conf) {
                out.push(conf.clone());
            }
        }
        out
    }

    /// `(conference, division)` pairs in first-seen order.
    pub fn divisions(&self) -> &[(String, String)] {
        &self.divisions
    }

    /// Earliest to latest season.
    pub fn years(&self) -> RangeInclusive<i32> {
        let min = self.records.iter().map(|r| r.year).min().unwrap_or_default();
        let max = self.records.iter().map(|r| r.year).max().unwrap_or_default();
        min..=max
    }

    pub fn latest_year(&self) -> i32 {
        *self.years().end()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn required_text(cell: &Cell, row: usize, column: &str) -> Result<String, LoadError> {
    let text = cell.to_string();
    if cell.is_null() || text.trim().is_empty() {
        return Err(LoadError::MissingValue {
            row,
            column: column.to_string(),
        });
    }
    Ok(text.trim().to_string())
}

fn parse_year(cell: &Cell, row: usize) -> Result<i32, LoadError> {
    let invalid = || LoadError::InvalidYear {
        row,
        value: cell.to_string(),
    };
    match cell {
        Cell::Null => Err(LoadError::MissingValue {
            row,
            column: SEASON_YEAR.to_string(),
        }),
        Cell::Integer(i) => i32::try_from(*i).map_err(|_| invalid()),
        Cell::Float(f) if f.fract() == 0.0 && (i32::MIN as f64..=i32::MAX as f64).contains(f) => {
            Ok(*f as i32)
        }
        Cell::Float(_) => Err(invalid()),
        Cell::Text(s) => s.trim().parse::<i32>().map_err(|_| invalid()),
    }
}

fn parse_metric(cell: &Cell, row: usize, column: &str) -> Result<Option<f64>, LoadError> {
    match cell {
        Cell::Null => Ok(None),
        Cell::Integer(i) => Ok(Some(*i as f64)),
        Cell::Float(f) if f.is_nan() => Ok(None),
        Cell::Float(f) => Ok(Some(*f)),
        Cell::Text(s) if s.trim().is_empty() => Ok(None),
        Cell::Text(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| LoadError::InvalidNumber {
                row,
                column: column.to_string(),
                value: s.clone(),
            }),
    }
}
