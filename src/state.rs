use std::collections::BTreeSet;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::assets::{AssetStore, NoAssets};
use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::filter::{division_options, filter, Conference, FilterState};
use crate::data::model::Dataset;
use crate::view::plot::{derive_plot, AxisSelection, PlotSpec};
use crate::view::table::{derive_table, StandingsTable, TableUpdate, DEFAULT_PAGE_SIZE};

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A single widget change. Each one overwrites exactly one selection.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEvent {
    YearChanged(Option<i32>),
    TeamsChanged(BTreeSet<String>),
    ConferenceChanged(Conference),
    DivisionChanged(Option<String>),
    XMetricChanged(Option<String>),
    YMetricChanged(Option<String>),
}

impl FilterEvent {
    /// The standings ignore team and axis selections.
    fn affects_table(&self) -> bool {
        matches!(
            self,
            FilterEvent::YearChanged(_)
                | FilterEvent::ConferenceChanged(_)
                | FilterEvent::DivisionChanged(_)
        )
    }
}

// ---------------------------------------------------------------------------
// Last-request-wins slot
// ---------------------------------------------------------------------------

/// Holds the most recent derived value. A result computed for an older
/// revision never replaces a newer one.
#[derive(Debug, Clone)]
pub struct Latest<T> {
    revision: u64,
    value: T,
}

impl<T> Latest<T> {
    pub fn new(value: T) -> Self {
        Self { revision: 0, value }
    }

    /// Store `value` unless something newer is already published.
    pub fn publish(&mut self, revision: u64, value: T) -> bool {
        if revision < self.revision {
            log::debug!(
                "Dropping stale result for revision {revision} (have {})",
                self.revision
            );
            return false;
        }
        self.revision = revision;
        self.value = value;
        true
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file loads). Shared read-only.
    pub dataset: Option<Arc<Dataset>>,

    pub assets: Arc<dyn AssetStore + Send + Sync>,

    pub filters: FilterState,
    pub axes: AxisSelection,

    /// Divisions offered for the selected conference.
    pub division_options: Vec<String>,

    pub table: Latest<Option<StandingsTable>>,
    pub plot: Latest<PlotSpec>,

    /// Rows passing the full filter (the plot's view).
    pub visible_rows: usize,

    /// Division colours for plain points.
    pub color_map: Option<ColorMap>,

    pub page: usize,
    pub page_size: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    revision: u64,
    team_sample: usize,
    seed: Option<u64>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            assets: Arc::new(NoAssets),
            filters: FilterState::default(),
            axes: AxisSelection::default(),
            division_options: Vec::new(),
            table: Latest::new(None),
            plot: Latest::new(PlotSpec::empty()),
            visible_rows: 0,
            color_map: None,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            status_message: None,
            revision: 0,
            team_sample: 8,
            seed: None,
        }
    }
}

impl AppState {
    pub fn new(config: &DashboardConfig, assets: Arc<dyn AssetStore + Send + Sync>) -> Self {
        Self {
            assets,
            page_size: config.page_size.max(1),
            team_sample: config.default_team_sample,
            seed: config.seed,
            ..Self::default()
        }
    }

    /// Ingest a newly loaded dataset, reset selections and derive every view.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let teams: BTreeSet<String> = dataset
            .teams()
            .choose_multiple(&mut rng, self.team_sample)
            .cloned()
            .collect();

        self.filters = FilterState {
            year: Some(dataset.latest_year()),
            teams,
            conference: Conference::All,
            division: None,
        };
        self.axes = AxisSelection::defaults(&dataset);
        self.division_options = division_options(&dataset, &Conference::All);
        self.color_map = Some(ColorMap::new(dataset.divisions()));
        self.table = Latest::new(None);
        self.plot = Latest::new(PlotSpec::empty());
        self.page = 0;
        self.dataset = Some(dataset);
        self.status_message = None;

        self.revision += 1;
        self.recompute(self.revision, true);
    }

    /// Apply one widget change and re-derive the views that depend on it.
    pub fn apply(&mut self, event: FilterEvent) {
        self.revision += 1;
        let revision = self.revision;
        let table = event.affects_table();
        log::debug!("Revision {revision}: {event:?}");

        match event {
            FilterEvent::YearChanged(year) => self.filters.year = year,
            FilterEvent::TeamsChanged(teams) => self.filters.teams = teams,
            FilterEvent::ConferenceChanged(conference) => {
                self.filters.conference = conference;
                self.refresh_division_options();
            }
            FilterEvent::DivisionChanged(division) => self.filters.division = division,
            FilterEvent::XMetricChanged(x) => self.axes.x = x,
            FilterEvent::YMetricChanged(y) => self.axes.y = y,
        }

        self.recompute(revision, table);
    }

    fn refresh_division_options(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        self.division_options = division_options(ds, &self.filters.conference);
        if let Some(div) = &self.filters.division {
            if !self.division_options.contains(div) {
                log::debug!("Clearing division {div}: not in {}", self.filters.conference);
                self.filters.division = None;
            }
        }
    }

    /// Every event moves the plot; only some move the standings. The plot's
    /// view is the standings view narrowed to the selected teams.
    fn recompute(&mut self, revision: u64, table: bool) {
        let Some(ds) = self.dataset.clone() else {
            return;
        };

        let scope = filter(&ds, &self.filters.standings_scope());
        if table {
            match derive_table(&scope, &self.filters) {
                TableUpdate::Replace(standings) => {
                    if self.table.publish(revision, Some(standings)) {
                        self.page = 0;
                    }
                }
                TableUpdate::NoUpdate => log::debug!("Revision {revision}: table unchanged"),
            }
        }

        let view = scope.refine(&self.filters);
        self.visible_rows = view.len();
        let spec = derive_plot(&view, &self.filters, &self.axes, self.assets.as_ref());
        log::debug!(
            "Revision {revision}: {} visible rows, {} points",
            view.len(),
            spec.points.len()
        );
        self.plot.publish(revision, spec);
    }

    /// Header click on the standings table.
    pub fn sort_table(&mut self, column: usize) {
        if let Some(table) = self.table.get_mut() {
            table.toggle_sort(column);
            self.page = 0;
        }
    }

    pub fn page_count(&self) -> usize {
        self.table
            .get()
            .as_ref()
            .map(|t| t.page_count(self.page_size))
            .unwrap_or(1)
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.page_count() - 1);
    }
}
