use crate::assets::AssetStore;
use crate::data::filter::{FilterState, FilteredView};
use crate::data::model::{Dataset, TeamSeason};
use crate::data::schema::{DEFAULT_X_METRIC, DEFAULT_Y_METRIC};

// ---------------------------------------------------------------------------
// Scatter plot description
// ---------------------------------------------------------------------------

/// Logo size as a fraction of the data span on each axis.
const DECORATION_SCALE: f64 = 0.1;

/// Metric columns plotted on each axis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AxisSelection {
    pub x: Option<String>,
    pub y: Option<String>,
}

impl AxisSelection {
    /// Passing vs rushing yards when present, otherwise the first two metrics.
    pub fn defaults(dataset: &Dataset) -> Self {
        let metrics = dataset.metric_columns();
        let pick = |preferred: &str, fallback: usize| {
            if dataset.metric_index(preferred).is_some() {
                Some(preferred.to_string())
            } else {
                metrics.get(fallback).cloned()
            }
        };
        AxisSelection {
            x: pick(DEFAULT_X_METRIC, 0),
            y: pick(DEFAULT_Y_METRIC, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoint {
    /// Index of the source record in the dataset.
    pub row: usize,
    pub label: String,
    pub division: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub value: f64,
    pub label: String,
}

/// A logo image drawn in data coordinates over a point.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub row: usize,
    pub uri: String,
    pub center: [f64; 2],
    pub size: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<PlotPoint>,
    /// Vertical line at the x median.
    pub x_median: Option<ReferenceLine>,
    /// Horizontal line at the y median.
    pub y_median: Option<ReferenceLine>,
    pub decorations: Vec<Decoration>,
}

impl PlotSpec {
    /// Nothing to draw: no points, no reference lines.
    pub fn empty() -> Self {
        PlotSpec::default()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.x_median.is_none() && self.y_median.is_none()
    }
}

/// Standard median; `None` for no values.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Build the scatter plot of `axes.y` against `axes.x` over `view`.
///
/// Missing axes, an unknown metric or an unset year give
/// [`PlotSpec::empty`]. Records with a blank value on either axis get no
/// point; medians and spans use every present value on their own axis.
pub fn derive_plot(
    view: &FilteredView<'_>,
    state: &FilterState,
    axes: &AxisSelection,
    assets: &dyn AssetStore,
) -> PlotSpec {
    let (Some(x_metric), Some(y_metric), Some(_)) = (&axes.x, &axes.y, state.year) else {
        return PlotSpec::empty();
    };
    let dataset = view.dataset();
    let (Some(xi), Some(yi)) = (dataset.metric_index(x_metric), dataset.metric_index(y_metric))
    else {
        log::debug!("Unknown plot metric: x={x_metric:?} y={y_metric:?}");
        return PlotSpec::empty();
    };

    let value = |idx: usize, rec: &TeamSeason| -> Option<f64> {
        rec.metrics.get(idx).copied().flatten()
    };

    let xs: Vec<f64> = view.records().filter_map(|r| value(xi, r)).collect();
    let ys: Vec<f64> = view.records().filter_map(|r| value(yi, r)).collect();

    let points: Vec<PlotPoint> = view
        .indices()
        .iter()
        .zip(view.records())
        .filter_map(|(&row, rec)| {
            Some(PlotPoint {
                row,
                label: rec.team.clone(),
                division: rec.division.clone(),
                x: value(xi, rec)?,
                y: value(yi, rec)?,
            })
        })
        .collect();

    let span_x = span(&xs);
    let span_y = span(&ys);
    let decorations = points
        .iter()
        .filter_map(|p| {
            let logo = dataset.records()[p.row].logo_path.as_deref()?;
            let Some(uri) = assets.resolve(logo) else {
                log::debug!("No asset for {logo}; drawing {} without a logo", p.label);
                return None;
            };
            Some(Decoration {
                row: p.row,
                uri,
                center: [p.x, p.y],
                size: [marker_size(span_x, p.x), marker_size(span_y, p.y)],
            })
        })
        .collect();

    PlotSpec {
        title: format!("{y_metric} vs {x_metric}"),
        x_label: x_metric.clone(),
        y_label: y_metric.clone(),
        points,
        x_median: median(&xs).map(|value| ReferenceLine {
            value,
            label: format!("Median {x_metric}"),
        }),
        y_median: median(&ys).map(|value| ReferenceLine {
            value,
            label: format!("Median {y_metric}"),
        }),
        decorations,
    }
}

fn span(values: &[f64]) -> f64 {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if values.is_empty() {
        0.0
    } else {
        max - min
    }
}

fn marker_size(span: f64, coord: f64) -> f64 {
    if span > 0.0 {
        span * DECORATION_SCALE
    } else {
        (coord.abs() * DECORATION_SCALE).max(1.0)
    }
}
