/// Derived views over a filtered dataset. Both are pure functions of
/// `(dataset, filter state)` and never depend on each other.
///
/// ```text
///   FilteredView ──┬──► table::derive_table ──► TableUpdate
///                  └──► plot::derive_plot   ──► PlotSpec
/// ```

pub mod plot;
pub mod table;
