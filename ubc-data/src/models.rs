//! Output model structs for the aggregation pipeline.
//!
//! All structs derive `Serialize` so the presentation layer can consume
//! them as JSON. The pipeline has no dependency on how or whether these
//! are displayed.

use chrono::NaiveDate;
use serde::Serialize;

/// Summary metrics over a filtered view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metrics {
    /// Sum of all crossing counts in the view. Exact integer sum.
    pub total_crossings: u64,
    /// Number of distinct port names in the view.
    pub unique_ports: usize,
    /// Number of distinct states in the view.
    pub states_covered: usize,
}

/// The dashboard metrics panel: filtered summary counts plus the
/// dataset-wide top measure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsPanel {
    pub total_crossings: u64,
    pub unique_ports: usize,
    pub states_covered: usize,
    /// Measure with the largest summed value over the whole dataset,
    /// `None` only when the dataset itself is empty. Not affected by
    /// filters; see [`crate::aggregate::top_measure`].
    pub top_measure: Option<String>,
}

/// Summed crossings for one port at one coordinate pair, for plotting
/// on a map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortPoint {
    pub port_name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Total crossings for this (port, coordinate) group
    pub total_value: u64,
}

/// Summed crossings for one port, coordinates discarded. Used for the
/// top-ports bar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortTotal {
    pub port_name: String,
    pub total_value: u64,
}

/// Total crossings for one month, for the monthly trend line chart.
///
/// `date` is the first day of the month. Months with no records in the
/// filtered view are absent from the series, not present with zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthTotal {
    pub date: NaiveDate,
    /// The month in the dataset's own label form, e.g. "Jan 2024";
    /// suitable for chart axis ticks.
    pub label: String,
    pub total_value: u64,
}

/// A suggested initial map view over a set of port points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    /// Mean latitude of the plotted points
    pub center_lat: f64,
    /// Mean longitude of the plotted points
    pub center_lon: f64,
    /// Zoom hint: 6 for five or fewer points, 4 otherwise
    pub zoom: u8,
}

/// Port points together with their suggested map view. `map_view` is
/// `None` when no points match, which is the explicit "no data" signal
/// the presentation layer must handle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortMap {
    pub map_view: Option<MapView>,
    pub points: Vec<PortPoint>,
}

/// The filter choices a dataset supports: what a sidebar should offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Sorted, deduplicated state names
    pub states: Vec<String>,
    /// Sorted, deduplicated measure names
    pub measures: Vec<String>,
    /// Earliest observed month, `None` for an empty dataset
    pub earliest: Option<NaiveDate>,
    /// Latest observed month
    pub latest: Option<NaiveDate>,
}

/// Everything the dashboard renders for one filter request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub metrics: MetricsPanel,
    pub port_map: PortMap,
    pub top_ports: Vec<PortTotal>,
    pub monthly_series: Vec<MonthTotal>,
}
