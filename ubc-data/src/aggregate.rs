//! Aggregate computations over a filtered view.
//!
//! Each function is a single group-key to running-sum pass over the
//! view. Per-record values are `u32`; every accumulator is `u64`, so
//! totals are exact.

use crate::filter::{apply_filter, FilterCriteria, FilteredView};
use crate::models::{
    DashboardReport, MapView, Metrics, MetricsPanel, MonthTotal, PortMap, PortPoint, PortTotal,
};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use ubc_bts::dataset::Dataset;
use ubc_bts::month;

/// Default number of ports in the top-ports chart.
pub const TOP_PORTS_DEFAULT: usize = 20;

/// At or below this many map points, zoom in close.
const MAP_ZOOM_CLOSE_THRESHOLD: usize = 5;

/// Summary metrics for a filtered view. An empty view yields all
/// zeros.
pub fn summarize(view: &FilteredView) -> Metrics {
    let mut total_crossings: u64 = 0;
    let mut ports: BTreeSet<&str> = BTreeSet::new();
    let mut states: BTreeSet<&str> = BTreeSet::new();
    for record in view.records() {
        total_crossings += u64::from(record.value);
        ports.insert(record.port_name.as_str());
        states.insert(record.state.as_str());
    }
    Metrics {
        total_crossings,
        unique_ports: ports.len(),
        states_covered: states.len(),
    }
}

/// The measure with the largest summed value over the entire dataset.
///
/// Deliberately computed over the unfiltered dataset, not the filtered
/// view: the original dashboard shows this figure in its filtered
/// metrics panel but never applies the filters to it, and that behavior
/// is preserved here rather than silently fixed.
///
/// Tie-break: the lexicographically smallest measure name wins. The
/// sums are iterated in ascending name order and a candidate is only
/// replaced by a strictly greater sum.
pub fn top_measure(dataset: &Dataset) -> Option<String> {
    let mut sums: BTreeMap<&str, u64> = BTreeMap::new();
    for record in dataset.records() {
        *sums.entry(record.measure.as_str()).or_default() += u64::from(record.value);
    }
    let mut best: Option<(&str, u64)> = None;
    for (measure, total) in &sums {
        let replace = match best {
            None => true,
            Some((_, best_total)) => *total > best_total,
        };
        if replace {
            best = Some((measure, *total));
        }
    }
    best.map(|(measure, _)| measure.to_string())
}

/// Filtered metrics plus the dataset-wide top measure, matching the
/// dashboard's metrics panel.
pub fn metrics_panel(dataset: &Dataset, view: &FilteredView) -> MetricsPanel {
    let metrics = summarize(view);
    MetricsPanel {
        total_crossings: metrics.total_crossings,
        unique_ports: metrics.unique_ports,
        states_covered: metrics.states_covered,
        top_measure: top_measure(dataset),
    }
}

/// Group the view by (port name, latitude, longitude) and sum values.
///
/// Each port is expected to carry one stable coordinate pair, but a
/// port whose coordinates vary across rows yields one point per
/// distinct pair; that is pass-through behavior, not deduplicated.
/// Points are ordered by first appearance in the view.
pub fn port_points(view: &FilteredView) -> Vec<PortPoint> {
    let mut index: HashMap<(&str, u64, u64), usize> = HashMap::new();
    let mut points: Vec<PortPoint> = Vec::new();
    for record in view.records() {
        let key = (
            record.port_name.as_str(),
            record.latitude.to_bits(),
            record.longitude.to_bits(),
        );
        match index.get(&key) {
            Some(&i) => points[i].total_value += u64::from(record.value),
            None => {
                index.insert(key, points.len());
                points.push(PortPoint {
                    port_name: record.port_name.clone(),
                    latitude: record.latitude,
                    longitude: record.longitude,
                    total_value: u64::from(record.value),
                });
            }
        }
    }
    points
}

/// The `n` busiest ports in the view by summed value, descending.
///
/// Coordinates are discarded; grouping is by port name only. Ties keep
/// the first-appearance order of the port within the view (the sort is
/// stable over first-appearance grouping), a pinned contract rather
/// than incidental behavior.
pub fn top_ports(view: &FilteredView, n: usize) -> Vec<PortTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<PortTotal> = Vec::new();
    for record in view.records() {
        match index.get(record.port_name.as_str()) {
            Some(&i) => totals[i].total_value += u64::from(record.value),
            None => {
                index.insert(record.port_name.as_str(), totals.len());
                totals.push(PortTotal {
                    port_name: record.port_name.clone(),
                    total_value: u64::from(record.value),
                });
            }
        }
    }
    totals.sort_by(|a, b| b.total_value.cmp(&a.total_value));
    totals.truncate(n);
    totals
}

/// Total crossings per month, ascending by month.
///
/// Months absent from the view are absent from the series, never
/// present with a zero; the presentation layer must expect a sparse
/// time axis.
pub fn monthly_series(view: &FilteredView) -> Vec<MonthTotal> {
    let mut sums: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in view.records() {
        *sums.entry(record.date).or_default() += u64::from(record.value);
    }
    sums.into_iter()
        .map(|(date, total_value)| MonthTotal {
            label: month::format_month_label(&date),
            date,
            total_value,
        })
        .collect()
}

/// A suggested initial map view: centered on the mean coordinate of the
/// points, zoomed in when there are few of them. `None` for an empty
/// point list; that is the explicit "no data" signal for the map.
pub fn map_view(points: &[PortPoint]) -> Option<MapView> {
    if points.is_empty() {
        return None;
    }
    let count = points.len() as f64;
    let center_lat = points.iter().map(|p| p.latitude).sum::<f64>() / count;
    let center_lon = points.iter().map(|p| p.longitude).sum::<f64>() / count;
    let zoom = if points.len() <= MAP_ZOOM_CLOSE_THRESHOLD {
        6
    } else {
        4
    };
    Some(MapView {
        center_lat,
        center_lon,
        zoom,
    })
}

/// Port points with their map view, optionally narrowed to a single
/// highlighted port. The view is computed after the highlight so the
/// map centers on what is actually shown.
pub fn port_map(view: &FilteredView, highlight: Option<&str>) -> PortMap {
    let mut points = port_points(view);
    if let Some(port) = highlight {
        points.retain(|p| p.port_name == port);
    }
    PortMap {
        map_view: map_view(&points),
        points,
    }
}

/// Run the whole pipeline for one filter request.
pub fn dashboard_report(
    dataset: &Dataset,
    criteria: &FilterCriteria,
    limit: usize,
) -> DashboardReport {
    let view = apply_filter(dataset, criteria);
    log::info!(
        "report over {} of {} records",
        view.len(),
        dataset.len()
    );
    DashboardReport {
        metrics: metrics_panel(dataset, &view),
        port_map: port_map(&view, None),
        top_ports: top_ports(&view, limit),
        monthly_series: monthly_series(&view),
    }
}
