//! Reporting command implementations.
//!
//! The dataset is loaded once per invocation and every output is a
//! pure function of (dataset, criteria), so each command is load,
//! filter, aggregate, print.

use crate::FilterArgs;
use anyhow::Context;
use log::info;
use serde::Serialize;
use ubc_bts::dataset::Dataset;
use ubc_bts::month;
use ubc_data::aggregate;
use ubc_data::filter::{apply_filter, filter_options, FilterCriteria};

fn load_dataset(path: &str) -> anyhow::Result<Dataset> {
    let dataset = Dataset::from_csv_path(path)?;
    info!("loaded {} records from {}", dataset.len(), path);
    Ok(dataset)
}

/// Turn CLI filter flags into criteria, starting from select-all
/// defaults. Month labels use the dataset's own "Jan 2024" format.
fn build_criteria(dataset: &Dataset, args: &FilterArgs) -> anyhow::Result<FilterCriteria> {
    let mut criteria = FilterCriteria::select_all(dataset);
    if !args.states.is_empty() {
        criteria.states = args.states.iter().cloned().collect();
    }
    if !args.measures.is_empty() {
        criteria.measures = args.measures.iter().cloned().collect();
    }
    if let Some(start) = &args.start {
        criteria.start = month::parse_month_label(start)
            .with_context(|| format!("bad --start value {:?}", start))?;
    }
    if let Some(end) = &args.end {
        criteria.end = month::parse_month_label(end)
            .with_context(|| format!("bad --end value {:?}", end))?;
    }
    Ok(criteria)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn run_options(data: &str) -> anyhow::Result<()> {
    let dataset = load_dataset(data)?;
    print_json(&filter_options(&dataset))
}

pub fn run_metrics(data: &str, args: &FilterArgs) -> anyhow::Result<()> {
    let dataset = load_dataset(data)?;
    let criteria = build_criteria(&dataset, args)?;
    let view = apply_filter(&dataset, &criteria);
    print_json(&aggregate::metrics_panel(&dataset, &view))
}

pub fn run_ports(data: &str, args: &FilterArgs, port: Option<&str>) -> anyhow::Result<()> {
    let dataset = load_dataset(data)?;
    let criteria = build_criteria(&dataset, args)?;
    let view = apply_filter(&dataset, &criteria);
    print_json(&aggregate::port_map(&view, port))
}

pub fn run_top_ports(data: &str, args: &FilterArgs, limit: usize) -> anyhow::Result<()> {
    let dataset = load_dataset(data)?;
    let criteria = build_criteria(&dataset, args)?;
    let view = apply_filter(&dataset, &criteria);
    print_json(&aggregate::top_ports(&view, limit))
}

pub fn run_monthly(data: &str, args: &FilterArgs) -> anyhow::Result<()> {
    let dataset = load_dataset(data)?;
    let criteria = build_criteria(&dataset, args)?;
    let view = apply_filter(&dataset, &criteria);
    print_json(&aggregate::monthly_series(&view))
}

pub fn run_report(data: &str, args: &FilterArgs, limit: usize) -> anyhow::Result<()> {
    let dataset = load_dataset(data)?;
    let criteria = build_criteria(&dataset, args)?;
    print_json(&aggregate::dashboard_report(&dataset, &criteria, limit))
}

#[cfg(test)]
mod tests {
    use super::build_criteria;
    use crate::FilterArgs;
    use chrono::NaiveDate;
    use ubc_bts::dataset::Dataset;
    use ubc_data::aggregate::{dashboard_report, TOP_PORTS_DEFAULT};

    const SAMPLE_CSV: &str = include_str!("../../fixtures/border_crossings_sample.csv");

    #[test]
    fn test_build_criteria_defaults_to_select_all() {
        let dataset = Dataset::from_csv_str(SAMPLE_CSV).unwrap();
        let criteria = build_criteria(&dataset, &FilterArgs::default()).unwrap();
        assert_eq!(criteria.states.len(), 4);
        assert_eq!(criteria.measures.len(), 3);
        assert_eq!(
            criteria.start,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(criteria.end, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
    }

    #[test]
    fn test_build_criteria_overrides() {
        let dataset = Dataset::from_csv_str(SAMPLE_CSV).unwrap();
        let args = FilterArgs {
            states: vec!["Texas".to_string()],
            measures: vec!["Trucks".to_string()],
            start: Some("Feb 2024".to_string()),
            end: Some("Mar 2024".to_string()),
        };
        let criteria = build_criteria(&dataset, &args).unwrap();
        assert!(criteria.states.contains("Texas"));
        assert_eq!(criteria.states.len(), 1);
        assert_eq!(
            criteria.start,
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
    }

    #[test]
    fn test_build_criteria_bad_month_label() {
        let dataset = Dataset::from_csv_str(SAMPLE_CSV).unwrap();
        let args = FilterArgs {
            start: Some("2024-02".to_string()),
            ..FilterArgs::default()
        };
        assert!(build_criteria(&dataset, &args).is_err());
    }

    #[test]
    fn test_report_over_fixture() {
        let dataset = Dataset::from_csv_str(SAMPLE_CSV).unwrap();
        let args = FilterArgs {
            states: vec!["Texas".to_string()],
            ..FilterArgs::default()
        };
        let criteria = build_criteria(&dataset, &args).unwrap();
        let report = dashboard_report(&dataset, &criteria, TOP_PORTS_DEFAULT);
        // Texas rows: El Paso 51037 + 31545 + 48990, Laredo 189473 + 175210
        assert_eq!(report.metrics.total_crossings, 496_255);
        assert_eq!(report.metrics.unique_ports, 2);
        assert_eq!(report.metrics.states_covered, 1);
        // dataset-wide: Personal Vehicles 782665 beats Trucks 436328
        assert_eq!(
            report.metrics.top_measure,
            Some("Personal Vehicles".to_string())
        );
        assert_eq!(report.top_ports[0].port_name, "Laredo");
        assert_eq!(report.monthly_series.len(), 2);
    }
}
