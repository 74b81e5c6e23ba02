use crate::record::{ColumnIndex, CrossingRecord};
use anyhow::Context;
use chrono::NaiveDate;
use csv::ReaderBuilder;
use log::info;
use std::collections::BTreeSet;
use std::path::Path;

/// The full border crossing dataset: an ordered, read-only collection
/// of crossing records.
///
/// Loaded once per process and shared by reference afterwards; nothing
/// mutates it after load, so it is safe to hand out to any number of
/// recomputations.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<CrossingRecord>,
}

impl Dataset {
    /// Load the dataset from a CSV file on disk. Fatal on a missing
    /// file, missing required columns, or any unparseable row; there is
    /// no partial-load policy.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dataset file {}", path.display()))?;
        Self::from_csv_str(&contents)
            .with_context(|| format!("failed to load dataset from {}", path.display()))
    }

    /// Load the dataset from a CSV string.
    ///
    /// Required columns (resolved from the header row by name):
    /// Port Name, State, Measure, Date, Value, Latitude, Longitude.
    pub fn from_csv_str(csv_object: &str) -> anyhow::Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .from_reader(csv_object.as_bytes());
        let headers = rdr.headers()?.clone();
        let columns = ColumnIndex::from_headers(&headers)?;

        let mut records = Vec::new();
        for (i, row) in rdr.records().enumerate() {
            let row = row?;
            // header occupies line 1, so data rows start on line 2
            let record = CrossingRecord::parse_row(&row, &columns, i + 2)?;
            records.push(record);
        }

        info!("loaded {} crossing records", records.len());
        Ok(Dataset { records })
    }

    /// Build a dataset from already-parsed records.
    pub fn from_records(records: Vec<CrossingRecord>) -> Self {
        Dataset { records }
    }

    /// All records, in source order.
    pub fn records(&self) -> &[CrossingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted, deduplicated list of states present in the dataset.
    /// This is what a filter widget should offer as its choices.
    pub fn states(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.records.iter().map(|r| r.state.as_str()).collect();
        set.into_iter().map(String::from).collect()
    }

    /// Sorted, deduplicated list of measures present in the dataset.
    pub fn measures(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.records.iter().map(|r| r.measure.as_str()).collect();
        set.into_iter().map(String::from).collect()
    }

    /// Earliest and latest observed months, or `None` for an empty
    /// dataset. These bound the date range a filter widget may offer.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::Dataset;
    use chrono::NaiveDate;

    const SAMPLE_CSV: &str = include_str!("../../fixtures/border_crossings_sample.csv");

    #[test]
    fn test_load_sample_fixture() {
        let dataset = Dataset::from_csv_str(SAMPLE_CSV).unwrap();
        assert_eq!(dataset.len(), 10);
        assert_eq!(dataset.records()[0].port_name, "El Paso");
        assert_eq!(dataset.records()[9].state, "Montana");
    }

    #[test]
    fn test_states_sorted_unique() {
        let dataset = Dataset::from_csv_str(SAMPLE_CSV).unwrap();
        assert_eq!(
            dataset.states(),
            vec!["California", "Montana", "New York", "Texas"]
        );
    }

    #[test]
    fn test_measures_sorted_unique() {
        let dataset = Dataset::from_csv_str(SAMPLE_CSV).unwrap();
        assert_eq!(
            dataset.measures(),
            vec!["Pedestrians", "Personal Vehicles", "Trucks"]
        );
    }

    #[test]
    fn test_date_range() {
        let dataset = Dataset::from_csv_str(SAMPLE_CSV).unwrap();
        let (min, max) = dataset.date_range().unwrap();
        assert_eq!(min, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(max, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
    }

    #[test]
    fn test_empty_dataset() {
        let csv_data = "Port Name,State,Measure,Date,Value,Latitude,Longitude\n";
        let dataset = Dataset::from_csv_str(csv_data).unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.states().is_empty());
        assert!(dataset.date_range().is_none());
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let csv_data = "Port Name,State,Date,Value,Latitude,Longitude\n";
        let err = Dataset::from_csv_str(csv_data).unwrap_err();
        assert!(err.to_string().contains("Measure"));
    }

    #[test]
    fn test_bad_date_is_fatal() {
        let csv_data = "\
Port Name,State,Measure,Date,Value,Latitude,Longitude
El Paso,Texas,Trucks,Jan 2024,100,31.764,-106.451
Laredo,Texas,Trucks,01/2024,50,27.599,-99.537
";
        let err = Dataset::from_csv_str(csv_data).unwrap_err();
        // header is line 1, so the offending row is line 3
        assert!(err.to_string().contains("row 3"));
    }
}
