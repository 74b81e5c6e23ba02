use crate::month;
use chrono::NaiveDate;
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors that can occur when parsing the border crossing CSV.
///
/// Any one of these is load-fatal: the dataset has no partial-load
/// policy, so the first bad row or missing column aborts the load.
#[derive(Debug, PartialEq, Clone)]
pub enum RecordError {
    /// A required column header is absent from the CSV.
    MissingColumn(String),
    /// A required field is empty or absent on a data row.
    MissingField { row: usize, field: &'static str },
    /// The Date column did not match the "Jan 2024" format.
    BadDate { row: usize, raw: String },
    /// The Value column was not a non-negative integer.
    BadValue { row: usize, raw: String },
    /// Latitude or Longitude was not a valid float.
    BadCoordinate {
        row: usize,
        field: &'static str,
        raw: String,
    },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::MissingColumn(name) => {
                write!(f, "required column {:?} not found in header", name)
            }
            RecordError::MissingField { row, field } => {
                write!(f, "row {}: missing {}", row, field)
            }
            RecordError::BadDate { row, raw } => {
                write!(f, "row {}: date {:?} does not match \"Jan 2024\" format", row, raw)
            }
            RecordError::BadValue { row, raw } => {
                write!(f, "row {}: value {:?} is not a non-negative integer", row, raw)
            }
            RecordError::BadCoordinate { row, field, raw } => {
                write!(f, "row {}: {} {:?} is not a valid coordinate", row, field, raw)
            }
        }
    }
}

impl std::error::Error for RecordError {}

/// Column indices for the required BTS columns, resolved from the CSV
/// header row by name. The published dataset carries extra columns
/// (Port Code, Border, Point) in varying positions, so positional
/// indexing is not reliable.
#[derive(Debug, Clone, Copy)]
pub struct ColumnIndex {
    pub port_name: usize,
    pub state: usize,
    pub measure: usize,
    pub date: usize,
    pub value: usize,
    pub latitude: usize,
    pub longitude: usize,
}

impl ColumnIndex {
    /// Resolve the required columns from a header row.
    pub fn from_headers(headers: &StringRecord) -> Result<Self, RecordError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| RecordError::MissingColumn(name.to_string()))
        };
        Ok(ColumnIndex {
            port_name: find("Port Name")?,
            state: find("State")?,
            measure: find("Measure")?,
            date: find("Date")?,
            value: find("Value")?,
            latitude: find("Latitude")?,
            longitude: find("Longitude")?,
        })
    }
}

/// One row of the border crossing dataset: inbound crossings counted at
/// a single port, for a single measure, during a single month.
///
/// Records are immutable once loaded.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CrossingRecord {
    /// Port of entry name (e.g. "El Paso")
    pub port_name: String,
    /// U.S. state the port is in
    pub state: String,
    /// What was counted (e.g. "Pedestrians", "Trucks")
    pub measure: String,
    /// Month of the count, normalized to the first day of the month
    pub date: NaiveDate,
    /// Number of crossings counted
    pub value: u32,
    /// Port latitude in decimal degrees
    pub latitude: f64,
    /// Port longitude in decimal degrees
    pub longitude: f64,
}

impl CrossingRecord {
    /// Parse one CSV data row. `row` is the 1-based line number in the
    /// source file (header is line 1) and is used only for error
    /// reporting.
    pub fn parse_row(
        record: &StringRecord,
        columns: &ColumnIndex,
        row: usize,
    ) -> Result<Self, RecordError> {
        let text = |idx: usize, field: &'static str| {
            match record.get(idx).map(str::trim) {
                Some(s) if !s.is_empty() => Ok(s),
                _ => Err(RecordError::MissingField { row, field }),
            }
        };

        let port_name = text(columns.port_name, "port name")?.to_string();
        let state = text(columns.state, "state")?.to_string();
        let measure = text(columns.measure, "measure")?.to_string();

        let raw_date = text(columns.date, "date")?;
        let date = month::parse_month_label(raw_date).map_err(|_| RecordError::BadDate {
            row,
            raw: raw_date.to_string(),
        })?;

        let raw_value = text(columns.value, "value")?;
        let value = raw_value.parse::<u32>().map_err(|_| RecordError::BadValue {
            row,
            raw: raw_value.to_string(),
        })?;

        let raw_lat = text(columns.latitude, "latitude")?;
        let latitude = raw_lat
            .parse::<f64>()
            .map_err(|_| RecordError::BadCoordinate {
                row,
                field: "latitude",
                raw: raw_lat.to_string(),
            })?;

        let raw_lon = text(columns.longitude, "longitude")?;
        let longitude = raw_lon
            .parse::<f64>()
            .map_err(|_| RecordError::BadCoordinate {
                row,
                field: "longitude",
                raw: raw_lon.to_string(),
            })?;

        Ok(CrossingRecord {
            port_name,
            state,
            measure,
            date,
            value,
            latitude,
            longitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ColumnIndex, CrossingRecord, RecordError};
    use chrono::NaiveDate;
    use csv::StringRecord;

    fn headers() -> StringRecord {
        StringRecord::from(vec![
            "Port Name",
            "State",
            "Port Code",
            "Border",
            "Date",
            "Measure",
            "Value",
            "Latitude",
            "Longitude",
            "Point",
        ])
    }

    #[test]
    fn test_column_index_resolves_by_name() {
        let columns = ColumnIndex::from_headers(&headers()).unwrap();
        assert_eq!(columns.port_name, 0);
        assert_eq!(columns.date, 4);
        assert_eq!(columns.measure, 5);
        assert_eq!(columns.longitude, 8);
    }

    #[test]
    fn test_column_index_missing_column() {
        let headers = StringRecord::from(vec!["Port Name", "State", "Date", "Value"]);
        let err = ColumnIndex::from_headers(&headers).unwrap_err();
        assert_eq!(err, RecordError::MissingColumn("Measure".to_string()));
    }

    #[test]
    fn test_parse_row() {
        let columns = ColumnIndex::from_headers(&headers()).unwrap();
        let row = StringRecord::from(vec![
            "El Paso",
            "Texas",
            "2402",
            "US-Mexico Border",
            "Jan 2024",
            "Pedestrians",
            "51037",
            "31.764",
            "-106.451",
            "POINT (-106.451 31.764)",
        ]);
        let record = CrossingRecord::parse_row(&row, &columns, 2).unwrap();
        assert_eq!(record.port_name, "El Paso");
        assert_eq!(record.state, "Texas");
        assert_eq!(record.measure, "Pedestrians");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(record.value, 51037);
        assert!((record.latitude - 31.764).abs() < f64::EPSILON);
        assert!((record.longitude - (-106.451)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_row_bad_date() {
        let columns = ColumnIndex::from_headers(&headers()).unwrap();
        let row = StringRecord::from(vec![
            "El Paso",
            "Texas",
            "2402",
            "US-Mexico Border",
            "2024-01-15",
            "Pedestrians",
            "51037",
            "31.764",
            "-106.451",
            "",
        ]);
        let err = CrossingRecord::parse_row(&row, &columns, 7).unwrap_err();
        assert_eq!(
            err,
            RecordError::BadDate {
                row: 7,
                raw: "2024-01-15".to_string()
            }
        );
    }

    #[test]
    fn test_parse_row_negative_value_rejected() {
        let columns = ColumnIndex::from_headers(&headers()).unwrap();
        let row = StringRecord::from(vec![
            "El Paso",
            "Texas",
            "2402",
            "US-Mexico Border",
            "Jan 2024",
            "Trucks",
            "-5",
            "31.764",
            "-106.451",
            "",
        ]);
        let err = CrossingRecord::parse_row(&row, &columns, 3).unwrap_err();
        assert!(matches!(err, RecordError::BadValue { row: 3, .. }));
    }

    #[test]
    fn test_parse_row_missing_state() {
        let columns = ColumnIndex::from_headers(&headers()).unwrap();
        let row = StringRecord::from(vec![
            "El Paso",
            " ",
            "2402",
            "US-Mexico Border",
            "Jan 2024",
            "Trucks",
            "100",
            "31.764",
            "-106.451",
            "",
        ]);
        let err = CrossingRecord::parse_row(&row, &columns, 4).unwrap_err();
        assert_eq!(
            err,
            RecordError::MissingField {
                row: 4,
                field: "state"
            }
        );
    }
}
