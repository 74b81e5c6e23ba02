use chrono::{Months, NaiveDate};
use std::mem::replace;

/// Date format used by the BTS border crossing CSV: "Jan 2024"
pub const MONTH_FORMAT: &str = "%b %Y";

/// Parse a BTS month label such as "Jan 2024" into the first day of
/// that month.
pub fn parse_month_label(s: &str) -> anyhow::Result<NaiveDate> {
    let padded = format!("01 {}", s.trim());
    NaiveDate::parse_from_str(&padded, "%d %b %Y")
        .map_err(|e| anyhow::anyhow!("invalid month label {:?}: {}", s, e))
}

/// Format a month-granularity date back into the BTS label form.
pub fn format_month_label(date: &NaiveDate) -> String {
    date.format(MONTH_FORMAT).to_string()
}

/// A month range iterator that yields the first day of each month from
/// the start month through the end month (inclusive).
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct MonthRange(pub NaiveDate, pub NaiveDate);

impl Iterator for MonthRange {
    type Item = NaiveDate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 <= self.1 {
            let next = self.0 + Months::new(1);
            Some(replace(&mut self.0, next))
        } else {
            None
        }
    }
}
