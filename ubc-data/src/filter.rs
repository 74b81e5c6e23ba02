use crate::models::FilterOptions;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use ubc_bts::dataset::Dataset;
use ubc_bts::record::CrossingRecord;

/// A filter request: which states and measures to keep, over which
/// inclusive month interval.
///
/// Criteria are expected to be built from values the dataset actually
/// contains (see [`filter_options`]), but unknown states or measures
/// are not an error; they simply match zero records. Likewise a
/// `start` after `end` matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub states: BTreeSet<String>,
    pub measures: BTreeSet<String>,
    /// First month to keep (inclusive)
    pub start: NaiveDate,
    /// Last month to keep (inclusive)
    pub end: NaiveDate,
}

impl FilterCriteria {
    /// Criteria selecting every record: all states, all measures, the
    /// full observed date range. Mirrors the dashboard's "Select All"
    /// defaults.
    pub fn select_all(dataset: &Dataset) -> Self {
        let (start, end) = dataset
            .date_range()
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        FilterCriteria {
            states: dataset.states().into_iter().collect(),
            measures: dataset.measures().into_iter().collect(),
            start,
            end,
        }
    }

    /// True if a record satisfies all three predicates.
    pub fn matches(&self, record: &CrossingRecord) -> bool {
        self.states.contains(&record.state)
            && self.measures.contains(&record.measure)
            && record.date >= self.start
            && record.date <= self.end
    }
}

/// The subsequence of the dataset satisfying some filter criteria.
/// Borrowed from the dataset, recomputed per request, never mutated.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    records: Vec<&'a CrossingRecord>,
}

impl<'a> FilteredView<'a> {
    /// Kept records, in dataset order.
    pub fn records(&self) -> &[&'a CrossingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Keep every record whose state and measure are selected and whose
/// month lies within the criteria interval. An empty result is valid
/// and flows through every downstream aggregate as zero/empty.
pub fn apply_filter<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> FilteredView<'a> {
    let records: Vec<&CrossingRecord> = dataset
        .records()
        .iter()
        .filter(|record| criteria.matches(record))
        .collect();
    log::debug!(
        "filter kept {} of {} records",
        records.len(),
        dataset.len()
    );
    FilteredView { records }
}

/// The filter choices this dataset supports, for populating selection
/// widgets.
pub fn filter_options(dataset: &Dataset) -> FilterOptions {
    let range = dataset.date_range();
    FilterOptions {
        states: dataset.states(),
        measures: dataset.measures(),
        earliest: range.map(|(min, _)| min),
        latest: range.map(|(_, max)| max),
    }
}
