//! Filtering and aggregation pipeline for border crossing records.
//!
//! This crate turns the raw dataset into the derived outputs a
//! dashboard consumes: summary metrics, per-port map points, top-N
//! ports, and a monthly time series. Every function here is a pure,
//! deterministic function of (dataset, filter criteria); an empty
//! filtered view flows through each aggregate as zeros and empty lists
//! rather than an error.
//!
//! Grouping is done with explicit key-to-running-sum accumulator
//! passes, so the pipeline has no dependency on a tabular-data layer.

pub mod aggregate;
pub mod filter;
pub mod models;
