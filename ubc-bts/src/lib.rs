//! Core types and CSV parsing for the BTS "Border Crossing Entry Data"
//! dataset published on data.gov.

pub mod dataset;
pub mod month;
pub mod record;
