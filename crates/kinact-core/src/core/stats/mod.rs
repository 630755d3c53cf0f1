//! Statistical building blocks for the KSEA scorers.
//!
//! - [`summary`] - Mean, median and population standard deviation
//! - [`distributions`] - Normal z-tests and the hypergeometric point probability
//! - [`fdr`] - Benjamini/Hochberg multiple-testing correction

pub mod distributions;
pub mod fdr;
pub mod summary;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error("Invalid distribution parameters: {0}")]
    InvalidParameters(String),
}
