//! # Engine Module
//!
//! Scoring engine for kinase activity estimation.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Scoring method, statistic, minimum substrate set size
//!   and population parameters
//! - **Population** ([`population`]) - Validated mean/standard deviation of the full dataset
//! - **Results** ([`result`]) - Per-kinase scores with raw and adjusted p-values
//! - **Progress Monitoring** ([`progress`]) - Progress reporting hooks for front-ends
//! - **Error Handling** ([`error`]) - Engine-specific error types
//! - **Scorers** ([`tasks`]) - The KSEA variants themselves
//!
//! Kinases are scored independently of each other; with the `parallel` feature the
//! scorers fan out over kinases with rayon.

pub mod config;
pub mod error;
pub mod population;
pub mod progress;
pub mod result;
pub mod tasks;
