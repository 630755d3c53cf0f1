//! # Core Module
//!
//! Fundamental building blocks for kinase activity estimation.
//!
//! - **Data Representation** ([`models`]) - Phospho-site identifiers, fold-change vectors,
//!   site × condition tables and the kinase/substrate adjacency matrix
//! - **Statistics** ([`stats`]) - Summary statistics, normal and hypergeometric tests,
//!   multiple-testing correction
//! - **File I/O** ([`io`]) - Loaders for the example dataset, OmniPath PTM tables,
//!   identifier mapping tables and NetworKIN files

pub mod io;
pub mod models;
pub mod stats;
