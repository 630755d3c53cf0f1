//! # kinact Core Library
//!
//! Kinase activity estimation from phosphoproteomics data, based on the kinase-substrate
//! enrichment analysis (KSEA) described by Casado et al. (Science Signaling, 2013).
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`FoldChanges`, `SiteTable`,
//!   `AdjacencyMatrix`), statistical building blocks (`stats`), and loaders for the
//!   tabular resources KSEA consumes (`io`).
//!
//! - **[`engine`]: The Logic Core.** Scoring configuration, error types, progress reporting,
//!   and the KSEA scorers themselves (mean/median, regulated-site mean, delta count,
//!   weighted mean).
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together to score every
//!   condition of a fold-change table in one call.

pub mod core;
pub mod engine;
pub mod workflows;
