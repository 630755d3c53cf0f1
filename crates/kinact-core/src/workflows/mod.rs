//! # Workflows Module
//!
//! High-level entry points that run a complete analysis over an experiment, built on
//! the single-condition scorers in [`crate::engine::tasks`].
//!
//! - **Scoring Workflow** ([`score`]) - scores every condition column of a fold-change
//!   table against a kinase-substrate network, reporting progress per condition.

pub mod score;
