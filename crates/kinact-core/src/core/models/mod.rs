//! Data models shared by the loaders and the scoring engine.
//!
//! Sites are keyed by their string identifier (e.g. `P06239_S59`) everywhere; the
//! structured form in [`site`] is only needed where the protein, residue and position
//! have to be taken apart.

pub mod adjacency;
pub mod fold_change;
pub mod site;
pub mod table;
