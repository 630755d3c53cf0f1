//! Kinase-substrate interactions from the OmniPath post-translational modification table.

use super::id_mapping::{IdMapping, IdSystem};
use super::{LoadError, column_index, open_delimited, path_string, read_headers};
use crate::core::models::adjacency::AdjacencyMatrix;
use phf::phf_set;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Databases integrated into OmniPath that kinase-substrate edges can be drawn from.
pub static KNOWN_SOURCES: phf::Set<&'static str> = phf_set! {
    "ARN", "CA1", "dbPTM", "DEPOD", "HPRD", "MIMP", "Macrophage", "NRF2ome",
    "phosphoELM", "PhosphoSite", "SPIKE", "SignaLink3", "Signor", "TRIP",
};

pub const DEFAULT_SOURCES: [&str; 2] = ["PhosphoSite", "Signor"];

/// Which source databases an interaction must be reported by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionSources {
    /// Keep every interaction regardless of its source.
    All,
    /// Keep interactions reported by at least one of the listed databases.
    Only(Vec<String>),
}

impl Default for InteractionSources {
    fn default() -> Self {
        InteractionSources::Only(DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect())
    }
}

impl InteractionSources {
    /// Parses a list of database names; the single entry `all` selects every source.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, LoadError> {
        if names.len() == 1 && names[0].as_ref().eq_ignore_ascii_case("all") {
            return Ok(InteractionSources::All);
        }
        let sources = Self::Only(names.iter().map(|s| s.as_ref().to_string()).collect());
        sources.validate()?;
        Ok(sources)
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        if let InteractionSources::Only(names) = self {
            if let Some(unknown) = names.iter().find(|n| !KNOWN_SOURCES.contains(n.as_str())) {
                return Err(LoadError::UnknownSource(unknown.clone()));
            }
        }
        Ok(())
    }

    fn accepts(&self, databases: &str) -> bool {
        match self {
            InteractionSources::All => true,
            InteractionSources::Only(names) => databases
                .split(';')
                .map(str::trim)
                .any(|db| names.iter().any(|n| n == db)),
        }
    }
}

/// Options for turning the PTM table into an adjacency matrix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PtmFilter {
    pub sources: InteractionSources,
    /// NCBI taxonomy id; requires an `Organism` column in the table.
    pub organism: Option<u32>,
}

/// Loads kinase-substrate edges from an OmniPath PTM export (tab-separated).
///
/// Only phosphorylation and dephosphorylation events are kept. Sites are named
/// `<UniProt_B>_<Residue_letter><Residue_number>`; kinases keep their UniProt accession
/// unless an identifier mapping is supplied, in which case accessions with a unique
/// gene name are renamed. Dephosphorylation edges get weight −1; an edge reported
/// several times gets the mean of its weights, so contradicting reports cancel out.
pub fn load_omnipath_ptms(
    path: &Path,
    filter: &PtmFilter,
    id_mapping: Option<&IdMapping>,
) -> Result<AdjacencyMatrix, LoadError> {
    filter.sources.validate()?;
    info!("Loading kinase-substrate interactions from {:?}", path);

    let mut reader = open_delimited(path, b'\t')?;
    let headers = read_headers(&mut reader, path)?;
    let enzyme_idx = column_index(&headers, "UniProt_A", path)?;
    let substrate_idx = column_index(&headers, "UniProt_B", path)?;
    let letter_idx = column_index(&headers, "Residue_letter", path)?;
    let number_idx = column_index(&headers, "Residue_number", path)?;
    let type_idx = column_index(&headers, "PTM_type", path)?;
    let db_idx = column_index(&headers, "Databases", path)?;
    let organism_idx = match filter.organism {
        Some(_) => Some(column_index(&headers, "Organism", path)?),
        None => None,
    };

    let mut edges: HashMap<(String, String), (f64, usize)> = HashMap::new();
    let mut rows_kept = 0usize;

    for result in reader.records() {
        let record = result.map_err(|e| LoadError::Csv {
            path: path_string(path),
            source: e,
        })?;
        let field = |idx: usize| record.get(idx).unwrap_or_default().trim();

        let ptm_type = field(type_idx);
        if !ptm_type.contains("phosphorylation") {
            continue;
        }
        if !filter.sources.accepts(field(db_idx)) {
            continue;
        }
        if let (Some(taxon), Some(idx)) = (filter.organism, organism_idx) {
            if field(idx).parse::<u32>().ok() != Some(taxon) {
                continue;
            }
        }

        let (enzyme, substrate, letter) = (field(enzyme_idx), field(substrate_idx), field(letter_idx));
        if enzyme.is_empty() || substrate.is_empty() || letter.is_empty() {
            continue;
        }
        let site = format!(
            "{}_{}{}",
            substrate,
            letter,
            normalize_residue_number(field(number_idx))
        );
        let weight = if ptm_type.starts_with("de") { -1.0 } else { 1.0 };

        let entry = edges.entry((enzyme.to_string(), site)).or_insert((0.0, 0));
        entry.0 += weight;
        entry.1 += 1;
        rows_kept += 1;
    }

    let mut matrix = AdjacencyMatrix::new();
    for ((kinase, site), (sum, count)) in edges {
        matrix.insert(kinase, site, sum / count as f64);
    }

    if let Some(mapping) = id_mapping {
        let lookup = mapping.lookup(IdSystem::Uniprot, IdSystem::GeneName)?;
        matrix = matrix.rename_kinases(|k| lookup.get(k).cloned());
    }

    debug!(
        rows_kept,
        kinases = matrix.num_kinases(),
        interactions = matrix.num_interactions(),
        "PTM table converted to adjacency matrix."
    );
    Ok(matrix)
}

fn normalize_residue_number(raw: &str) -> String {
    match raw.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && v >= 0.0 => format!("{}", v as u64),
        _ => raw.to_string(),
    }
}
