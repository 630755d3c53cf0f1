//! Interface to NetworKIN kinase predictions.
//!
//! NetworKIN predicts upstream kinases for sites that curated databases do not cover.
//! [`prepare_files`] writes the inputs NetworKIN expects for a list of sites, and
//! [`load_predictions`] turns a NetworKIN 3.0 result file back into an adjacency matrix
//! weighted by the prediction score, scaled to the best prediction along a
//! [`NormalizationAxis`].

use super::{LoadError, column_index, open_delimited, path_string, read_headers, record_line};
use crate::core::models::adjacency::AdjacencyMatrix;
use crate::core::models::site::SiteId;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const SITE_FILE_NAME: &str = "site_file.txt";
pub const FASTA_FILE_NAME: &str = "fasta_file.txt";

const NAME_COLUMN: &str = "#Name";
const POSITION_COLUMN: &str = "Position";
const TREE_COLUMN: &str = "Tree";
const ENZYME_COLUMN: &str = "Kinase/Phosphatase/Phospho-binding domain description";
const SCORE_COLUMN: &str = "NetworKIN score";

/// Which maximum a prediction score is divided by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizationAxis {
    /// The best score among all enzymes predicted for the same site.
    #[default]
    Site,
    /// The best score among all sites predicted for the same enzyme.
    Kinase,
}

/// Protein sequences keyed by UniProt accession.
pub type SequenceMap = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedFiles {
    pub site_file: PathBuf,
    pub fasta_file: PathBuf,
    /// Proteins whose sequence was unknown and therefore left out of the FASTA file.
    pub missing_sequences: Vec<String>,
}

/// Reads a UniProt sequence export: tab-separated with a header, accession in the first
/// column and the sequence in the fourth.
pub fn load_sequences(path: &Path) -> Result<SequenceMap, LoadError> {
    let mut reader = open_delimited(path, b'\t')?;
    let mut sequences = SequenceMap::new();
    for result in reader.records() {
        let record = result.map_err(|e| LoadError::Csv {
            path: path_string(path),
            source: e,
        })?;
        match (record.get(0), record.get(3)) {
            (Some(id), Some(seq)) if !id.trim().is_empty() => {
                sequences.insert(id.trim().to_string(), seq.trim().to_string());
            }
            _ => {
                return Err(LoadError::InvalidValue {
                    path: path_string(path),
                    line: record_line(&record),
                    column: "sequence".to_string(),
                    value: record.iter().collect::<Vec<_>>().join("\t"),
                });
            }
        }
    }
    Ok(sequences)
}

/// Writes the NetworKIN site file and FASTA file for `sites` into `output_dir`.
///
/// The site file lists `protein\tposition\tresidue` per site. Each protein's sequence is
/// written to the FASTA file once; proteins without a known sequence are reported back.
pub fn prepare_files<'a>(
    sites: impl IntoIterator<Item = &'a str>,
    sequences: &SequenceMap,
    output_dir: &Path,
) -> Result<PreparedFiles, LoadError> {
    fs::create_dir_all(output_dir).map_err(|e| LoadError::Io {
        path: path_string(output_dir),
        source: e,
    })?;
    let site_path = output_dir.join(SITE_FILE_NAME);
    let fasta_path = output_dir.join(FASTA_FILE_NAME);

    let io_err = |path: &Path| {
        let path = path_string(path);
        move |e: std::io::Error| LoadError::Io {
            path: path.clone(),
            source: e,
        }
    };

    let mut site_file =
        BufWriter::new(File::create(&site_path).map_err(io_err(&site_path))?);
    let mut fasta_file =
        BufWriter::new(File::create(&fasta_path).map_err(io_err(&fasta_path))?);

    let mut seen_proteins = HashSet::new();
    let mut missing_sequences = Vec::new();

    for raw in sites {
        let site: SiteId = raw.parse().map_err(|e| LoadError::Site {
            path: path_string(&site_path),
            source: e,
        })?;
        writeln!(site_file, "{}\t{}\t{}", site.protein, site.position, site.residue)
            .map_err(io_err(&site_path))?;

        if !seen_proteins.insert(site.protein.clone()) {
            continue;
        }
        match sequences.get(&site.protein) {
            Some(sequence) => {
                writeln!(fasta_file, ">{}\n{}", site.protein, sequence)
                    .map_err(io_err(&fasta_path))?;
            }
            None => missing_sequences.push(site.protein),
        }
    }

    site_file.flush().map_err(io_err(&site_path))?;
    fasta_file.flush().map_err(io_err(&fasta_path))?;

    if !missing_sequences.is_empty() {
        warn!(
            count = missing_sequences.len(),
            "Some proteins have no known sequence and were left out of the FASTA file."
        );
    }
    info!("Files for NetworKIN analysis saved in {:?}", output_dir);

    Ok(PreparedFiles {
        site_file: site_path,
        fasta_file: fasta_path,
        missing_sequences,
    })
}

/// Reads a NetworKIN 3.0 result file into an adjacency matrix of prediction scores.
///
/// Only kinase (`KIN`) and phosphatase (`PTP`) predictions are kept. Repeated predictions
/// for the same pair are averaged, and each score is divided by the largest score along
/// `axis` (taken over all kept predictions). Predictions whose raw score is not strictly
/// above `score_cut_off` are then dropped, and phosphatase weights are negated.
pub fn load_predictions(
    path: &Path,
    score_cut_off: f64,
    axis: NormalizationAxis,
) -> Result<AdjacencyMatrix, LoadError> {
    info!("Loading NetworKIN predictions from {:?}", path);
    let mut reader = open_delimited(path, b'\t')?;
    let headers = read_headers(&mut reader, path)?;
    let name_idx = column_index(&headers, NAME_COLUMN, path)?;
    let position_idx = column_index(&headers, POSITION_COLUMN, path)?;
    let tree_idx = column_index(&headers, TREE_COLUMN, path)?;
    let enzyme_idx = column_index(&headers, ENZYME_COLUMN, path)?;
    let score_idx = column_index(&headers, SCORE_COLUMN, path)?;

    let mut scores: HashMap<(String, String), (f64, usize)> = HashMap::new();
    let mut phosphatases = HashSet::new();

    for result in reader.records() {
        let record = result.map_err(|e| LoadError::Csv {
            path: path_string(path),
            source: e,
        })?;
        let field = |idx: usize| record.get(idx).unwrap_or_default().trim();

        let tree = field(tree_idx);
        if tree != "KIN" && tree != "PTP" {
            continue;
        }
        let enzyme = field(enzyme_idx).to_string();
        if tree == "PTP" {
            phosphatases.insert(enzyme.clone());
        }

        let raw_score = field(score_idx);
        let score: f64 = raw_score.parse().map_err(|_| LoadError::InvalidValue {
            path: path_string(path),
            line: record_line(&record),
            column: SCORE_COLUMN.to_string(),
            value: raw_score.to_string(),
        })?;

        let site = format!("{}_{}", field(name_idx), field(position_idx));
        let entry = scores.entry((enzyme, site)).or_insert((0.0, 0));
        entry.0 += score;
        entry.1 += 1;
    }

    let averaged: Vec<(String, String, f64)> = scores
        .into_iter()
        .map(|((enzyme, site), (sum, count))| (enzyme, site, sum / count as f64))
        .collect();

    let axis_key = |enzyme: &str, site: &str| match axis {
        NormalizationAxis::Site => site.to_string(),
        NormalizationAxis::Kinase => enzyme.to_string(),
    };
    let mut maxima: HashMap<String, f64> = HashMap::new();
    for (enzyme, site, score) in &averaged {
        let best = maxima.entry(axis_key(enzyme, site)).or_insert(f64::NEG_INFINITY);
        *best = best.max(*score);
    }

    let mut matrix = AdjacencyMatrix::new();
    for (enzyme, site, score) in averaged {
        if score <= score_cut_off {
            continue;
        }
        let max = maxima
            .get(&axis_key(&enzyme, &site))
            .copied()
            .unwrap_or(score);
        if max <= 0.0 {
            continue;
        }
        let normalized = score / max;
        let weight = if phosphatases.contains(&enzyme) {
            -normalized
        } else {
            normalized
        };
        matrix.insert(enzyme, site, weight);
    }

    debug!(
        kinases = matrix.num_kinases(),
        interactions = matrix.num_interactions(),
        phosphatases = phosphatases.len(),
        ?axis,
        "NetworKIN predictions loaded."
    );
    Ok(matrix)
}

/// Combines predictions with curated interactions.
///
/// Prediction scores are kept. Every curated edge on a site the predictions also cover is
/// added with weight ±1, overriding the prediction for that pair.
pub fn merge_curated(mut predictions: AdjacencyMatrix, curated: &AdjacencyMatrix) -> AdjacencyMatrix {
    predictions.overlay(curated);
    predictions
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const RESULTS: &str = "\
#Name\tPosition\tTree\tKinase/Phosphatase/Phospho-binding domain description\tNetworKIN score
P43403\tY319\tKIN\tLCK\t3.5
P43403\tY319\tPTP\tPTPN6\t2.0
P43403\tY493\tKIN\tLCK\t0.8
P43403\tY493\tSH2\tGRB2\t9.0
P06239\tY394\tKIN\tFYN\t1.2
";

    #[test]
    fn predictions_are_filtered_signed_and_scaled_per_site() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("networkin.tsv");
        fs::write(&path, RESULTS).unwrap();

        let matrix = load_predictions(&path, 1.0, NormalizationAxis::Site).unwrap();
        assert_eq!(matrix.weight("LCK", "P43403_Y319"), Some(1.0));
        assert_eq!(matrix.weight("PTPN6", "P43403_Y319"), Some(-2.0 / 3.5));
        assert_eq!(matrix.weight("LCK", "P43403_Y493"), None);
        assert_eq!(matrix.weight("GRB2", "P43403_Y493"), None);
        assert_eq!(matrix.weight("FYN", "P06239_Y394"), Some(1.0));
    }

    #[test]
    fn predictions_can_be_scaled_per_kinase() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("networkin.tsv");
        fs::write(&path, RESULTS).unwrap();

        let matrix = load_predictions(&path, 0.0, NormalizationAxis::Kinase).unwrap();
        assert_eq!(matrix.weight("LCK", "P43403_Y319"), Some(1.0));
        assert_eq!(matrix.weight("LCK", "P43403_Y493"), Some(0.8 / 3.5));
        assert_eq!(matrix.weight("PTPN6", "P43403_Y319"), Some(-1.0));
    }

    #[test]
    fn merge_keeps_scaled_scores_and_overlays_curated_edges() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("networkin.tsv");
        fs::write(
            &path,
            "#Name\tPosition\tTree\tKinase/Phosphatase/Phospho-binding domain description\tNetworKIN score\n\
             P43403\tY319\tKIN\tLCK\t3.5\n\
             P43403\tY319\tKIN\tFYN\t7.0\n",
        )
        .unwrap();
        let predictions = load_predictions(&path, 0.0, NormalizationAxis::default()).unwrap();

        let mut curated = AdjacencyMatrix::new();
        curated.insert("ZAP70", "P43403_Y319", 1.0);
        curated.insert("PTPN6", "P43403_Y319", -1.0);
        curated.insert("FYN", "P43403_Y319", 1.0);
        curated.insert("ZAP70", "P00000_S1", 1.0);

        let merged = merge_curated(predictions, &curated);
        assert_eq!(merged.weight("LCK", "P43403_Y319"), Some(0.5));
        assert_eq!(merged.weight("FYN", "P43403_Y319"), Some(1.0));
        assert_eq!(merged.weight("ZAP70", "P43403_Y319"), Some(1.0));
        assert_eq!(merged.weight("PTPN6", "P43403_Y319"), Some(-1.0));
        assert_eq!(merged.weight("ZAP70", "P00000_S1"), None);
    }

    #[test]
    fn prepare_files_writes_sites_and_unique_sequences() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("networkin_files");
        let mut sequences = SequenceMap::new();
        sequences.insert("P06239".to_string(), "MGCGCSSHPE".to_string());

        let prepared = prepare_files(
            ["P06239_S59", "P06239_Y394", "P43403_Y319"],
            &sequences,
            &out,
        )
        .unwrap();

        let site_file = fs::read_to_string(&prepared.site_file).unwrap();
        assert_eq!(site_file, "P06239\t59\tS\nP06239\t394\tY\nP43403\t319\tY\n");

        let fasta = fs::read_to_string(&prepared.fasta_file).unwrap();
        assert_eq!(fasta, ">P06239\nMGCGCSSHPE\n");
        assert_eq!(prepared.missing_sequences, vec!["P43403".to_string()]);
    }

    #[test]
    fn prepare_files_rejects_malformed_sites() {
        let dir = tempdir().unwrap();
        let result = prepare_files(["not-a-site"], &SequenceMap::new(), dir.path());
        assert!(matches!(result, Err(LoadError::Site { .. })));
    }

    #[test]
    fn sequences_are_read_from_the_fourth_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sequences.tab");
        fs::write(
            &path,
            "Entry\tEntry name\tLength\tSequence\nP06239\tLCK_HUMAN\t10\tMGCGCSSHPE\n",
        )
        .unwrap();

        let sequences = load_sequences(&path).unwrap();
        assert_eq!(sequences.get("P06239").map(String::as_str), Some("MGCGCSSHPE"));
    }
}
