//! Loader for the bundled example dataset.
//!
//! The dataset is the Jurkat T-cell phosphoproteomics time course of de Graaf et al.
//! (Molecular & Cellular Proteomics, 2014): intensities after 0–60 minutes of
//! stimulation plus the p-values of each time point against the unstimulated control.

use super::{
    LoadError, column_index, open_delimited, parse_optional_f64, path_string, read_headers,
    record_line,
};
use crate::core::models::table::{SiteTable, TableError};
use std::path::Path;
use tracing::{debug, info, warn};

const PROTEINS_COLUMN: &str = "Proteins";
const AMINO_ACID_COLUMN: &str = "Amino acid";
const POSITION_COLUMN: &str = "Positions within proteins";
const AVERAGE_PREFIX: &str = "Average";
const P_VALUE_PREFIX: &str = "p value";
const CONTROL_CONDITION: &str = "0min";

/// Fold-changes against the unstimulated control, and their −log10 p-values.
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleDataset {
    pub fold_changes: SiteTable,
    pub p_values: SiteTable,
}

struct ValueColumn {
    index: usize,
    header: String,
}

/// Reads the example dataset CSV.
///
/// Rows whose protein group lists several accessions are ambiguous and dropped. Sites are
/// named `<protein>_<residue><position>`. The `Average …` intensity columns are named by
/// their last word (e.g. `5min`) and turned into fold-changes against `0min`, which is
/// then dropped. The `p value …vs0min` columns are named by their time point.
pub fn load_example_dataset(path: &Path) -> Result<ExampleDataset, LoadError> {
    info!("Loading example dataset from {:?}", path);
    let mut reader = open_delimited(path, b',')?;
    let headers = read_headers(&mut reader, path)?;

    let proteins_idx = column_index(&headers, PROTEINS_COLUMN, path)?;
    let residue_idx = column_index(&headers, AMINO_ACID_COLUMN, path)?;
    let position_idx = column_index(&headers, POSITION_COLUMN, path)?;

    let averages: Vec<ValueColumn> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| h.starts_with(AVERAGE_PREFIX))
        .map(|(index, h)| ValueColumn {
            index,
            header: average_condition_name(h),
        })
        .collect();
    let p_columns: Vec<ValueColumn> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| h.starts_with(P_VALUE_PREFIX) && h.ends_with("vs0min"))
        .map(|(index, h)| ValueColumn {
            index,
            header: p_value_condition_name(h),
        })
        .collect();

    if averages.is_empty() {
        return Err(LoadError::MissingColumn {
            path: path_string(path),
            column: format!("{} …", AVERAGE_PREFIX),
        });
    }

    let mut intensities = SiteTable::new(averages.iter().map(|c| c.header.clone()).collect());
    let mut p_values = SiteTable::new(p_columns.iter().map(|c| c.header.clone()).collect());
    let mut skipped_ambiguous = 0usize;

    for result in reader.records() {
        let record = result.map_err(|e| LoadError::Csv {
            path: path_string(path),
            source: e,
        })?;
        let line = record_line(&record);

        let proteins = record.get(proteins_idx).unwrap_or_default().trim();
        if proteins.contains(';') {
            skipped_ambiguous += 1;
            continue;
        }
        let site = format!(
            "{}_{}{}",
            proteins,
            record.get(residue_idx).unwrap_or_default().trim(),
            record.get(position_idx).unwrap_or_default().trim()
        );

        let read_columns = |columns: &[ValueColumn]| -> Result<Vec<Option<f64>>, LoadError> {
            columns
                .iter()
                .map(|c| {
                    parse_optional_f64(record.get(c.index).unwrap_or_default(), path, line, &c.header)
                })
                .collect()
        };
        let intensity_row = read_columns(&averages)?;
        let p_row = read_columns(&p_columns)?;

        match intensities.insert_row(site.clone(), intensity_row) {
            Ok(()) => {}
            Err(TableError::DuplicateSite(site)) => {
                warn!("Duplicate site '{}' on line {}; keeping the first occurrence.", site, line);
                continue;
            }
            Err(e) => {
                return Err(LoadError::Table {
                    path: path_string(path),
                    source: e,
                });
            }
        }
        p_values
            .insert_row(site, p_row)
            .map_err(|e| LoadError::Table {
                path: path_string(path),
                source: e,
            })?;
    }

    debug!(
        skipped_ambiguous,
        sites = intensities.num_sites(),
        "Example dataset rows read."
    );

    let fold_changes = intensities
        .relative_to(CONTROL_CONDITION)
        .map_err(|e| LoadError::Table {
            path: path_string(path),
            source: e,
        })?;

    Ok(ExampleDataset {
        fold_changes,
        p_values,
    })
}

fn average_condition_name(header: &str) -> String {
    header
        .split_whitespace()
        .last()
        .unwrap_or(header)
        .to_string()
}

fn p_value_condition_name(header: &str) -> String {
    let field = header.rsplit('_').next().unwrap_or(header);
    let time_point = field.split("vs").next().unwrap_or(field).trim();
    if time_point.ends_with("min") {
        time_point.to_string()
    } else {
        format!("{}min", time_point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SAMPLE: &str = "\
Proteins,Amino acid,Positions within proteins,Average 0min,Average 5min,Average 10min,p value_5vs0min,p value_10vs0min
P06239,S,59,10.0,11.5,9.0,2.5,0.3
P06239;P07947,Y,394,8.0,8.0,8.0,0.1,0.1
P43403,Y,319,5.0,,7.0,\"0.8\",1.9
";

    #[test]
    fn loads_fold_changes_and_p_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("example.csv");
        fs::write(&path, SAMPLE).unwrap();

        let data = load_example_dataset(&path).unwrap();

        assert_eq!(
            data.fold_changes.conditions(),
            &["5min".to_string(), "10min".to_string()]
        );
        assert_eq!(data.fold_changes.num_sites(), 2);
        assert_eq!(data.fold_changes.value("P06239_S59", "5min").unwrap(), Some(1.5));
        assert_eq!(data.fold_changes.value("P06239_S59", "10min").unwrap(), Some(-1.0));
        assert_eq!(data.fold_changes.value("P43403_Y319", "5min").unwrap(), None);

        assert_eq!(
            data.p_values.conditions(),
            &["5min".to_string(), "10min".to_string()]
        );
        assert_eq!(data.p_values.value("P43403_Y319", "10min").unwrap(), Some(1.9));
    }

    #[test]
    fn ambiguous_protein_groups_are_dropped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("example.csv");
        fs::write(&path, SAMPLE).unwrap();

        let data = load_example_dataset(&path).unwrap();
        assert!(data.fold_changes.sites().all(|s| !s.contains(';')));
    }

    #[test]
    fn missing_identifier_column_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "Proteins,Average 0min\nP1,1.0\n").unwrap();

        assert!(matches!(
            load_example_dataset(&path),
            Err(LoadError::MissingColumn { ref column, .. }) if column == AMINO_ACID_COLUMN
        ));
    }

    #[test]
    fn condition_names_are_normalized() {
        assert_eq!(average_condition_name("Average Jurkat 15min"), "15min");
        assert_eq!(p_value_condition_name("p value_15vs0min"), "15min");
        assert_eq!(p_value_condition_name("p value_15minvs0min"), "15min");
    }
}
