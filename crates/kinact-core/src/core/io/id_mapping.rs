use super::{LoadError, column_index, open_delimited, path_string, read_headers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Identifier systems present in the reduced UniProt mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdSystem {
    Uniprot,
    GeneName,
    StringId,
}

impl IdSystem {
    const ALL: [IdSystem; 3] = [IdSystem::Uniprot, IdSystem::GeneName, IdSystem::StringId];

    fn column(self) -> &'static str {
        match self {
            IdSystem::Uniprot => "uniprot",
            IdSystem::GeneName => "gene_name",
            IdSystem::StringId => "string_id",
        }
    }
}

impl fmt::Display for IdSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for IdSystem {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uniprot" => Ok(IdSystem::Uniprot),
            "gene_name" | "gene-name" => Ok(IdSystem::GeneName),
            "string_id" | "string-id" => Ok(IdSystem::StringId),
            other => Err(LoadError::InvalidRequest(format!(
                "unsupported identifier system '{}'; expected uniprot, gene_name or string_id",
                other
            ))),
        }
    }
}

/// A reduced UniProt ID mapping table (`uniprot,gene_name,string_id`).
#[derive(Debug, Clone, Default)]
pub struct IdMapping {
    rows: Vec<HashMap<IdSystem, String>>,
}

impl IdMapping {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let mut reader = open_delimited(path, b',')?;
        let headers = read_headers(&mut reader, path)?;
        let indices = IdSystem::ALL
            .iter()
            .map(|&system| Ok((system, column_index(&headers, system.column(), path)?)))
            .collect::<Result<Vec<_>, LoadError>>()?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| LoadError::Csv {
                path: path_string(path),
                source: e,
            })?;
            let row = indices
                .iter()
                .filter_map(|&(system, idx)| {
                    record
                        .get(idx)
                        .map(str::trim)
                        .filter(|v| !v.is_empty())
                        .map(|v| (system, v.to_string()))
                })
                .collect();
            rows.push(row);
        }
        Ok(Self { rows })
    }

    pub fn from_rows(rows: impl IntoIterator<Item = HashMap<IdSystem, String>>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
        }
    }

    /// Builds a lookup from `from` identifiers to `to` identifiers.
    ///
    /// Identifiers that match more than one row are ambiguous and left out.
    pub fn lookup(&self, from: IdSystem, to: IdSystem) -> Result<HashMap<String, String>, LoadError> {
        if from == to {
            return Err(LoadError::InvalidRequest(format!(
                "no conversion needed from {} to {}",
                from, to
            )));
        }

        let mut matches: HashMap<&str, Vec<&str>> = HashMap::new();
        for row in &self.rows {
            if let (Some(key), Some(value)) = (row.get(&from), row.get(&to)) {
                matches.entry(key.as_str()).or_default().push(value.as_str());
            }
        }
        Ok(matches
            .into_iter()
            .filter(|(_, values)| values.len() == 1)
            .map(|(key, values)| (key.to_string(), values[0].to_string()))
            .collect())
    }

    /// Converts each identifier; unknown or ambiguous identifiers become `None`.
    pub fn convert<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a str>,
        from: IdSystem,
        to: IdSystem,
    ) -> Result<Vec<Option<String>>, LoadError> {
        let lookup = self.lookup(from, to)?;
        Ok(ids.into_iter().map(|id| lookup.get(id).cloned()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_mapping() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("id_conversion.txt");
        fs::write(
            &path,
            "uniprot,gene_name,string_id\n\
             P06239,LCK,9606.ENSP00000337825\n\
             P43403,ZAP70,9606.ENSP00000264972\n\
             Q00000,DUP,\n\
             Q00000,DUP2,\n",
        )
        .unwrap();
        (dir, path)
    }

    #[test]
    fn converts_uniprot_to_gene_names() {
        let (_dir, path) = write_mapping();
        let mapping = IdMapping::load(&path).unwrap();

        let converted = mapping
            .convert(["P43403", "P06239", "X99999"], IdSystem::Uniprot, IdSystem::GeneName)
            .unwrap();
        assert_eq!(
            converted,
            vec![Some("ZAP70".to_string()), Some("LCK".to_string()), None]
        );
    }

    #[test]
    fn ambiguous_identifiers_map_to_none() {
        let (_dir, path) = write_mapping();
        let mapping = IdMapping::load(&path).unwrap();

        let converted = mapping
            .convert(["Q00000"], IdSystem::Uniprot, IdSystem::GeneName)
            .unwrap();
        assert_eq!(converted, vec![None]);
    }

    #[test]
    fn converting_to_the_same_system_is_rejected() {
        let mapping = IdMapping::default();
        assert!(matches!(
            mapping.lookup(IdSystem::GeneName, IdSystem::GeneName),
            Err(LoadError::InvalidRequest(_))
        ));
        assert!("ensembl".parse::<IdSystem>().is_err());
    }
}
