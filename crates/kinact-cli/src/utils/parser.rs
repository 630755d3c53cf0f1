use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown {kind} '{name}'. Expected one of: {expected}.")]
    UnknownName {
        kind: ResourceKind,
        name: String,
        expected: String,
    },

    #[error("Unknown logical name kind: '{0}'. Expected 'ptms', 'id-mapping', 'sequences' or 'dataset'.")]
    UnknownKind(String),

    #[error("Logical name for {0} cannot be empty.")]
    Empty(ResourceKind),
}

/// The kinds of resource the data directory holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Ptms,
    IdMapping,
    Sequences,
    Dataset,
}

impl ResourceKind {
    pub fn from_kind(kind: &str) -> Result<Self, ParseError> {
        match kind {
            "ptms" => Ok(Self::Ptms),
            "id-mapping" => Ok(Self::IdMapping),
            "sequences" => Ok(Self::Sequences),
            "dataset" => Ok(Self::Dataset),
            other => Err(ParseError::UnknownKind(other.to_string())),
        }
    }

    /// Logical names accepted for this kind.
    fn names(self) -> &'static [&'static str] {
        match self {
            Self::Ptms => &["omnipath"],
            Self::IdMapping => &["uniprot"],
            Self::Sequences => &["uniprot"],
            Self::Dataset => &["de-graaf-2014"],
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ptms => "ptms",
            Self::IdMapping => "id-mapping",
            Self::Sequences => "sequences",
            Self::Dataset => "dataset",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedLogicalName {
    OmnipathPtms,
    UniprotIdMapping,
    UniprotSequences,
    ExampleDataset,
}

pub fn parse_logical_name(name: &str, kind: &str) -> Result<ParsedLogicalName, ParseError> {
    let kind = ResourceKind::from_kind(kind)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(ParseError::Empty(kind));
    }

    let parsed = match (kind, name.to_ascii_lowercase().as_str()) {
        (ResourceKind::Ptms, "omnipath") => ParsedLogicalName::OmnipathPtms,
        (ResourceKind::IdMapping, "uniprot") => ParsedLogicalName::UniprotIdMapping,
        (ResourceKind::Sequences, "uniprot") => ParsedLogicalName::UniprotSequences,
        (ResourceKind::Dataset, "de-graaf-2014") => ParsedLogicalName::ExampleDataset,
        _ => {
            return Err(ParseError::UnknownName {
                kind,
                name: name.to_string(),
                expected: kind.names().join(", "),
            });
        }
    };
    Ok(parsed)
}
