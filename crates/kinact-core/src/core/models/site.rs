use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SiteIdError {
    #[error("Site identifier '{0}' is missing the '_' separator between protein and residue")]
    MissingSeparator(String),
    #[error("Site identifier '{0}' has an empty protein accession")]
    EmptyProtein(String),
    #[error("Site identifier '{0}' has no residue letter")]
    MissingResidue(String),
    #[error("Site identifier '{0}' has an invalid residue position")]
    InvalidPosition(String),
}

/// A phosphorylation site on a protein, written as `<protein>_<residue><position>`.
///
/// The protein part may itself contain underscores (e.g. isoform suffixes); the
/// residue is always taken from the last `_`-separated field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteId {
    pub protein: String,
    pub residue: char,
    pub position: u32,
}

impl SiteId {
    pub fn new(protein: impl Into<String>, residue: char, position: u32) -> Self {
        Self {
            protein: protein.into(),
            residue,
            position,
        }
    }
}

impl FromStr for SiteId {
    type Err = SiteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (protein, site) = s
            .rsplit_once('_')
            .ok_or_else(|| SiteIdError::MissingSeparator(s.to_string()))?;
        if protein.is_empty() {
            return Err(SiteIdError::EmptyProtein(s.to_string()));
        }

        let mut chars = site.chars();
        let residue = chars
            .next()
            .filter(|c| c.is_ascii_alphabetic())
            .ok_or_else(|| SiteIdError::MissingResidue(s.to_string()))?;
        let position = chars
            .as_str()
            .parse::<u32>()
            .map_err(|_| SiteIdError::InvalidPosition(s.to_string()))?;

        Ok(Self::new(protein, residue, position))
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}{}", self.protein, self.residue, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_site_identifier() {
        let site: SiteId = "P06239_S59".parse().unwrap();
        assert_eq!(site, SiteId::new("P06239", 'S', 59));
        assert_eq!(site.to_string(), "P06239_S59");
    }

    #[test]
    fn protein_part_may_contain_underscores() {
        let site: SiteId = "Q9Y2X3_2_T15".parse().unwrap();
        assert_eq!(site.protein, "Q9Y2X3_2");
        assert_eq!(site.residue, 'T');
        assert_eq!(site.position, 15);
    }

    #[test]
    fn rejects_malformed_identifiers() {
        assert_eq!(
            "P06239S59".parse::<SiteId>(),
            Err(SiteIdError::MissingSeparator("P06239S59".to_string()))
        );
        assert_eq!(
            "_S59".parse::<SiteId>(),
            Err(SiteIdError::EmptyProtein("_S59".to_string()))
        );
        assert_eq!(
            "P06239_59".parse::<SiteId>(),
            Err(SiteIdError::MissingResidue("P06239_59".to_string()))
        );
        assert_eq!(
            "P06239_Sx".parse::<SiteId>(),
            Err(SiteIdError::InvalidPosition("P06239_Sx".to_string()))
        );
    }
}
