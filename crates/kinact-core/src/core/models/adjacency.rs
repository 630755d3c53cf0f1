use std::collections::{BTreeMap, BTreeSet};

/// Kinase → substrate relationships, equivalent to a sparse sites × kinases matrix.
///
/// Curated interactions carry a weight of `1.0`, dephosphorylation edges (phosphatases)
/// `-1.0`, and predicted interactions their prediction score. A weight of zero means
/// "no interaction" and is never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacencyMatrix {
    kinases: BTreeMap<String, BTreeMap<String, f64>>,
}

impl AdjacencyMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a matrix of unit-weight edges from kinase → substrate sets.
    pub fn from_substrate_sets<K, S, I>(sets: impl IntoIterator<Item = (K, I)>) -> Self
    where
        K: Into<String>,
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        let mut matrix = Self::new();
        for (kinase, sites) in sets {
            let kinase = kinase.into();
            for site in sites {
                matrix.insert(kinase.clone(), site, 1.0);
            }
        }
        matrix
    }

    /// Sets the weight of a kinase → site edge. Zero and `NaN` weights remove the edge.
    pub fn insert(&mut self, kinase: impl Into<String>, site: impl Into<String>, weight: f64) {
        let kinase = kinase.into();
        let site = site.into();
        if weight == 0.0 || weight.is_nan() {
            self.remove(&kinase, &site);
            return;
        }
        self.kinases.entry(kinase).or_default().insert(site, weight);
    }

    pub fn remove(&mut self, kinase: &str, site: &str) -> Option<f64> {
        let substrates = self.kinases.get_mut(kinase)?;
        let removed = substrates.remove(site);
        if substrates.is_empty() {
            self.kinases.remove(kinase);
        }
        removed
    }

    pub fn weight(&self, kinase: &str, site: &str) -> Option<f64> {
        self.kinases.get(kinase)?.get(site).copied()
    }

    pub fn kinases(&self) -> impl Iterator<Item = &str> {
        self.kinases.keys().map(String::as_str)
    }

    pub fn substrates(&self, kinase: &str) -> Option<&BTreeMap<String, f64>> {
        self.kinases.get(kinase)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, f64>)> {
        self.kinases.iter().map(|(k, s)| (k.as_str(), s))
    }

    /// Every site that is a substrate of at least one kinase.
    pub fn sites(&self) -> BTreeSet<&str> {
        self.kinases
            .values()
            .flat_map(|s| s.keys().map(String::as_str))
            .collect()
    }

    /// All kinases acting on `site`, with their edge weight.
    pub fn kinases_of<'a>(&'a self, site: &'a str) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        self.kinases
            .iter()
            .filter_map(move |(k, s)| s.get(site).map(|&w| (k.as_str(), w)))
    }

    pub fn num_kinases(&self) -> usize {
        self.kinases.len()
    }

    pub fn num_interactions(&self) -> usize {
        self.kinases.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.kinases.is_empty()
    }

    /// Renames kinases through `rename`; kinases it returns `None` for keep their name.
    ///
    /// If two kinases collapse onto the same name their substrate sets are merged, and
    /// for a shared site the weight seen first (in the original name order) is kept.
    pub fn rename_kinases(self, mut rename: impl FnMut(&str) -> Option<String>) -> Self {
        let mut renamed: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for (kinase, substrates) in self.kinases {
            let name = rename(&kinase).unwrap_or(kinase);
            let entry = renamed.entry(name).or_default();
            for (site, weight) in substrates {
                entry.entry(site).or_insert(weight);
            }
        }
        Self { kinases: renamed }
    }

    /// Copies the edges of `curated` onto this matrix, restricted to sites both matrices
    /// already share. Curated edges override existing weights with their sign.
    pub fn overlay(&mut self, curated: &AdjacencyMatrix) {
        let own_sites: BTreeSet<String> = self.sites().into_iter().map(String::from).collect();
        for (kinase, substrates) in curated.iter() {
            for (site, &weight) in substrates {
                if own_sites.contains(site) {
                    self.insert(kinase, site.clone(), weight.signum());
                }
            }
        }
    }
}
