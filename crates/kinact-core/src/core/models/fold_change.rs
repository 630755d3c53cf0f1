use std::collections::BTreeMap;
use std::collections::btree_map;

/// Log fold-changes of a single condition, keyed by phospho-site identifier.
///
/// Missing measurements are represented as `NaN` so that a column of a
/// [`SiteTable`](super::table::SiteTable) can be carried over unchanged; the scorers
/// refuse to run on a vector that still contains them, so call [`FoldChanges::dropna`]
/// first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoldChanges {
    values: BTreeMap<String, f64>,
}

impl FoldChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, site: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(site.into(), value)
    }

    #[inline]
    pub fn get(&self, site: &str) -> Option<f64> {
        self.values.get(site).copied()
    }

    #[inline]
    pub fn contains(&self, site: &str) -> bool {
        self.values.contains_key(site)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(site, &value)| (site.as_str(), value))
    }

    pub fn sites(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.values().copied()
    }

    /// Returns a copy without the sites whose value is `NaN`.
    pub fn dropna(&self) -> Self {
        self.values
            .iter()
            .filter(|(_, v)| !v.is_nan())
            .map(|(site, &v)| (site.clone(), v))
            .collect()
    }

    /// The first site (in identifier order) whose value is missing, if any.
    pub fn first_missing(&self) -> Option<&str> {
        self.values
            .iter()
            .find(|(_, v)| v.is_nan())
            .map(|(site, _)| site.as_str())
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for FoldChanges {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(s, v)| (s.into(), v)).collect(),
        }
    }
}

impl IntoIterator for FoldChanges {
    type Item = (String, f64);
    type IntoIter = btree_map::IntoIter<String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropna_removes_only_missing_values() {
        let fc: FoldChanges = [("A", 1.0), ("B", f64::NAN), ("C", -0.5)]
            .into_iter()
            .collect();
        assert_eq!(fc.first_missing(), Some("B"));

        let clean = fc.dropna();
        assert_eq!(clean.len(), 2);
        assert!(clean.contains("A"));
        assert!(!clean.contains("B"));
        assert_eq!(clean.get("C"), Some(-0.5));
        assert_eq!(clean.first_missing(), None);
    }

    #[test]
    fn iteration_is_ordered_by_site() {
        let fc: FoldChanges = [("b", 2.0), ("a", 1.0)].into_iter().collect();
        let sites: Vec<_> = fc.sites().collect();
        assert_eq!(sites, vec!["a", "b"]);
    }
}
