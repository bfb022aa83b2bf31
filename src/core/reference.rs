use std::sync::Arc;

/// Reference-index → display-name table taken from the alignment header.
///
/// The table is built once and never mutated. Cloning is cheap and every clone
/// shares the same names, so the record source, the engine and the reporter can
/// each hold one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTable {
    names: Arc<[String]>,
}

impl ReferenceTable {
    #[must_use]
    pub fn new(names: Vec<String>) -> Self {
        Self {
            names: names.into(),
        }
    }

    /// Number of reference sequences declared, i.e. the number of graph vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Display name for a reference id, if it is in range.
    #[must_use]
    pub fn name(&self, reference_id: usize) -> Option<&str> {
        self.names.get(reference_id).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names.iter().map(String::as_str).enumerate()
    }
}

impl<S: Into<String>> FromIterator<S> for ReferenceTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
