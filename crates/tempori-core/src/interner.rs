//! Label interning.
//!
//! Graph files carry string labels; the index and the matcher only ever
//! compare integer handles (`Label`). A `Dictionary` maps strings to dense
//! handles in first-seen order and back again.
//!
//! Query and target graphs must be loaded through the same `LabelTable`,
//! otherwise equal strings would receive different handles.

use indexmap::IndexSet;

/// Interned label handle.
///
/// Handles are dense and ordered by first insertion, not lexicographically.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, serde::Serialize)]
#[serde(transparent)]
pub struct Label(u32);

impl Label {
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Create a label from a raw index. Use only for tests and hand-built graphs.
    #[inline]
    pub const fn from_raw(index: u32) -> Self {
        Self(index)
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bidirectional string ↔ `Label` dictionary.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    strings: IndexSet<String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a label, returning the existing handle if it was seen before.
    pub fn intern(&mut self, s: &str) -> Label {
        if let Some(index) = self.strings.get_index_of(s) {
            return Label(index as u32);
        }
        let (index, _) = self.strings.insert_full(s.to_owned());
        Label(index as u32)
    }

    /// Look up a label without inserting it.
    pub fn get(&self, s: &str) -> Option<Label> {
        self.strings.get_index_of(s).map(|i| Label(i as u32))
    }

    /// Resolve a handle back to its string.
    #[inline]
    pub fn try_resolve(&self, label: Label) -> Option<&str> {
        self.strings.get_index(label.0 as usize).map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Label, &str)> {
        self.strings
            .iter()
            .enumerate()
            .map(|(i, s)| (Label(i as u32), s.as_str()))
    }
}

/// Node and edge label dictionaries shared by every graph of one run.
///
/// Node and edge labels live in separate namespaces: a node labelled `A` and
/// an edge labelled `A` get unrelated handles.
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    pub nodes: Dictionary,
    pub edges: Dictionary,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node label string, or the raw handle if it is unknown to this table.
    pub fn node_name(&self, label: Label) -> String {
        match self.nodes.try_resolve(label) {
            Some(s) => s.to_owned(),
            None => label.to_string(),
        }
    }

    /// Edge label string, or the raw handle if it is unknown to this table.
    pub fn edge_name(&self, label: Label) -> String {
        match self.edges.try_resolve(label) {
            Some(s) => s.to_owned(),
            None => label.to_string(),
        }
    }
}
