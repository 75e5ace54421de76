// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Case-insensitive prefix autocomplete over store display names.

/// Sorted store names with binary-search prefix lookup.
///
/// Names are sorted case-insensitively at construction, so lookups never depend
/// on the order the ingestion source happened to use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameIndex {
    names: Vec<String>,
}

impl NameIndex {
    /// Builds the index, sorting by case-folded name (stable for equal keys).
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort_by_cached_key(|name| name.to_lowercase());
        Self { names }
    }

    /// Names whose first `query.chars().count()` characters match `query`,
    /// ignoring case. Original casing and sort order are preserved.
    ///
    /// An empty query matches every name.
    pub fn search_prefix(&self, query: &str) -> Vec<&str> {
        let width = query.chars().count();
        let needle = query.to_lowercase();

        let start = self
            .names
            .partition_point(|name| folded_prefix(name, width) < needle);

        self.names[start..]
            .iter()
            .take_while(|name| folded_prefix(name, width) == needle)
            .map(String::as_str)
            .collect()
    }

    /// All names in index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the index holds no names.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn folded_prefix(name: &str, width: usize) -> String {
    name.chars().take(width).collect::<String>().to_lowercase()
}
