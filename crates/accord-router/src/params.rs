//! Captured path segments.

use smallvec::SmallVec;

/// Templates rarely carry more than a handful of placeholders, so the first
/// few captures live inline.
const INLINE_CAPTURES: usize = 4;

/// Placeholder values captured while matching a request path.
///
/// Each value is the raw segment text. Percent-escapes are left in place
/// for the endpoint's path decoder to resolve.
///
/// ```rust
/// use accord_router::Params;
///
/// let mut params = Params::new();
/// params.push("orderId", "o-7");
/// params.push("line", "3");
///
/// assert_eq!(params.get("line"), Some("3"));
/// assert_eq!(params.get("sku"), None);
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    captures: SmallVec<[(String, String); INLINE_CAPTURES]>,
}

impl Params {
    /// An empty capture list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `raw` as the value of the placeholder `name`.
    pub fn push(&mut self, name: impl Into<String>, raw: impl Into<String>) {
        self.captures.push((name.into(), raw.into()));
    }

    /// Raw text captured for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.captures
            .iter()
            .find_map(|(key, raw)| (key == name).then_some(raw.as_str()))
    }

    /// Whether nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }

    /// Number of captures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.captures.len()
    }

    /// Captures as `(name, raw)` in the order they occur in the path.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.captures
            .iter()
            .map(|(key, raw)| (key.as_str(), raw.as_str()))
    }

    /// Forgets captures recorded after position `len`; the matcher rewinds
    /// with this when backtracking out of a placeholder branch.
    pub fn truncate(&mut self, len: usize) {
        self.captures.truncate(len);
    }
}

impl FromIterator<(String, String)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            captures: iter.into_iter().collect(),
        }
    }
}
