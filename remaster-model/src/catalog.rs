/// Slug of a catalog, the classification marker a selection can be
/// restricted to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CatalogSlug(String);

impl CatalogSlug {
    /// Normalizes to a lowercase trimmed slug. Returns `None` when the input
    /// is empty after trimming.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let slug = raw.as_ref().trim().to_ascii_lowercase();
        if slug.is_empty() {
            None
        } else {
            Some(CatalogSlug(slug))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CatalogSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
