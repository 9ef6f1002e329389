use std::fmt::{Display, Formatter};

/// Simple enum for the item kinds the library manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ItemKind {
    /// Standalone feature entry
    Movie,
    /// Episodic series entry
    Series,
}

impl ItemKind {
    /// Kinds a selection falls back to when the caller names none.
    pub const DEFAULT_PAIR: [ItemKind; 2] = [ItemKind::Movie, ItemKind::Series];

    pub fn as_slug(&self) -> &'static str {
        match self {
            ItemKind::Movie => "movie",
            ItemKind::Series => "series",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug.trim().to_ascii_lowercase().as_str() {
            "movie" => Some(ItemKind::Movie),
            "series" => Some(ItemKind::Series),
            _ => None,
        }
    }

    /// Parse a comma-separated kind list, dropping unknown slugs.
    pub fn parse_list(raw: &str) -> Vec<ItemKind> {
        let mut kinds = Vec::new();
        for slug in raw.split(',') {
            if let Some(kind) = Self::from_slug(slug) {
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
            }
        }
        kinds
    }

    /// Parse a comma-separated kind list, falling back to the default pair
    /// when the input is empty or filters down to nothing.
    pub fn parse_list_or_default(raw: &str) -> Vec<ItemKind> {
        let kinds = Self::parse_list(raw);
        if kinds.is_empty() {
            Self::DEFAULT_PAIR.to_vec()
        } else {
            kinds
        }
    }
}

impl Display for ItemKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_slug())
    }
}

/// Publication state of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ItemStatus {
    Published,
    Draft,
    Archived,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Published => "published",
            ItemStatus::Draft => "draft",
            ItemStatus::Archived => "archived",
        }
    }
}

impl Display for ItemStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_drops_unknown_slugs() {
        assert_eq!(
            ItemKind::parse_list("movie, widget ,series"),
            vec![ItemKind::Movie, ItemKind::Series]
        );
        assert_eq!(ItemKind::parse_list("widget,gadget"), vec![]);
    }

    #[test]
    fn test_parse_list_dedupes() {
        assert_eq!(
            ItemKind::parse_list("movie,movie,MOVIE"),
            vec![ItemKind::Movie]
        );
    }

    #[test]
    fn test_default_pair_fallback() {
        assert_eq!(
            ItemKind::parse_list_or_default(""),
            ItemKind::DEFAULT_PAIR.to_vec()
        );
        assert_eq!(
            ItemKind::parse_list_or_default("widget"),
            ItemKind::DEFAULT_PAIR.to_vec()
        );
        assert_eq!(
            ItemKind::parse_list_or_default("series"),
            vec![ItemKind::Series]
        );
    }
}
