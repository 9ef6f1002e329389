use std::str::FromStr;

use crate::error::ModelError;

/// Strongly typed identifier for content items.
///
/// Item ids are positive integers assigned by the content store; zero is the
/// nil value and never refers to a real item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub u64);

impl ItemId {
    /// The nil id; treated as "no item" everywhere.
    pub const NIL: ItemId = ItemId(0);

    pub fn new(raw: u64) -> Self {
        ItemId(raw)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    pub fn is_nil(&self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for ItemId {
    fn from(raw: u64) -> Self {
        ItemId(raw)
    }
}

impl FromStr for ItemId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<u64>()
            .map(ItemId)
            .map_err(|_| ModelError::InvalidId(trimmed.to_string()))
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nil_id() {
        assert!(ItemId::NIL.is_nil());
        assert!(ItemId::new(0).is_nil());
        assert!(!ItemId::new(42).is_nil());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(" 17 ".parse::<ItemId>().unwrap(), ItemId::new(17));
        assert!("abc".parse::<ItemId>().is_err());
        assert!("-3".parse::<ItemId>().is_err());
    }
}
