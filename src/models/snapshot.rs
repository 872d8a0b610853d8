use super::asset::Asset;
use std::collections::HashSet;

/// Mints observed by the previous non-empty aggregation pass.
///
/// Owned by the polling loop and handed to each pass so that newly observed
/// assets can be flagged without hidden global state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MintSnapshot {
    mints: HashSet<String>,
}

impl MintSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_assets(assets: &[Asset]) -> Self {
        Self {
            mints: assets.iter().map(|a| a.mint.clone()).collect(),
        }
    }

    pub fn contains(&self, mint: &str) -> bool {
        self.mints.contains(mint)
    }

    /// An asset is a flash when a previous snapshot exists and lacks it
    pub fn is_flash(&self, mint: &str) -> bool {
        !self.mints.is_empty() && !self.mints.contains(mint)
    }

    pub fn len(&self) -> usize {
        self.mints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mints.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for MintSnapshot {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            mints: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_flags_nothing() {
        let snapshot = MintSnapshot::new();
        assert!(!snapshot.is_flash("anything"));
    }

    #[test]
    fn test_flash_detection() {
        let snapshot: MintSnapshot = ["a", "b"].into_iter().collect();
        assert!(!snapshot.is_flash("a"));
        assert!(snapshot.is_flash("c"));
        assert_eq!(snapshot.len(), 2);
    }
}
