use std::collections::HashSet;

/// Uids found to be the target of at least one resolved reference.
///
/// Add-only. Filled while discovering, then consulted to decide which
/// rendered blocks get an anchor suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoverySet {
    uids: HashSet<String>,
}

impl DiscoverySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `uid`; returns `true` if it was not already present.
    pub fn insert(&mut self, uid: &str) -> bool {
        if self.uids.contains(uid) {
            return false;
        }
        self.uids.insert(uid.to_string())
    }

    pub fn contains(&self, uid: &str) -> bool {
        self.uids.contains(uid)
    }

    pub fn len(&self) -> usize {
        self.uids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent() {
        let mut set = DiscoverySet::new();
        assert!(set.insert("abcdefghi"));
        assert!(!set.insert("abcdefghi"));
        assert_eq!(set.len(), 1);
        assert!(set.contains("abcdefghi"));
        assert!(!set.contains("zzzzzzzzz"));
    }
}
