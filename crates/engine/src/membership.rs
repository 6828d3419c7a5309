//! Membership resolver: is this group smart, and what is its query?
//!
//! Resolution happens once per cursor decode (one snapshot per step), and is
//! deliberately not cached across pages: a smart group's query may be edited
//! mid-traversal and later pages follow the edit. A group that does not
//! exist resolves to plain (non-smart) membership, which in combination with
//! an empty index range degrades the whole listing to an empty result.

use rolodex_core::{DirectoryRead, GroupKey, Result};

/// How a group's dynamic membership is defined, if at all
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    /// The stored query of a smart group, `None` for plain groups
    pub query: Option<String>,
}

impl Membership {
    /// Whether the group has a dynamic source to drain
    pub fn is_smart(&self) -> bool {
        self.query.is_some()
    }
}

/// Resolves a group key to its membership definition
#[derive(Debug, Clone)]
pub struct MembershipResolver<D> {
    directory: D,
}

impl<D: DirectoryRead> MembershipResolver<D> {
    /// Create a resolver over the directory
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Resolve one group; nonexistent groups resolve as plain
    pub fn resolve(&self, group: &GroupKey) -> Result<Membership> {
        let query = match self.directory.get_group(group)? {
            Some(group) if group.is_smart() => group.query,
            _ => None,
        };
        Ok(Membership { query })
    }
}
