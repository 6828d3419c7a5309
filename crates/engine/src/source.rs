//! Page sources: bounded batch reads from the two membership sources
//!
//! `IndexPageSource` wraps the store's secondary-index scan for one group;
//! `QueryPageSource` wraps the offset-based search primitive. Both return
//! plain key batches; dereferencing to records happens after the batch is
//! fixed, so source order survives into the output.

use rolodex_core::{ContactKey, DirectoryRead, Error, GroupKey, KeyPage, Result};

/// Bounded batches of statically tagged member keys for one group
#[derive(Debug, Clone)]
pub struct IndexPageSource<D> {
    directory: D,
    group: GroupKey,
}

impl<D: DirectoryRead> IndexPageSource<D> {
    /// Create a source over one group's index range
    pub fn new(directory: D, group: GroupKey) -> Self {
        Self { directory, group }
    }

    /// Fetch the next batch of keys
    ///
    /// A `None` continuation starts a fresh scan. The store rejecting the
    /// continuation token is the caller's fault (a cursor from some other
    /// traversal, or corrupted in transit) and is reported as a usage error
    /// carrying the token, never as a backend failure.
    pub fn fetch(&self, continuation: Option<&str>, limit: usize) -> Result<KeyPage> {
        match self.directory.group_member_keys(&self.group, limit, continuation) {
            Err(Error::InvalidContinuation(token)) => {
                tracing::warn!(group = %self.group, token, "store rejected scan continuation");
                Err(Error::usage(format!(
                    "stale or malformed continuation in cursor: {token:?}"
                )))
            }
            other => other,
        }
    }
}

/// Bounded batches of search matches at increasing offsets
#[derive(Debug, Clone)]
pub struct QueryPageSource<D> {
    directory: D,
}

impl<D: DirectoryRead> QueryPageSource<D> {
    /// Create a source over the directory's search primitive
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Fetch up to `limit` matches starting at `offset`
    ///
    /// The resume offset for a continuing traversal is always
    /// `offset + returned.len()`.
    pub fn fetch(&self, query: &str, offset: usize, limit: usize) -> Result<Vec<ContactKey>> {
        self.directory.search_contact_keys(query, limit, offset)
    }
}
