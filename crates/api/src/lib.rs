//! Caller-facing collections over the rolodex directory
//!
//! This crate is the boundary an HTTP layer would call. It provides three
//! collections, each constructed on demand from a shared [`Rolodex`]:
//!
//! - [`ContactsCollection`]: contact CRUD plus plain paged/streamed listing
//! - [`GroupsCollection`]: group CRUD plus plain paged/streamed listing
//! - [`GroupContactsCollection`]: the two-phase group-membership engine
//!
//! The plain listings are the single-source subset of the engine pattern:
//! same cursor codec, same query-filter rejection, no phase machinery.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contacts;
pub mod group_contacts;
pub mod groups;

pub use contacts::ContactsCollection;
pub use group_contacts::GroupContactsCollection;
pub use groups::GroupsCollection;

use std::sync::Arc;

use rolodex_core::{Error, Limits};
use rolodex_store::Directory;

/// An embedded rolodex instance
///
/// Owns the in-memory directory and the configured limits. Collections are
/// cheap stateless handles; create them per call or hold them, either works.
#[derive(Debug, Clone)]
pub struct Rolodex {
    directory: Arc<Directory>,
    limits: Limits,
}

impl Rolodex {
    /// Create an empty rolodex with default limits
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    /// Create an empty rolodex with explicit limits
    pub fn with_limits(limits: Limits) -> Self {
        Rolodex {
            directory: Arc::new(Directory::new()),
            limits,
        }
    }

    /// The underlying directory
    pub fn directory(&self) -> &Arc<Directory> {
        &self.directory
    }

    /// Contact CRUD and plain listing
    pub fn contacts(&self) -> ContactsCollection {
        ContactsCollection::new(self.directory.clone(), self.limits.clone())
    }

    /// Group CRUD and plain listing
    pub fn groups(&self) -> GroupsCollection {
        GroupsCollection::new(self.directory.clone(), self.limits.clone())
    }

    /// Group-membership pagination and streaming
    pub fn group_contacts(&self) -> GroupContactsCollection {
        GroupContactsCollection::new(self.directory.clone(), self.limits.clone())
    }
}

impl Default for Rolodex {
    fn default() -> Self {
        Self::new()
    }
}

/// Re-classify a store-rejected continuation as the caller's fault
///
/// A plain listing's cursor wraps a store-native continuation; the store
/// refusing it means the cursor was corrupted or fabricated, which is a
/// usage error, not a backend failure.
pub(crate) fn usage_for_continuation(err: Error) -> Error {
    match err {
        Error::InvalidContinuation(token) => Error::usage(format!(
            "stale or malformed continuation in cursor: {token:?}"
        )),
        other => other,
    }
}
