//! Collaborator trait for the read side of the directory
//!
//! The pagination and streaming engines never talk to a concrete store; they
//! are generic over `DirectoryRead` so the backend can be swapped (or wrapped
//! with instrumentation in tests) without touching the traversal logic.

use crate::error::Result;
use crate::types::{Contact, ContactKey, Group, GroupKey, KeyPage};

/// Read-only view of the contact/group directory
///
/// All methods are read-only and safe to call concurrently from any number
/// of traversals; continuation tokens and offsets are per-traversal values
/// with no shared state behind this trait.
pub trait DirectoryRead: Send + Sync {
    /// Scan the static-membership secondary index for one group
    ///
    /// Returns at most `limit` contact keys in index order. A `None`
    /// continuation starts from the beginning of the group's index range;
    /// the returned continuation resumes the scan with no duplicate or
    /// missing keys (for a membership set that does not mutate). Fails with
    /// `Error::InvalidContinuation` for a token the store does not recognize.
    fn group_member_keys(
        &self,
        group: &GroupKey,
        limit: usize,
        continuation: Option<&str>,
    ) -> Result<KeyPage>;

    /// Run a structured search over contacts with offset pagination
    ///
    /// Returns up to `limit` matching keys starting at `offset`, in a stable
    /// order for an unchanged contact set.
    fn search_contact_keys(
        &self,
        query: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ContactKey>>;

    /// Fetch a group record, `None` if it does not exist
    fn get_group(&self, key: &GroupKey) -> Result<Option<Group>>;

    /// Fetch a contact record, `None` if it does not exist
    fn get_contact(&self, key: &ContactKey) -> Result<Option<Contact>>;
}

impl<D: DirectoryRead + ?Sized> DirectoryRead for std::sync::Arc<D> {
    fn group_member_keys(
        &self,
        group: &GroupKey,
        limit: usize,
        continuation: Option<&str>,
    ) -> Result<KeyPage> {
        (**self).group_member_keys(group, limit, continuation)
    }

    fn search_contact_keys(
        &self,
        query: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ContactKey>> {
        (**self).search_contact_keys(query, limit, offset)
    }

    fn get_group(&self, key: &GroupKey) -> Result<Option<Group>> {
        (**self).get_group(key)
    }

    fn get_contact(&self, key: &ContactKey) -> Result<Option<Contact>> {
        (**self).get_contact(key)
    }
}
