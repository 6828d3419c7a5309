//! Dereferencer: contact keys to full records
//!
//! A key can outlive its record when a contact is deleted between key
//! enumeration and dereference. Group membership is advisory under
//! concurrent mutation anyway, so a missing record is skipped rather than
//! aborting the page; the skip is logged as a soft anomaly.

use rolodex_core::{Contact, ContactKey, DirectoryRead, Result};

/// Maps contact keys to records, preserving input order
#[derive(Debug, Clone)]
pub struct Dereferencer<D> {
    directory: D,
}

impl<D: DirectoryRead> Dereferencer<D> {
    /// Create a dereferencer over the directory
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Resolve a batch of keys, silently omitting vanished contacts
    pub fn resolve_batch(&self, keys: &[ContactKey]) -> Result<Vec<Contact>> {
        let mut records = Vec::with_capacity(keys.len());
        for key in keys {
            match self.directory.get_contact(key)? {
                Some(contact) => records.push(contact),
                None => {
                    tracing::debug!(%key, "contact vanished between key scan and dereference");
                }
            }
        }
        Ok(records)
    }
}
