//! Contact collection: CRUD plus plain paged/streamed listing

use std::sync::Arc;

use rolodex_core::{Contact, ContactFields, ContactKey, Cursor, Error, Limits, Result};
use rolodex_engine::{reject_query_filter, spawn_fill, Dereferencer, RecordStream};
use rolodex_store::Directory;

use crate::usage_for_continuation;

/// Contacts of one directory
#[derive(Debug, Clone)]
pub struct ContactsCollection {
    directory: Arc<Directory>,
    limits: Limits,
}

impl ContactsCollection {
    /// Create a collection handle
    pub fn new(directory: Arc<Directory>, limits: Limits) -> Self {
        Self { directory, limits }
    }

    /// Fetch one contact
    pub fn get(&self, contact_id: &str) -> Result<Contact> {
        let key = ContactKey::new(contact_id);
        self.directory.contact(&key)?.ok_or(Error::NotFound {
            entity: "contact",
            key: contact_id.to_string(),
        })
    }

    /// Create a contact from a JSON payload
    ///
    /// The key is always generated; unknown fields are a usage error naming
    /// the field.
    pub fn create(&self, data: serde_json::Value) -> Result<Contact> {
        let fields = parse_fields(data)?;
        self.directory.create_contact(&fields)
    }

    /// Partially update a contact from a JSON payload
    pub fn update(&self, contact_id: &str, data: serde_json::Value) -> Result<Contact> {
        let fields = parse_fields(data)?;
        self.directory
            .update_contact(&ContactKey::new(contact_id), &fields)
    }

    /// Delete a contact, returning the removed record
    pub fn delete(&self, contact_id: &str) -> Result<Contact> {
        self.directory.delete_contact(&ContactKey::new(contact_id))
    }

    /// Fetch one page of all contacts in key order
    ///
    /// Cursors for this listing are always in the static phase; a cursor
    /// from a group-membership traversal is rejected as a usage error.
    pub fn page(
        &self,
        cursor: Option<&str>,
        max_results: Option<usize>,
        query: Option<&str>,
    ) -> Result<(Option<String>, Vec<Contact>)> {
        reject_query_filter(query)?;
        let limit = Limits::clamp_page(max_results, self.limits.max_contacts_per_page);
        let continuation = listing_continuation(cursor)?;

        let page = self
            .directory
            .contact_keys_page(limit, continuation.as_deref())
            .map_err(usage_for_continuation)?;
        let records =
            Dereferencer::new(self.directory.clone()).resolve_batch(&page.keys)?;

        let next = match page.continuation {
            Some(continuation) => Some(
                Cursor::Static {
                    continuation: Some(continuation),
                }
                .encode()?,
            ),
            None => None,
        };
        Ok((next, records))
    }

    /// Stream all contacts in key order through a bounded channel
    pub fn stream(&self, query: Option<&str>) -> Result<RecordStream<Contact>> {
        reject_query_filter(query)?;
        let limit = self.limits.max_contacts_per_page;
        let capacity = limit + self.limits.stream_backlog;

        let directory = self.directory.clone();
        Ok(spawn_fill(
            capacity,
            None::<String>,
            move |continuation: Option<String>| {
                let directory = directory.clone();
                tokio::task::spawn_blocking(move || {
                    let page = directory.contact_keys_page(limit, continuation.as_deref())?;
                    let records =
                        Dereferencer::new(directory.clone()).resolve_batch(&page.keys)?;
                    Ok((records, page.continuation.map(Some)))
                })
            },
        ))
    }
}

/// Decode a plain-listing cursor down to its store continuation
pub(crate) fn listing_continuation(cursor: Option<&str>) -> Result<Option<String>> {
    match Cursor::decode(cursor)? {
        Cursor::Static { continuation } => Ok(continuation),
        Cursor::Dynamic { .. } => Err(Error::usage(
            "cursor does not belong to this listing".to_string(),
        )),
    }
}

fn parse_fields(data: serde_json::Value) -> Result<ContactFields> {
    serde_json::from_value(data)
        .map_err(|e| Error::usage(format!("invalid contact fields: {e}")))
}
