//! Group collection: CRUD plus plain paged/streamed listing

use std::sync::Arc;

use rolodex_core::{Cursor, Error, Group, GroupFields, GroupKey, Limits, Result};
use rolodex_engine::{reject_query_filter, spawn_fill, RecordStream};
use rolodex_store::{validate_query, Directory};

use crate::contacts::listing_continuation;
use crate::usage_for_continuation;

/// Groups of one directory
#[derive(Debug, Clone)]
pub struct GroupsCollection {
    directory: Arc<Directory>,
    limits: Limits,
}

impl GroupsCollection {
    /// Create a collection handle
    pub fn new(directory: Arc<Directory>, limits: Limits) -> Self {
        Self { directory, limits }
    }

    /// Fetch one group
    pub fn get(&self, group_id: &str) -> Result<Group> {
        let key = GroupKey::new(group_id);
        self.directory.group(&key)?.ok_or(Error::NotFound {
            entity: "group",
            key: group_id.to_string(),
        })
    }

    /// Create a group from a JSON payload
    ///
    /// The name is required; a non-empty `query` creates a smart group. The
    /// query is vetted against the search grammar here, so a stored query
    /// never fails during later membership traversal.
    pub fn create(&self, data: serde_json::Value) -> Result<Group> {
        let fields = parse_fields(data)?;
        vet_query(&fields)?;
        let Some(name) = fields.name else {
            return Err(Error::usage(
                "the group name must be specified in group creation",
            ));
        };
        self.directory.create_group(name, fields.query.flatten())
    }

    /// Partially update a group from a JSON payload
    ///
    /// An explicit `"query": null` clears the stored query, turning a smart
    /// group back into a plain one; leaving `query` out keeps it.
    pub fn update(&self, group_id: &str, data: serde_json::Value) -> Result<Group> {
        let fields = parse_fields(data)?;
        vet_query(&fields)?;
        self.directory.update_group(&GroupKey::new(group_id), &fields)
    }

    /// Delete a group, returning the removed record
    ///
    /// Contacts keep their static tags for the deleted group.
    pub fn delete(&self, group_id: &str) -> Result<Group> {
        self.directory.delete_group(&GroupKey::new(group_id))
    }

    /// Fetch one page of all groups in key order
    pub fn page(
        &self,
        cursor: Option<&str>,
        max_results: Option<usize>,
        query: Option<&str>,
    ) -> Result<(Option<String>, Vec<Group>)> {
        reject_query_filter(query)?;
        let limit = Limits::clamp_page(max_results, self.limits.max_groups_per_page);
        let continuation = listing_continuation(cursor)?;

        let page = self
            .directory
            .group_keys_page(limit, continuation.as_deref())
            .map_err(usage_for_continuation)?;
        let mut records = Vec::with_capacity(page.keys.len());
        for key in &page.keys {
            if let Some(group) = self.directory.group(key)? {
                records.push(group);
            }
        }

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

    /// Stream all groups in key order through a bounded channel
    pub fn stream(&self, query: Option<&str>) -> Result<RecordStream<Group>> {
        reject_query_filter(query)?;
        let limit = self.limits.max_groups_per_page;
        let capacity = limit + self.limits.stream_backlog;

        let directory = self.directory.clone();
        Ok(spawn_fill(
            capacity,
            None::<String>,
            move |continuation: Option<String>| {
                let directory = directory.clone();
                tokio::task::spawn_blocking(move || {
                    let page = directory.group_keys_page(limit, continuation.as_deref())?;
                    let mut records = Vec::with_capacity(page.keys.len());
                    for key in &page.keys {
                        if let Some(group) = directory.group(key)? {
                            records.push(group);
                        }
                    }
                    Ok((records, page.continuation.map(Some)))
                })
            },
        ))
    }
}

fn parse_fields(data: serde_json::Value) -> Result<GroupFields> {
    serde_json::from_value(data).map_err(|e| Error::usage(format!("invalid group fields: {e}")))
}

/// Reject a caller-supplied query the search layer would not accept
///
/// Empty strings pass: they are a legacy way of saying "no query" and never
/// reach the search layer because such a group is not smart.
fn vet_query(fields: &GroupFields) -> Result<()> {
    if let Some(Some(query)) = &fields.query {
        if !query.is_empty() {
            validate_query(query).map_err(|e| Error::usage(format!("invalid group query: {e}")))?;
        }
    }
    Ok(())
}
