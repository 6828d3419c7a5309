//! Directory: in-memory contact and group tables with secondary indexes
//!
//! This module implements the persistence collaborator using:
//! - `BTreeMap` tables for ordered key storage
//! - `parking_lot::RwLock` for thread-safe access
//! - A group-membership secondary index (`GroupKey` → set of `ContactKey`)
//!   updated in the same write lock as the contact records
//!
//! Scans return at most `limit` keys plus an opaque continuation token; the
//! token is the last yielded key in disguise and resumption is strictly
//! after it, so chained scans over an unchanged table see every key exactly
//! once.

use std::collections::{BTreeMap, BTreeSet};

use parking_lot::RwLock;

use rolodex_core::{
    Contact, ContactFields, ContactKey, DirectoryRead, Error, Group, GroupFields, GroupKey,
    KeyPage, Result,
};

use crate::continuation;
use crate::search;

#[derive(Debug, Default)]
struct Inner {
    contacts: BTreeMap<ContactKey, Contact>,
    groups: BTreeMap<GroupKey, Group>,
    /// Secondary index: group → statically tagged contact keys
    members: BTreeMap<GroupKey, BTreeSet<ContactKey>>,
}

impl Inner {
    fn index_contact(&mut self, contact: &Contact) {
        for group in &contact.groups {
            self.members
                .entry(group.clone())
                .or_default()
                .insert(contact.key.clone());
        }
    }

    fn unindex_contact(&mut self, contact: &Contact) {
        for group in &contact.groups {
            if let Some(keys) = self.members.get_mut(group) {
                keys.remove(&contact.key);
                if keys.is_empty() {
                    self.members.remove(group);
                }
            }
        }
    }
}

/// In-memory contact/group directory
///
/// Thread-safe through `parking_lot::RwLock`; reads never block each other.
/// All scan and search entry points are read-only, so any number of
/// traversals can run concurrently against one directory.
#[derive(Debug, Default)]
pub struct Directory {
    inner: RwLock<Inner>,
}

impl Directory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Contact CRUD
    // ------------------------------------------------------------------

    /// Create a contact with a generated key
    pub fn create_contact(&self, fields: &ContactFields) -> Result<Contact> {
        let mut contact = Contact::new();
        fields.apply_to(&mut contact);
        let mut inner = self.inner.write();
        inner.index_contact(&contact);
        inner.contacts.insert(contact.key.clone(), contact.clone());
        Ok(contact)
    }

    /// Fetch a contact, `None` if it does not exist
    pub fn contact(&self, key: &ContactKey) -> Result<Option<Contact>> {
        Ok(self.inner.read().contacts.get(key).cloned())
    }

    /// Apply a partial update to an existing contact
    ///
    /// The membership index is re-synced when the update changes the
    /// contact's group tags.
    pub fn update_contact(&self, key: &ContactKey, fields: &ContactFields) -> Result<Contact> {
        let mut inner = self.inner.write();
        let Some(mut contact) = inner.contacts.get(key).cloned() else {
            return Err(Error::NotFound {
                entity: "contact",
                key: key.to_string(),
            });
        };
        inner.unindex_contact(&contact);
        fields.apply_to(&mut contact);
        inner.index_contact(&contact);
        inner.contacts.insert(key.clone(), contact.clone());
        Ok(contact)
    }

    /// Delete a contact, returning the removed record
    pub fn delete_contact(&self, key: &ContactKey) -> Result<Contact> {
        let mut inner = self.inner.write();
        let Some(contact) = inner.contacts.remove(key) else {
            return Err(Error::NotFound {
                entity: "contact",
                key: key.to_string(),
            });
        };
        inner.unindex_contact(&contact);
        Ok(contact)
    }

    // ------------------------------------------------------------------
    // Group CRUD
    // ------------------------------------------------------------------

    /// Create a group with a generated key
    ///
    /// A non-empty `query` makes the group smart.
    pub fn create_group(&self, name: String, query: Option<String>) -> Result<Group> {
        let group = Group {
            key: GroupKey::generate(),
            created_at: chrono::Utc::now(),
            name,
            query,
        };
        self.inner
            .write()
            .groups
            .insert(group.key.clone(), group.clone());
        Ok(group)
    }

    /// Fetch a group, `None` if it does not exist
    pub fn group(&self, key: &GroupKey) -> Result<Option<Group>> {
        Ok(self.inner.read().groups.get(key).cloned())
    }

    /// Apply a partial update to an existing group
    pub fn update_group(&self, key: &GroupKey, fields: &GroupFields) -> Result<Group> {
        let mut inner = self.inner.write();
        let Some(group) = inner.groups.get_mut(key) else {
            return Err(Error::NotFound {
                entity: "group",
                key: key.to_string(),
            });
        };
        if let Some(name) = &fields.name {
            group.name = name.clone();
        }
        // An explicit null clears the query; absent leaves it untouched.
        if let Some(query) = &fields.query {
            group.query = query.clone();
        }
        Ok(group.clone())
    }

    /// Delete a group, returning the removed record
    ///
    /// Contacts keep their static tag for the deleted group; membership of a
    /// nonexistent group simply reads back as the statically tagged set.
    pub fn delete_group(&self, key: &GroupKey) -> Result<Group> {
        let mut inner = self.inner.write();
        inner.groups.remove(key).ok_or(Error::NotFound {
            entity: "group",
            key: key.to_string(),
        })
    }

    // ------------------------------------------------------------------
    // Ordered scans
    // ------------------------------------------------------------------

    /// Scan all contact keys in key order
    pub fn contact_keys_page(
        &self,
        limit: usize,
        continuation: Option<&str>,
    ) -> Result<KeyPage<ContactKey>> {
        let after = continuation.map(continuation::decode).transpose()?;
        let inner = self.inner.read();
        Ok(collect_page(
            inner.contacts.keys(),
            after.as_deref(),
            limit,
            ContactKey::as_str,
        ))
    }

    /// Scan all group keys in key order
    pub fn group_keys_page(
        &self,
        limit: usize,
        continuation: Option<&str>,
    ) -> Result<KeyPage<GroupKey>> {
        let after = continuation.map(continuation::decode).transpose()?;
        let inner = self.inner.read();
        Ok(collect_page(
            inner.groups.keys(),
            after.as_deref(),
            limit,
            GroupKey::as_str,
        ))
    }
}

impl DirectoryRead for Directory {
    fn group_member_keys(
        &self,
        group: &GroupKey,
        limit: usize,
        continuation: Option<&str>,
    ) -> Result<KeyPage> {
        let after = continuation.map(continuation::decode).transpose()?;
        let inner = self.inner.read();
        let page = match inner.members.get(group) {
            Some(keys) => collect_page(keys.iter(), after.as_deref(), limit, ContactKey::as_str),
            None => KeyPage {
                keys: Vec::new(),
                continuation: None,
            },
        };
        Ok(page)
    }

    fn search_contact_keys(
        &self,
        query: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ContactKey>> {
        let inner = self.inner.read();
        search::search_keys(&inner.contacts, query, limit, offset)
    }

    fn get_group(&self, key: &GroupKey) -> Result<Option<Group>> {
        self.group(key)
    }

    fn get_contact(&self, key: &ContactKey) -> Result<Option<Contact>> {
        self.contact(key)
    }
}

/// Take one page of keys from an ordered iterator, resuming strictly after
/// `after`. Emits a continuation only when at least one more key follows the
/// page.
fn collect_page<'a, K, I>(
    keys: I,
    after: Option<&str>,
    limit: usize,
    as_str: fn(&K) -> &str,
) -> KeyPage<K>
where
    K: Clone + 'a,
    I: Iterator<Item = &'a K>,
{
    let mut remaining = keys.filter(|k| match after {
        Some(a) => as_str(k) > a,
        None => true,
    });
    let mut out: Vec<K> = Vec::new();
    while out.len() < limit {
        match remaining.next() {
            Some(k) => out.push(k.clone()),
            None => {
                return KeyPage {
                    keys: out,
                    continuation: None,
                }
            }
        }
    }
    let continuation = if remaining.next().is_some() {
        out.last().map(|k| continuation::encode(as_str(k)))
    } else {
        None
    };
    KeyPage {
        keys: out,
        continuation,
    }
}
