//! Record types for contacts and groups
//!
//! This module defines:
//! - ContactKey / GroupKey: opaque string key newtypes
//! - Contact / Group: the stored records
//! - ContactFields / GroupFields: partial-update payloads for create/update
//! - KeyPage: one bounded batch of keys from an ordered scan

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Opaque key identifying a contact
///
/// Generated keys are UUID v4 in simple (hyphenless hex) form, but any
/// non-empty string loaded from elsewhere is a valid key. Ordering is the
/// plain byte ordering of the string; index scans and continuation tokens
/// rely on it being total and stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactKey(String);

impl ContactKey {
    /// Wrap an existing key string
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Generate a fresh random key
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Borrow the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque key identifying a group
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    /// Wrap an existing key string
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Generate a fresh random key
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Borrow the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored contact record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Unique key of this contact
    pub key: ContactKey,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// First name
    pub name: Option<String>,
    /// Surname
    pub surname: Option<String>,
    /// Mobile number
    pub msisdn: Option<String>,
    /// Email address
    pub email_address: Option<String>,
    /// Twitter handle
    pub twitter_handle: Option<String>,
    /// Facebook identifier
    pub facebook_id: Option<String>,
    /// BBM pin
    pub bbm_pin: Option<String>,
    /// Mxit identifier
    pub mxit_id: Option<String>,
    /// WeChat identifier
    pub wechat_id: Option<String>,
    /// Google Talk identifier
    pub gtalk_id: Option<String>,
    /// Date of birth
    pub dob: Option<String>,
    /// Groups this contact is statically tagged with
    pub groups: Vec<GroupKey>,
    /// Free-form extra fields
    pub extra: BTreeMap<String, String>,
    /// Subscription state per campaign
    pub subscription: BTreeMap<String, String>,
}

impl Contact {
    /// Field names accepted by [`Contact::search_field`]
    pub const SEARCH_FIELDS: &'static [&'static str] = &[
        "key",
        "name",
        "surname",
        "msisdn",
        "email_address",
        "twitter_handle",
        "facebook_id",
        "bbm_pin",
        "mxit_id",
        "wechat_id",
        "gtalk_id",
        "dob",
    ];

    /// Create an empty contact with a generated key and current timestamp
    pub fn new() -> Self {
        Contact {
            key: ContactKey::generate(),
            created_at: Utc::now(),
            name: None,
            surname: None,
            msisdn: None,
            email_address: None,
            twitter_handle: None,
            facebook_id: None,
            bbm_pin: None,
            mxit_id: None,
            wechat_id: None,
            gtalk_id: None,
            dob: None,
            groups: Vec::new(),
            extra: BTreeMap::new(),
            subscription: BTreeMap::new(),
        }
    }

    /// Look up a searchable scalar field by name
    ///
    /// Returns `None` if the name does not refer to a searchable field
    /// (the maps and the groups list are not searchable). The inner option
    /// is the field's current value.
    pub fn search_field(&self, name: &str) -> Option<Option<&str>> {
        let value = match name {
            "key" => Some(self.key.as_str()),
            "name" => self.name.as_deref(),
            "surname" => self.surname.as_deref(),
            "msisdn" => self.msisdn.as_deref(),
            "email_address" => self.email_address.as_deref(),
            "twitter_handle" => self.twitter_handle.as_deref(),
            "facebook_id" => self.facebook_id.as_deref(),
            "bbm_pin" => self.bbm_pin.as_deref(),
            "mxit_id" => self.mxit_id.as_deref(),
            "wechat_id" => self.wechat_id.as_deref(),
            "gtalk_id" => self.gtalk_id.as_deref(),
            "dob" => self.dob.as_deref(),
            _ => return None,
        };
        Some(value)
    }
}

impl Default for Contact {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial contact payload for create and update operations
///
/// Every field is optional; fields left out keep their current value on
/// update and their default on create. Unknown fields are rejected at
/// deserialization time, which is how invalid-field usage errors surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactFields {
    /// First name
    pub name: Option<String>,
    /// Surname
    pub surname: Option<String>,
    /// Mobile number
    pub msisdn: Option<String>,
    /// Email address
    pub email_address: Option<String>,
    /// Twitter handle
    pub twitter_handle: Option<String>,
    /// Facebook identifier
    pub facebook_id: Option<String>,
    /// BBM pin
    pub bbm_pin: Option<String>,
    /// Mxit identifier
    pub mxit_id: Option<String>,
    /// WeChat identifier
    pub wechat_id: Option<String>,
    /// Google Talk identifier
    pub gtalk_id: Option<String>,
    /// Date of birth
    pub dob: Option<String>,
    /// Groups this contact is statically tagged with
    pub groups: Option<Vec<GroupKey>>,
    /// Free-form extra fields
    pub extra: Option<BTreeMap<String, String>>,
    /// Subscription state per campaign
    pub subscription: Option<BTreeMap<String, String>>,
}

impl ContactFields {
    /// Overlay these fields onto an existing record
    pub fn apply_to(&self, contact: &mut Contact) {
        macro_rules! overlay {
            ($field:ident) => {
                if let Some(value) = &self.$field {
                    contact.$field = Some(value.clone());
                }
            };
        }
        overlay!(name);
        overlay!(surname);
        overlay!(msisdn);
        overlay!(email_address);
        overlay!(twitter_handle);
        overlay!(facebook_id);
        overlay!(bbm_pin);
        overlay!(mxit_id);
        overlay!(wechat_id);
        overlay!(gtalk_id);
        overlay!(dob);
        if let Some(groups) = &self.groups {
            contact.groups = groups.clone();
        }
        if let Some(extra) = &self.extra {
            contact.extra = extra.clone();
        }
        if let Some(subscription) = &self.subscription {
            contact.subscription = subscription.clone();
        }
    }
}

/// A stored group record
///
/// A group is "smart" when it carries a non-empty query: its membership is
/// then the union of statically tagged contacts and contacts matching the
/// query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique key of this group
    pub key: GroupKey,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Display name
    pub name: String,
    /// Stored search query, present for smart groups
    pub query: Option<String>,
}

impl Group {
    /// Whether this group has dynamic (query-defined) membership
    pub fn is_smart(&self) -> bool {
        self.query.as_deref().is_some_and(|q| !q.is_empty())
    }
}

/// Partial group payload for create and update operations
///
/// `query` distinguishes absent from null: leaving it out of the payload
/// keeps the stored query, while an explicit `"query": null` clears it and
/// turns a smart group back into a plain one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GroupFields {
    /// Display name
    pub name: Option<String>,
    /// Stored search query; a non-empty value makes the group smart
    ///
    /// Outer `None` is "not mentioned", `Some(None)` is an explicit null.
    #[serde(
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub query: Option<Option<String>>,
}

fn double_option<'de, D>(de: D) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(de).map(Some)
}

/// One bounded batch of keys from an ordered scan
///
/// `continuation` is a store-native opaque token; `None` means the scan is
/// exhausted, anything else resumes the scan deterministically when passed
/// back to the same scan operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPage<K = ContactKey> {
    /// Keys in scan order, at most the requested limit
    pub keys: Vec<K>,
    /// Resume token, `None` when the scan is exhausted
    pub continuation: Option<String>,
}
