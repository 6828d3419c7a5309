//! Rolodex - embedded contacts database with cursor pagination and streaming
//!
//! Rolodex stores contacts and groups in an in-process key-value directory
//! with secondary indexes and a structured search primitive, and reads them
//! back as single records, resumable cursor pages, or bounded-channel
//! streams. Group membership unifies two sources behind one cursor: contacts
//! statically tagged with the group, and contacts matched by a smart group's
//! stored query.
//!
//! # Quick Start
//!
//! ```ignore
//! use rolodex::Rolodex;
//! use serde_json::json;
//!
//! let db = Rolodex::new();
//!
//! let group = db.groups().create(json!({"name": "vip", "query": "msisdn:123"}))?;
//! db.contacts().create(json!({"name": "Ada", "groups": [group.key]}))?;
//!
//! // Page through the group's members, following the returned cursor.
//! let (cursor, members) = db.group_contacts().page(group.key.as_str(), None, Some(50), None)?;
//! ```
//!
//! # Architecture
//!
//! The public surface is the collections API re-exported from `rolodex-api`.
//! Internal implementation details (the in-memory store and the traversal
//! engine) stay behind that boundary.

// Re-export the public API from rolodex-api
pub use rolodex_api::*;

// Core vocabulary types callers hold and match on
pub use rolodex_core::{Contact, Error, Group, Limits, Result};

// Stream handle returned by every `stream` method
pub use rolodex_engine::RecordStream;
