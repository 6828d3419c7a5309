//! Group-membership pagination and streaming engine
//!
//! A group's membership comes from two structurally different sources:
//! contacts statically tagged with the group's key (read through ordered
//! secondary-index scans with store-native continuation tokens) and, for
//! smart groups, contacts matching the group's stored query (read through
//! offset-based search pagination). This crate presents both behind one
//! cursor contract and one streaming contract:
//!
//! - [`GroupContactsEngine::page`] returns one bounded page plus a resume
//!   cursor, draining the static source to exhaustion before switching to
//!   the dynamic source
//! - [`GroupContactsEngine::stream`] feeds the same traversal into a bounded
//!   channel with one page of prefetch lookahead
//!
//! Both contracts are driven by the same single-step state machine
//! ([`Traversal`]), so a stream observes exactly the concatenation of the
//! pages a cursor chain would produce.
//!
//! Membership of a nonexistent group degrades to an empty result rather than
//! an error, and a contact deleted between key enumeration and dereference
//! is skipped, not fatal. A contact that is both statically tagged and
//! matched by the smart query is returned twice, once per phase; nothing
//! deduplicates across sources.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod deref;
pub mod engine;
pub mod membership;
pub mod source;
pub mod stream;
pub mod traversal;

pub use deref::Dereferencer;
pub use engine::GroupContactsEngine;
pub use membership::{Membership, MembershipResolver};
pub use source::{IndexPageSource, QueryPageSource};
pub use stream::{spawn_fill, RecordStream};
pub use traversal::{Step, Traversal};

use rolodex_core::{Error, Result};

/// Reject a caller-supplied free-text filter
///
/// Filtering on top of a listing is unsupported; the check runs before any
/// collaborator is touched, for pages and streams alike.
pub fn reject_query_filter(query: Option<&str>) -> Result<()> {
    match query {
        Some(q) => Err(Error::usage(format!(
            "query parameter not supported: {q:?}"
        ))),
        None => Ok(()),
    }
}
