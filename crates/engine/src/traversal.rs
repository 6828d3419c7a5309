//! The two-phase traversal state machine
//!
//! One [`Traversal::step`] is one underlying page fetch: from a decoded
//! cursor it produces a key batch and the cursor for the following step.
//! The pagination engine runs exactly one step per `page` call; the
//! streaming engine loops steps into a channel. Sharing the step is what
//! makes the two contracts observe identical sequences.
//!
//! Phase rules:
//! - STATIC drains the index scan. When the scan reports exhaustion, the
//!   group is resolved once: smart groups hand over to DYNAMIC at offset 0
//!   (the hand-over cursor rides on the same, possibly empty, final static
//!   batch); plain groups terminate.
//! - DYNAMIC re-resolves the group every step (query edits mid-traversal are
//!   tolerated) and advances by `offset + batch len`. A batch shorter than
//!   the limit, or an empty one, terminates. A group that vanished or lost
//!   its query mid-traversal terminates as exhausted, matching the
//!   degrade-to-empty rule for membership of nonexistent groups.

use rolodex_core::{ContactKey, Cursor, DirectoryRead, GroupKey, Result};

use crate::membership::MembershipResolver;
use crate::source::{IndexPageSource, QueryPageSource};

/// Result of one traversal step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Keys fetched by this step, in source order
    pub keys: Vec<ContactKey>,
    /// Cursor for the next step, `None` when the traversal is complete
    pub next: Option<Cursor>,
}

/// Cursor-driven traversal over one group's membership
#[derive(Debug, Clone)]
pub struct Traversal<D> {
    group: GroupKey,
    index: IndexPageSource<D>,
    search: QueryPageSource<D>,
    membership: MembershipResolver<D>,
}

impl<D: DirectoryRead + Clone> Traversal<D> {
    /// Create a traversal for one group
    pub fn new(directory: D, group: GroupKey) -> Self {
        Self {
            index: IndexPageSource::new(directory.clone(), group.clone()),
            search: QueryPageSource::new(directory.clone()),
            membership: MembershipResolver::new(directory),
            group,
        }
    }

    /// Fetch the batch at `cursor` and compute the follow-up cursor
    pub fn step(&self, cursor: &Cursor, limit: usize) -> Result<Step> {
        match cursor {
            Cursor::Static { continuation } => {
                let page = self.index.fetch(continuation.as_deref(), limit)?;
                let next = match page.continuation {
                    Some(continuation) => Some(Cursor::Static {
                        continuation: Some(continuation),
                    }),
                    None => {
                        if self.membership.resolve(&self.group)?.is_smart() {
                            tracing::debug!(group = %self.group, "static source exhausted, switching to dynamic phase");
                            Some(Cursor::Dynamic { offset: 0 })
                        } else {
                            None
                        }
                    }
                };
                Ok(Step {
                    keys: page.keys,
                    next,
                })
            }
            Cursor::Dynamic { offset } => {
                let Some(query) = self.membership.resolve(&self.group)?.query else {
                    return Ok(Step {
                        keys: Vec::new(),
                        next: None,
                    });
                };
                let keys = self.search.fetch(&query, *offset, limit)?;
                let next = (keys.len() == limit && limit > 0).then(|| Cursor::Dynamic {
                    offset: offset + keys.len(),
                });
                Ok(Step { keys, next })
            }
        }
    }
}
