//! The caller-facing page and stream contracts for group membership

use std::sync::Arc;

use rolodex_core::{Contact, Cursor, DirectoryRead, GroupKey, Limits, Result};

use crate::deref::Dereferencer;
use crate::reject_query_filter;
use crate::stream::{spawn_fill, RecordStream};
use crate::traversal::Traversal;

/// Pagination and streaming over one directory's group memberships
///
/// Holds only the directory handle and the limits; every `page` or `stream`
/// call is an independent traversal with no shared mutable state, so one
/// engine serves unlimited concurrent callers.
#[derive(Debug, Clone)]
pub struct GroupContactsEngine<D> {
    directory: D,
    limits: Limits,
}

impl<D> GroupContactsEngine<D>
where
    D: DirectoryRead + Clone + Send + Sync + 'static,
{
    /// Create an engine with default limits
    pub fn new(directory: D) -> Self {
        Self::with_limits(directory, Limits::default())
    }

    /// Create an engine with explicit limits
    pub fn with_limits(directory: D, limits: Limits) -> Self {
        Self { directory, limits }
    }

    /// Fetch one page of a group's members
    ///
    /// `cursor` is a token from a previous page (absent for the first).
    /// `max_results` is clamped to the configured ceiling. `query` is a
    /// caller-supplied filter, distinct from a smart group's stored query,
    /// and is unsupported: any value is a usage error before any
    /// collaborator is touched.
    ///
    /// Returns the page's records in source order plus the cursor for the
    /// next page, `None` once the membership is exhausted. A nonexistent
    /// group yields `(None, [])` on the first call.
    pub fn page(
        &self,
        group: &GroupKey,
        cursor: Option<&str>,
        max_results: Option<usize>,
        query: Option<&str>,
    ) -> Result<(Option<String>, Vec<Contact>)> {
        reject_query_filter(query)?;
        let limit = Limits::clamp_page(max_results, self.limits.max_contacts_per_page);
        let position = Cursor::decode(cursor)?;

        let traversal = Traversal::new(self.directory.clone(), group.clone());
        let step = traversal.step(&position, limit)?;
        let records = Dereferencer::new(self.directory.clone()).resolve_batch(&step.keys)?;

        let next = match step.next {
            Some(cursor) => Some(cursor.encode()?),
            None => None,
        };
        Ok((next, records))
    }

    /// Stream a group's members into a bounded channel
    ///
    /// The traversal is the same as chained `page` calls; the channel closes
    /// once both phases are exhausted. The producer keeps one page of
    /// fetch-ahead and stops as soon as the receiver is dropped; a fetch
    /// failure mid-production truncates the stream and is reported by
    /// [`RecordStream::finish`]. Must be called within a tokio runtime.
    pub fn stream(
        &self,
        group: &GroupKey,
        query: Option<&str>,
    ) -> Result<RecordStream<Contact>> {
        reject_query_filter(query)?;
        let limit = self.limits.max_contacts_per_page;
        let capacity = limit + self.limits.stream_backlog;

        let traversal = Arc::new(Traversal::new(self.directory.clone(), group.clone()));
        let deref = Dereferencer::new(self.directory.clone());
        Ok(spawn_fill(capacity, Cursor::start(), move |position| {
            let traversal = traversal.clone();
            let deref = deref.clone();
            tokio::task::spawn_blocking(move || {
                let step = traversal.step(&position, limit)?;
                let records = deref.resolve_batch(&step.keys)?;
                Ok((records, step.next))
            })
        }))
    }
}
