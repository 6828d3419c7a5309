//! Contacts-for-group collection: the two-phase engine at the API boundary

use std::sync::Arc;

use rolodex_core::{Contact, GroupKey, Limits, Result};
use rolodex_engine::{GroupContactsEngine, RecordStream};
use rolodex_store::Directory;

/// Members of one group, paged or streamed
///
/// Thin delegation to [`GroupContactsEngine`]; the membership semantics
/// (two-phase traversal, degrade-to-empty for unknown groups, no
/// cross-source dedup) live in the engine crate.
#[derive(Debug, Clone)]
pub struct GroupContactsCollection {
    engine: GroupContactsEngine<Arc<Directory>>,
}

impl GroupContactsCollection {
    /// Create a collection handle
    pub fn new(directory: Arc<Directory>, limits: Limits) -> Self {
        Self {
            engine: GroupContactsEngine::with_limits(directory, limits),
        }
    }

    /// Fetch one page of a group's members
    pub fn page(
        &self,
        group_id: &str,
        cursor: Option<&str>,
        max_results: Option<usize>,
        query: Option<&str>,
    ) -> Result<(Option<String>, Vec<Contact>)> {
        self.engine
            .page(&GroupKey::new(group_id), cursor, max_results, query)
    }

    /// Stream all of a group's members through a bounded channel
    pub fn stream(&self, group_id: &str, query: Option<&str>) -> Result<RecordStream<Contact>> {
        self.engine.stream(&GroupKey::new(group_id), query)
    }
}
