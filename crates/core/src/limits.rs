//! Page-size limits
//!
//! Per-request result ceilings enforced by the pagination and streaming
//! engines. Callers can ask for fewer results than the ceiling but never
//! more; an unspecified `max_results` means the ceiling.

use serde::{Deserialize, Serialize};

/// Result-count ceilings and stream buffering margins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum contacts returned per page or buffered per stream fetch
    pub max_contacts_per_page: usize,

    /// Maximum groups returned per page
    pub max_groups_per_page: usize,

    /// Extra stream-channel capacity beyond one page of records
    ///
    /// The producer keeps at most one page-fetch in flight ahead of the
    /// consumer; the backlog margin lets it finish handing over a fetched
    /// page without blocking on the very last item.
    pub stream_backlog: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_contacts_per_page: 100,
            max_groups_per_page: 100,
            stream_backlog: 1,
        }
    }
}

impl Limits {
    /// Clamp a caller-supplied `max_results` against a ceiling
    ///
    /// Absent means the ceiling; zero is bumped to one so a page request
    /// always makes forward progress.
    pub fn clamp_page(requested: Option<usize>, ceiling: usize) -> usize {
        requested.unwrap_or(ceiling).clamp(1, ceiling)
    }
}
