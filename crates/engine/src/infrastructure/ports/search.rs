//! Search mirror port.

use async_trait::async_trait;
use endqueue_domain::Record;

use super::error::MirrorError;

/// Derived, best-effort searchable copy of one record type.
///
/// Never the source of truth: writes may be lost and reads may be stale.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchMirror<R: Record>: Send + Sync {
    /// Upserts the full record under its key.
    async fn index(&self, record: &R) -> Result<(), MirrorError>;

    /// Removing an absent key succeeds.
    async fn remove(&self, id: R::Id) -> Result<(), MirrorError>;

    /// All matches for a query string, most relevant first.
    async fn search(&self, query: &str) -> Result<Vec<R>, MirrorError>;
}
