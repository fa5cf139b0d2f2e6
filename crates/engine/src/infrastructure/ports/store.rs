//! Record store port.

use async_trait::async_trait;
use endqueue_domain::Record;

use super::error::RepoError;

/// Authoritative storage for one record type.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    /// Inserts an unpersisted record, or overwrites the row a persisted record
    /// names. Returns the stored record with its key.
    ///
    /// Overwriting a key with no row fails with [`RepoError::NotFound`].
    async fn save(&self, record: R) -> Result<R, RepoError>;

    async fn find_by_id(&self, id: R::Id) -> Result<Option<R>, RepoError>;

    /// All rows in ascending key order.
    async fn find_all(&self) -> Result<Vec<R>, RepoError>;

    /// Returns whether a row was removed.
    async fn delete_by_id(&self, id: R::Id) -> Result<bool, RepoError>;
}
