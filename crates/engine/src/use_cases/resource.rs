//! Resource CRUD dispatcher.
//!
//! Every managed record type goes through the same flow: validate, write the
//! record store, then copy the outcome into the search mirror. The store is
//! authoritative; mirror failures on writes are logged and swallowed so a
//! search outage never fails a write that already landed.

use std::sync::Arc;

use endqueue_domain::{DomainError, Record};

use crate::infrastructure::ports::{MirrorError, RecordStore, RepoError, SearchMirror};

/// Errors surfaced by resource operations.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// A create carried a client-chosen id.
    #[error("A new {entity} cannot already have an ID")]
    Conflict { entity: &'static str },
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error(transparent)]
    Validation(#[from] DomainError),
    #[error("Record store error: {0}")]
    Repo(#[from] RepoError),
    #[error("Search error: {0}")]
    Search(#[from] MirrorError),
}

impl ResourceError {
    fn not_found<R: Record>(id: R::Id) -> Self {
        Self::NotFound {
            entity: R::DISPLAY_NAME,
            id: id.to_string(),
        }
    }

    fn from_repo(error: RepoError) -> Self {
        match error {
            RepoError::NotFound { entity_type, id } => Self::NotFound {
                entity: entity_type,
                id,
            },
            other => Self::Repo(other),
        }
    }
}

/// Outcome of an update: PUT without an id falls through to create.
#[derive(Debug, Clone, PartialEq)]
pub enum Saved<R> {
    Created(R),
    Updated(R),
}

impl<R> Saved<R> {
    pub fn into_inner(self) -> R {
        match self {
            Self::Created(record) | Self::Updated(record) => record,
        }
    }
}

/// CRUD and search over one record type.
pub struct ResourceCrud<R: Record> {
    store: Arc<dyn RecordStore<R>>,
    mirror: Arc<dyn SearchMirror<R>>,
}

impl<R: Record> ResourceCrud<R> {
    pub fn new(store: Arc<dyn RecordStore<R>>, mirror: Arc<dyn SearchMirror<R>>) -> Self {
        Self { store, mirror }
    }

    pub async fn create(&self, record: R) -> Result<R, ResourceError> {
        tracing::debug!(?record, "REST request to save {}", R::DISPLAY_NAME);

        if record.is_persisted() {
            return Err(ResourceError::Conflict {
                entity: R::DISPLAY_NAME,
            });
        }
        record.validate()?;

        let saved = self
            .store
            .save(record)
            .await
            .map_err(ResourceError::from_repo)?;
        self.mirror_index(&saved).await;
        Ok(saved)
    }

    pub async fn update(&self, record: R) -> Result<Saved<R>, ResourceError> {
        tracing::debug!(?record, "REST request to update {}", R::DISPLAY_NAME);

        if !record.is_persisted() {
            return self.create(record).await.map(Saved::Created);
        }
        record.validate()?;

        let saved = self
            .store
            .save(record)
            .await
            .map_err(ResourceError::from_repo)?;
        self.mirror_index(&saved).await;
        Ok(Saved::Updated(saved))
    }

    pub async fn list(&self) -> Result<Vec<R>, ResourceError> {
        tracing::debug!("REST request to get all {}s", R::DISPLAY_NAME);
        Ok(self.store.find_all().await?)
    }

    pub async fn get(&self, id: R::Id) -> Result<R, ResourceError> {
        tracing::debug!(%id, "REST request to get {}", R::DISPLAY_NAME);
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ResourceError::not_found::<R>(id))
    }

    /// Deleting an absent id succeeds.
    pub async fn delete(&self, id: R::Id) -> Result<(), ResourceError> {
        tracing::debug!(%id, "REST request to delete {}", R::DISPLAY_NAME);

        let removed = self.store.delete_by_id(id).await?;
        if !removed {
            tracing::debug!(%id, entity = R::DISPLAY_NAME, "Nothing stored under id");
        }

        // Also clears mirror entries left stale by an earlier failed removal.
        if let Err(e) = self.mirror.remove(id).await {
            tracing::warn!(
                error = %e,
                entity = R::DISPLAY_NAME,
                %id,
                "Failed to remove record from search mirror"
            );
        }
        Ok(())
    }

    pub async fn search(&self, query: &str) -> Result<Vec<R>, ResourceError> {
        tracing::debug!(query, "REST request to search {}s", R::DISPLAY_NAME);

        if query.trim().is_empty() {
            return Err(DomainError::invalid_query("query cannot be blank").into());
        }

        self.mirror.search(query).await.map_err(|e| match e {
            MirrorError::InvalidQuery(msg) => DomainError::InvalidQuery(msg).into(),
            other => ResourceError::Search(other),
        })
    }

    async fn mirror_index(&self, record: &R) {
        if let Err(e) = self.mirror.index(record).await {
            tracing::warn!(
                error = %e,
                entity = R::DISPLAY_NAME,
                id = ?record.id(),
                "Failed to copy record into search mirror"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use endqueue_domain::{DynamicQueue, DynamicQueueId, Organization, Queue, QueueId};
    use mockall::predicate::eq;
    use mockall::Sequence;

    use super::*;
    use crate::infrastructure::ports::{MockRecordStore, MockSearchMirror};

    fn crud<R: Record>(store: MockRecordStore<R>, mirror: MockSearchMirror<R>) -> ResourceCrud<R> {
        ResourceCrud::new(Arc::new(store), Arc::new(mirror))
    }

    #[tokio::test]
    async fn create_with_id_is_a_conflict_without_store_calls() {
        let mut store = MockRecordStore::<Queue>::new();
        store.expect_save().never();
        let mut mirror = MockSearchMirror::<Queue>::new();
        mirror.expect_index().never();

        let err = crud(store, mirror)
            .create(Queue::new("A").persisted(QueueId::new(1)))
            .await
            .unwrap_err();

        assert!(matches!(err, ResourceError::Conflict { entity: "Queue" }));
    }

    #[tokio::test]
    async fn conflict_and_not_found_name_the_entity_alike() {
        let mut store = MockRecordStore::<DynamicQueue>::new();
        store.expect_find_by_id().returning(|_| Ok(None));
        let dispatcher = crud(store, MockSearchMirror::new());

        let conflict = dispatcher
            .create(DynamicQueue::new(0, 1).persisted(DynamicQueueId::new(1)))
            .await
            .unwrap_err();
        let missing = dispatcher.get(DynamicQueueId::new(2)).await.unwrap_err();

        assert_eq!(conflict.to_string(), "A new DynamicQueue cannot already have an ID");
        assert_eq!(missing.to_string(), "DynamicQueue not found: 2");
    }

    #[tokio::test]
    async fn create_writes_store_then_mirror() {
        let mut seq = Sequence::new();
        let mut store = MockRecordStore::<Queue>::new();
        store
            .expect_save()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|queue| Ok(queue.persisted(QueueId::new(7))));
        let mut mirror = MockSearchMirror::<Queue>::new();
        mirror
            .expect_index()
            .withf(|queue: &Queue| queue.id() == Some(QueueId::new(7)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let saved = crud(store, mirror).create(Queue::new("A")).await.unwrap();
        assert_eq!(saved.id(), Some(QueueId::new(7)));
    }

    #[tokio::test]
    async fn mirror_failure_does_not_fail_create() {
        let mut store = MockRecordStore::<Queue>::new();
        store
            .expect_save()
            .returning(|queue| Ok(queue.persisted(QueueId::new(1))));
        let mut mirror = MockSearchMirror::<Queue>::new();
        mirror
            .expect_index()
            .returning(|_| Err(MirrorError::Unavailable("connection refused".into())));

        let saved = crud(store, mirror).create(Queue::new("A")).await.unwrap();
        assert!(saved.is_persisted());
    }

    #[tokio::test]
    async fn invalid_record_is_rejected_before_store() {
        let mut store = MockRecordStore::<Organization>::new();
        store.expect_save().never();
        let mirror = MockSearchMirror::<Organization>::new();

        let err = crud(store, mirror)
            .create(Organization::new("  "))
            .await
            .unwrap_err();
        assert!(matches!(err, ResourceError::Validation(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn update_without_id_creates() {
        let mut store = MockRecordStore::<Queue>::new();
        store
            .expect_save()
            .times(1)
            .returning(|queue| Ok(queue.persisted(QueueId::new(3))));
        let mut mirror = MockSearchMirror::<Queue>::new();
        mirror.expect_index().returning(|_| Ok(()));

        let saved = crud(store, mirror).update(Queue::new("A")).await.unwrap();
        assert!(matches!(saved, Saved::Created(ref q) if q.id() == Some(QueueId::new(3))));
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found_and_skips_mirror() {
        let mut store = MockRecordStore::<Queue>::new();
        store
            .expect_save()
            .returning(|_| Err(RepoError::not_found("Queue", 9)));
        let mut mirror = MockSearchMirror::<Queue>::new();
        mirror.expect_index().never();

        let err = crud(store, mirror)
            .update(Queue::new("A").persisted(QueueId::new(9)))
            .await
            .unwrap_err();
        assert!(matches!(err, ResourceError::NotFound { entity: "Queue", ref id } if id == "9"));
    }

    #[tokio::test]
    async fn update_returns_updated() {
        let mut store = MockRecordStore::<Queue>::new();
        store.expect_save().returning(Ok);
        let mut mirror = MockSearchMirror::<Queue>::new();
        mirror.expect_index().times(1).returning(|_| Ok(()));

        let saved = crud(store, mirror)
            .update(
                Queue::new("A")
                    .with_max_capacity(2)
                    .persisted(QueueId::new(4)),
            )
            .await
            .unwrap();
        match saved {
            Saved::Updated(queue) => assert_eq!(queue.max_capacity, Some(2)),
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let mut store = MockRecordStore::<Queue>::new();
        store
            .expect_find_by_id()
            .with(eq(QueueId::new(5)))
            .returning(|_| Ok(None));
        let mirror = MockSearchMirror::<Queue>::new();

        let err = crud(store, mirror).get(QueueId::new(5)).await.unwrap_err();
        assert!(matches!(err, ResourceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_of_absent_id_still_clears_mirror() {
        let mut seq = Sequence::new();
        let mut store = MockRecordStore::<Queue>::new();
        store
            .expect_delete_by_id()
            .with(eq(QueueId::new(2)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(false));
        let mut mirror = MockSearchMirror::<Queue>::new();
        mirror
            .expect_remove()
            .with(eq(QueueId::new(2)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        crud(store, mirror).delete(QueueId::new(2)).await.unwrap();
    }

    #[tokio::test]
    async fn delete_swallows_mirror_failure() {
        let mut store = MockRecordStore::<Queue>::new();
        store.expect_delete_by_id().returning(|_| Ok(true));
        let mut mirror = MockSearchMirror::<Queue>::new();
        mirror
            .expect_remove()
            .returning(|_| Err(MirrorError::Request("500".into())));

        assert!(crud(store, mirror).delete(QueueId::new(2)).await.is_ok());
    }

    #[tokio::test]
    async fn blank_search_is_rejected_without_mirror_call() {
        let store = MockRecordStore::<Queue>::new();
        let mut mirror = MockSearchMirror::<Queue>::new();
        mirror.expect_search().never();

        let err = crud(store, mirror).search("  ").await.unwrap_err();
        assert!(matches!(err, ResourceError::Validation(DomainError::InvalidQuery(_))));
    }

    #[tokio::test]
    async fn search_surfaces_mirror_outage() {
        let store = MockRecordStore::<Queue>::new();
        let mut mirror = MockSearchMirror::<Queue>::new();
        mirror
            .expect_search()
            .returning(|_| Err(MirrorError::Unavailable("down".into())));

        let err = crud(store, mirror).search("name:a").await.unwrap_err();
        assert!(matches!(err, ResourceError::Search(MirrorError::Unavailable(_))));
    }

    #[tokio::test]
    async fn rejected_query_is_a_validation_error() {
        let store = MockRecordStore::<Queue>::new();
        let mut mirror = MockSearchMirror::<Queue>::new();
        mirror
            .expect_search()
            .returning(|_| Err(MirrorError::InvalidQuery("unterminated quote".into())));

        let err = crud(store, mirror).search("\"open").await.unwrap_err();
        assert!(matches!(err, ResourceError::Validation(DomainError::InvalidQuery(_))));
    }
}
