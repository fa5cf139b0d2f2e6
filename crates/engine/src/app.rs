//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::persistence::{SqlRecord, SqliteDatabase, SqliteRecordStore};
use crate::infrastructure::ports::{RecordStore, SearchMirror};
use crate::infrastructure::search::SearchBackend;
use crate::use_cases::{ResourceCrud, ResourceUseCases};

/// Main application state.
///
/// Holds one dispatcher per managed record type.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: ResourceUseCases,
}

impl App {
    /// Wire every record type to its SQLite table and its search mirror.
    pub fn new(database: &SqliteDatabase, search: &SearchBackend) -> Self {
        tracing::info!(backend = search.name(), "Search mirror configured");

        Self {
            use_cases: ResourceUseCases {
                admin: resource(database, search),
                organization: resource(database, search),
                queue: resource(database, search),
                dynamic_queue: resource(database, search),
                participant: resource(database, search),
            },
        }
    }
}

fn resource<R: SqlRecord>(
    database: &SqliteDatabase,
    search: &SearchBackend,
) -> Arc<ResourceCrud<R>> {
    let store: Arc<dyn RecordStore<R>> = Arc::new(SqliteRecordStore::<R>::new(database));
    let mirror: Arc<dyn SearchMirror<R>> = search.mirror_for::<R>();
    Arc::new(ResourceCrud::new(store, mirror))
}
