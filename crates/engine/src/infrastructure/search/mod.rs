//! Search mirror adapters
//!
//! The in-process mirror serves single-node deployments and tests; the
//! Elasticsearch mirror keeps one index per record type on a cluster.

mod elasticsearch;
mod memory;

use std::sync::Arc;

use endqueue_domain::Record;

pub use elasticsearch::{
    ElasticsearchConfig, ElasticsearchMirror, DEFAULT_ELASTICSEARCH_URL, MAX_RESULTS,
};
pub use memory::{document_of, InMemorySearchMirror};

use crate::infrastructure::ports::SearchMirror;

/// Which mirror implementation backs every record type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchBackend {
    #[default]
    Memory,
    Elasticsearch(ElasticsearchConfig),
}

impl SearchBackend {
    /// Builds the mirror for one record type.
    pub fn mirror_for<R: Record>(&self) -> Arc<dyn SearchMirror<R>> {
        match self {
            Self::Memory => Arc::new(InMemorySearchMirror::<R>::new()),
            Self::Elasticsearch(config) => Arc::new(ElasticsearchMirror::<R>::new(config)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Elasticsearch(_) => "elasticsearch",
        }
    }
}
