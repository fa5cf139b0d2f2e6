//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - The record store (could swap SQLite -> Postgres)
//! - The search mirror (in-process index or Elasticsearch)

mod error;
mod search;
mod store;

pub use error::{MirrorError, RepoError};
pub use search::SearchMirror;
pub use store::RecordStore;

#[cfg(test)]
pub use search::MockSearchMirror;
#[cfg(test)]
pub use store::MockRecordStore;
