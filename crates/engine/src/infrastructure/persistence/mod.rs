//! SQLite persistence adapters
//!
//! One table per record type, typed columns, keys issued by
//! `INTEGER PRIMARY KEY AUTOINCREMENT` so they are monotonic and never reused.

mod connection;
mod record_store;
mod records;

pub use connection::SqliteDatabase;
pub use record_store::SqliteRecordStore;
pub use records::{SqlRecord, SqlValue};
