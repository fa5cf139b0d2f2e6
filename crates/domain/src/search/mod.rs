//! Query-string search over mirrored records.
//!
//! The syntax follows the query-string dialect clients already send to the
//! search endpoints:
//!
//! - `term` matches the term in any field, `field:term` in one field
//! - `"two words"` matches a contiguous phrase
//! - `+term` is required, `-term` is excluded, `NOT term` excludes,
//!   `a AND b` requires both, `OR` is the default and may be written out
//! - `term*` matches a prefix, a lone `*` matches every document
//!
//! Matching is case-insensitive over alphanumeric tokens.

mod document;
mod query;

pub use document::{tokenize, SearchDocument};
pub use query::{Clause, Occur, SearchQuery};
