//! endqueue Engine library.
//!
//! REST backend for queues, their live state, participants, admins and
//! organizations.
//!
//! ## Structure
//!
//! - `use_cases/` - Generic CRUD and search dispatch per record type
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
