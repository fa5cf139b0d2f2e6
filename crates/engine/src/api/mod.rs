//! API layer - HTTP entry points.

pub mod alerts;
pub mod http;
pub mod resources;

pub use http::{routes, ApiError};

#[cfg(test)]
mod http_tests;
