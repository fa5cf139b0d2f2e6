//! Use cases - Resource operations exposed over HTTP.
//!
//! One generic dispatcher per managed record type; the HTTP layer stays thin
//! and only maps outcomes to responses.

pub mod resource;

use std::sync::Arc;

use endqueue_domain::{Admin, DynamicQueue, Organization, Participant, Queue};

pub use resource::{ResourceCrud, ResourceError, Saved};

/// Container for the per-record dispatchers.
pub struct ResourceUseCases {
    pub admin: Arc<ResourceCrud<Admin>>,
    pub organization: Arc<ResourceCrud<Organization>>,
    pub queue: Arc<ResourceCrud<Queue>>,
    pub dynamic_queue: Arc<ResourceCrud<DynamicQueue>>,
    pub participant: Arc<ResourceCrud<Participant>>,
}
