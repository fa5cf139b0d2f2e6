//! endqueue domain types.
//!
//! Records managed by the service, their surrogate keys, and the query-string
//! language used to search the mirrored copies.

pub mod entities;
pub mod error;
pub mod identity;
pub mod ids;
pub mod record;
pub mod search;

pub use entities::{Admin, DynamicQueue, Organization, Participant, Queue};
pub use error::DomainError;
pub use identity::Identity;
pub use ids::{
    AdminId, DynamicQueueId, OrganizationId, ParticipantId, PersonId, QueueId, RecordId,
};
pub use record::Record;
pub use search::{SearchDocument, SearchQuery};
