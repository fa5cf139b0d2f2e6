//! Domain entities - Records managed by the service

mod admin;
mod dynamic_queue;
mod organization;
mod participant;
mod queue;

pub use admin::Admin;
pub use dynamic_queue::DynamicQueue;
pub use organization::Organization;
pub use participant::Participant;
pub use queue::Queue;
