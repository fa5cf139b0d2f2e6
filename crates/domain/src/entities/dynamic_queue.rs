//! DynamicQueue entity - Live state of a queue

use serde::{Deserialize, Serialize};

use crate::record::identity_eq;
use crate::{DynamicQueueId, Identity, Record};

/// Live counters for a queue. Participants reference it by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicQueue {
    #[serde(default)]
    pub id: Identity<DynamicQueueId>,
    pub num_participants: Option<i64>,
    pub rate: Option<i32>,
}

impl DynamicQueue {
    pub fn new(num_participants: i64, rate: i32) -> Self {
        Self {
            id: Identity::Unpersisted,
            num_participants: Some(num_participants),
            rate: Some(rate),
        }
    }
}

identity_eq!(DynamicQueue);

impl Record for DynamicQueue {
    type Id = DynamicQueueId;

    const ENTITY_NAME: &'static str = "dynamicQueue";
    const DISPLAY_NAME: &'static str = "DynamicQueue";
    const PATH: &'static str = "dynamic-queues";
    const INDEX: &'static str = "dynamicqueue";

    fn identity(&self) -> Identity<DynamicQueueId> {
        self.id
    }

    fn set_identity(&mut self, identity: Identity<DynamicQueueId>) {
        self.id = identity;
    }
}
