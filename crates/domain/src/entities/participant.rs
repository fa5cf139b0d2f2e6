//! Participant entity - A person's place in a dynamic queue

use serde::{Deserialize, Serialize};

use crate::record::identity_eq;
use crate::{DynamicQueueId, Identity, ParticipantId, PersonId, Record};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(default)]
    pub id: Identity<ParticipantId>,
    pub position: Option<i64>,
    pub dynamic_queue_id: Option<DynamicQueueId>,
    pub person_id: Option<PersonId>,
}

impl Participant {
    pub fn new(position: i64) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn in_queue(mut self, dynamic_queue_id: DynamicQueueId) -> Self {
        self.dynamic_queue_id = Some(dynamic_queue_id);
        self
    }

    pub fn for_person(mut self, person_id: PersonId) -> Self {
        self.person_id = Some(person_id);
        self
    }
}

identity_eq!(Participant);

impl Record for Participant {
    type Id = ParticipantId;

    const ENTITY_NAME: &'static str = "participant";
    const DISPLAY_NAME: &'static str = "Participant";
    const PATH: &'static str = "participants";
    const INDEX: &'static str = "participant";

    fn identity(&self) -> Identity<ParticipantId> {
        self.id
    }

    fn set_identity(&mut self, identity: Identity<ParticipantId>) {
        self.id = identity;
    }
}
