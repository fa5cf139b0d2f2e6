//! Queue entity - A named waiting line at a site

use serde::{Deserialize, Serialize};

use crate::record::identity_eq;
use crate::{AdminId, DynamicQueueId, Identity, OrganizationId, QueueId, Record};

/// A queue with its static description.
///
/// Live counters live on the linked [`crate::DynamicQueue`]; locations point
/// back at the queue and are not part of this payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Queue {
    #[serde(default)]
    pub id: Identity<QueueId>,
    pub name: Option<String>,
    pub desc: Option<String>,
    pub max_capacity: Option<i32>,
    pub site: Option<String>,
    /// One-to-one; no two queues share a dynamic queue.
    pub dynamic_info_id: Option<DynamicQueueId>,
    pub manager_id: Option<AdminId>,
    pub organization_id: Option<OrganizationId>,
}

impl Queue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn with_max_capacity(mut self, max_capacity: i32) -> Self {
        self.max_capacity = Some(max_capacity);
        self
    }

    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = Some(site.into());
        self
    }

    pub fn with_manager(mut self, manager_id: AdminId) -> Self {
        self.manager_id = Some(manager_id);
        self
    }

    pub fn with_organization(mut self, organization_id: OrganizationId) -> Self {
        self.organization_id = Some(organization_id);
        self
    }

    pub fn with_dynamic_info(mut self, dynamic_info_id: DynamicQueueId) -> Self {
        self.dynamic_info_id = Some(dynamic_info_id);
        self
    }
}

identity_eq!(Queue);

impl Record for Queue {
    type Id = QueueId;

    const ENTITY_NAME: &'static str = "queue";
    const DISPLAY_NAME: &'static str = "Queue";
    const PATH: &'static str = "queues";
    const INDEX: &'static str = "queue";

    fn identity(&self) -> Identity<QueueId> {
        self.id
    }

    fn set_identity(&mut self, identity: Identity<QueueId>) {
        self.id = identity;
    }
}
