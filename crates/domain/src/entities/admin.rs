//! Admin entity - A person who manages queues

use serde::{Deserialize, Serialize};

use crate::record::identity_eq;
use crate::{AdminId, Identity, Record};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    #[serde(default)]
    pub id: Identity<AdminId>,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Admin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

identity_eq!(Admin);

impl Record for Admin {
    type Id = AdminId;

    const ENTITY_NAME: &'static str = "admin";
    const DISPLAY_NAME: &'static str = "Admin";
    const PATH: &'static str = "admins";
    const INDEX: &'static str = "admin";

    fn identity(&self) -> Identity<AdminId> {
        self.id
    }

    fn set_identity(&mut self, identity: Identity<AdminId>) {
        self.id = identity;
    }
}
