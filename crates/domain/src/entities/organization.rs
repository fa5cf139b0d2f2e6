//! Organization entity - The owner of a set of queues

use serde::{Deserialize, Serialize};

use crate::record::identity_eq;
use crate::{DomainError, Identity, OrganizationId, Record};

/// Maximum length accepted for an organization name.
pub const MAX_NAME_LEN: usize = 255;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(default)]
    pub id: Identity<OrganizationId>,
    /// Required; payloads without a name are rejected.
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}

impl Organization {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

identity_eq!(Organization);

impl Record for Organization {
    type Id = OrganizationId;

    const ENTITY_NAME: &'static str = "organization";
    const DISPLAY_NAME: &'static str = "Organization";
    const PATH: &'static str = "organizations";
    const INDEX: &'static str = "organization";

    fn identity(&self) -> Identity<OrganizationId> {
        self.id
    }

    fn set_identity(&mut self, identity: Identity<OrganizationId>) {
        self.id = identity;
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Organization name cannot be empty"));
        }
        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::validation(format!(
                "Organization name cannot exceed {MAX_NAME_LEN} characters"
            )));
        }
        Ok(())
    }
}
