//! The contract every managed record type fulfils.

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

use crate::{DomainError, Identity, RecordId};

/// A flat record stored in the record store and mirrored into the search index.
///
/// The associated constants name the record in every outer surface: alert
/// headers and error bodies use [`Record::ENTITY_NAME`], logs use
/// [`Record::DISPLAY_NAME`], routes use [`Record::PATH`] and the mirror uses
/// [`Record::INDEX`].
pub trait Record:
    Clone + Debug + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static
{
    type Id: RecordId;

    const ENTITY_NAME: &'static str;
    const DISPLAY_NAME: &'static str;
    const PATH: &'static str;
    const INDEX: &'static str;

    fn identity(&self) -> Identity<Self::Id>;

    fn set_identity(&mut self, identity: Identity<Self::Id>);

    /// Presence checks on incoming payloads.
    fn validate(&self) -> Result<(), DomainError> {
        Ok(())
    }

    fn id(&self) -> Option<Self::Id> {
        self.identity().id()
    }

    fn is_persisted(&self) -> bool {
        self.identity().is_persisted()
    }

    /// Returns a copy stored under `id`.
    fn persisted(mut self, id: Self::Id) -> Self {
        self.set_identity(Identity::Persisted(id));
        self
    }

    /// Whether both records are persisted under the same key.
    fn same_entity(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

/// Identity-based equality for a record type with an `id: Identity<_>` field.
macro_rules! identity_eq {
    ($record:ty) => {
        impl PartialEq for $record {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }
    };
}

pub(crate) use identity_eq;
