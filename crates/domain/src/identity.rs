//! Record identity as a sum type.
//!
//! A record is either not yet stored or stored under a key issued by the
//! record store. On the wire this is `"id": null` versus `"id": <number>`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy)]
pub enum Identity<I> {
    /// Never written to the record store.
    Unpersisted,
    /// Stored under a server-issued key.
    Persisted(I),
}

impl<I: Copy> Identity<I> {
    pub fn id(&self) -> Option<I> {
        match self {
            Self::Unpersisted => None,
            Self::Persisted(id) => Some(*id),
        }
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted(_))
    }
}

impl<I> Default for Identity<I> {
    fn default() -> Self {
        Self::Unpersisted
    }
}

impl<I> From<Option<I>> for Identity<I> {
    fn from(value: Option<I>) -> Self {
        match value {
            Some(id) => Self::Persisted(id),
            None => Self::Unpersisted,
        }
    }
}

/// Two identities are equal only when both are persisted under the same key.
///
/// Not `Eq`: an unpersisted identity is not equal to itself.
impl<I: PartialEq> PartialEq for Identity<I> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Persisted(a), Self::Persisted(b)) => a == b,
            _ => false,
        }
    }
}

impl<I: Serialize> Serialize for Identity<I> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Unpersisted => serializer.serialize_none(),
            Self::Persisted(id) => serializer.serialize_some(id),
        }
    }
}

impl<'de, I: Deserialize<'de>> Deserialize<'de> for Identity<I> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<I>::deserialize(deserializer)?.into())
    }
}
