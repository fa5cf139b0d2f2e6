use std::fmt;
use std::hash::Hash;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Server-assigned surrogate key of a stored record.
///
/// Keys are issued by the record store and are never chosen by clients.
pub trait RecordId:
    Copy
    + Eq
    + Hash
    + fmt::Debug
    + fmt::Display
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    fn from_raw(raw: i64) -> Self;
    fn raw(self) -> i64;
}

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl RecordId for $name {
            fn from_raw(raw: i64) -> Self {
                Self(raw)
            }

            fn raw(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(AdminId);
define_id!(OrganizationId);
define_id!(QueueId);
define_id!(DynamicQueueId);
define_id!(ParticipantId);

// Persons are managed elsewhere; participants only carry the reference.
define_id!(PersonId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_bare_numbers() {
        let id = QueueId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");

        let parsed: QueueId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn raw_round_trip_through_trait() {
        let id = <AdminId as RecordId>::from_raw(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(id.to_string(), "7");
    }
}
