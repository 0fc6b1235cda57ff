//! Entity identifiers
//!
//! Every entity is addressed by a string id. The ids are kept as distinct
//! newtypes so a [`TeamId`] can never be passed where a [`WorkerId`] is
//! expected. They serialize transparently as plain JSON strings, which keeps
//! exported snapshots readable (`"w1"`, `"p2"`, ...).

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Wrap an existing id
            #[inline]
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh random id
            #[inline]
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Borrow the raw id
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::new(s))
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Project identifier
    ProjectId
);
string_id!(
    /// Team ("pareja") identifier
    TeamId
);
string_id!(
    /// Worker identifier
    WorkerId
);
string_id!(
    /// Task identifier
    TaskId
);
string_id!(
    /// Functional role identifier
    RoleId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn id_serializes_as_plain_string() {
        let id = WorkerId::new("w1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"w1\"");

        let back: WorkerId = serde_json::from_str("\"w1\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(ProjectId::generate(), ProjectId::generate());
    }

    #[test]
    fn map_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(TeamId::new("t1"), 1);
        assert_eq!(map.get("t1"), Some(&1));
    }
}
