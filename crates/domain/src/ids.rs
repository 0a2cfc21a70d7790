use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifiers minted by the back-office API. They are opaque strings on the
/// client side, so the newtypes only guarantee they are non-blank.
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(DomainError::invalid_id(concat!(
                        stringify!($name),
                        " cannot be blank"
                    )));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// Uploaded media (cover, banner, ...)
define_id!(MediaId);

// Entities created through a wizard
define_id!(EntityId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_ids_are_rejected() {
        assert!(MediaId::new("").is_err());
        assert!(MediaId::new("   ").is_err());
        assert!(EntityId::new("series-42").is_ok());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = MediaId::new("existing-id").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"existing-id\"");
        let back: MediaId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn blank_ids_are_rejected_when_deserializing() {
        assert!(serde_json::from_str::<MediaId>("\"\"").is_err());
        assert!(serde_json::from_str::<EntityId>("\"  \"").is_err());
    }
}
