use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Trait for aggregate identifier types.
///
/// The backend keys every record with an integer, so each id newtype wraps
/// an `i64` and serializes transparently.
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug + Send + Sync + 'static
{
    /// Wrap a raw backend id
    fn from_value(value: i64) -> Self;

    /// Raw backend id
    fn value(&self) -> i64;

    /// Id as it appears in URLs and form selectors
    fn as_string(&self) -> String {
        self.value().to_string()
    }

    /// Parse an id coming from a form selector
    fn from_string(s: &str) -> Result<Self, String> {
        s.trim()
            .parse::<i64>()
            .map(Self::from_value)
            .map_err(|e| format!("Invalid id '{}': {}", s, e))
    }
}

/// Declares an `i64`-backed id newtype implementing [`AggregateId`].
#[macro_export]
macro_rules! aggregate_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $crate::domain::common::AggregateId for $name {
            fn from_value(value: i64) -> Self {
                Self(value)
            }

            fn value(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    aggregate_id!(
        /// Id used only by these tests
        SampleId
    );

    #[test]
    fn test_from_string_trims_and_parses() {
        assert_eq!(SampleId::from_string(" 42 "), Ok(SampleId(42)));
        assert_eq!(SampleId(7).as_string(), "7");
    }

    #[test]
    fn test_from_string_rejects_garbage() {
        assert!(SampleId::from_string("").is_err());
        assert!(SampleId::from_string("abc").is_err());
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        assert_eq!(serde_json::to_string(&SampleId(3)).unwrap(), "3");
        let id: SampleId = serde_json::from_str("15").unwrap();
        assert_eq!(id, SampleId(15));
    }
}
