use crate::domain::common::AggregateRoot;
use serde::{Deserialize, Serialize};

crate::aggregate_id!(
    /// Backend id of an address
    AddressId
);

/// Stored address. Region and commune are names from the geographic
/// division service, not codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,

    #[serde(rename = "calle")]
    pub street: String,

    #[serde(rename = "comuna")]
    pub commune: String,

    pub region: String,
}

impl Address {
    /// Selector label: "calle, comuna, región"
    pub fn label(&self) -> String {
        format!("{}, {}, {}", self.street, self.commune, self.region)
    }
}

impl AggregateRoot for Address {
    type Id = AddressId;

    fn id(&self) -> Option<Self::Id> {
        Some(self.id)
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "direcciones"
    }

    fn element_name() -> &'static str {
        "Dirección"
    }

    fn list_name() -> &'static str {
        "Direcciones"
    }
}

/// Inline address sent together with a supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAddress {
    #[serde(rename = "calle")]
    pub street: String,

    pub region: String,

    #[serde(rename = "comuna")]
    pub commune: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_joins_parts() {
        let address = Address {
            id: AddressId(1),
            street: "Av. Matta 123".into(),
            commune: "Santiago".into(),
            region: "Metropolitana".into(),
        };
        assert_eq!(address.label(), "Av. Matta 123, Santiago, Metropolitana");
    }
}
