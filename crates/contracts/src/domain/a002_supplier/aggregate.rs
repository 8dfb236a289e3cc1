use crate::domain::a003_address::aggregate::{Address, AddressId, NewAddress};
use crate::domain::common::{AggregateId, AggregateRoot};
use crate::shared::validation::{field_value, is_checked, Draft, FieldSpec, Rule};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================

crate::aggregate_id!(
    /// Backend id of a supplier
    SupplierId
);

// ============================================================================
// Form fields
// ============================================================================

pub mod fields {
    pub const NAME: &str = "nombre";
    pub const PHONE: &str = "telefono";
    pub const EMAIL: &str = "email";
    pub const ADDRESS_ID: &str = "direccion_id";
    pub const USE_NEW_ADDRESS: &str = "usar_nueva_direccion";
    pub const NEW_STREET: &str = "nueva_calle";
    pub const NEW_REGION: &str = "nueva_region";
    pub const NEW_COMMUNE: &str = "nueva_comuna";
}

/// National prefix every stored phone starts with
pub const PHONE_PREFIX: &str = "+56";

/// Digits after [`PHONE_PREFIX`]
pub const PHONE_DIGITS: usize = 9;

pub const DUPLICATE_NAME_MESSAGE: &str = "Ya existe un proveedor con ese nombre.";

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

/// Strip a leading `+56`, keep digits only, cut to [`PHONE_DIGITS`].
pub fn normalize_phone(raw: &str) -> String {
    let raw = raw.trim();
    let local = raw.strip_prefix(PHONE_PREFIX).unwrap_or(raw);
    local
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(PHONE_DIGITS)
        .collect()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Comparison key for supplier names: case and whitespace do not count.
pub fn name_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Best-effort duplicate guard against the suppliers already loaded.
pub fn is_duplicate_name(name: &str, existing: &[Supplier], editing: Option<SupplierId>) -> bool {
    let key = name_key(name);
    existing
        .iter()
        .any(|s| Some(s.id) != editing && name_key(&s.name) == key)
}

fn uses_new_address(draft: &Draft) -> bool {
    is_checked(draft, fields::USE_NEW_ADDRESS)
}

fn uses_existing_address(draft: &Draft) -> bool {
    !uses_new_address(draft)
}

pub const SUPPLIER_RULES: &[FieldSpec] = &[
    FieldSpec::required(fields::NAME, &[Rule::MaxLen { max: 100, message: "Máximo 100 caracteres" }]),
    FieldSpec::required(
        fields::PHONE,
        &[Rule::Digits {
            len: PHONE_DIGITS,
            message: "El teléfono debe tener 9 dígitos después del +56.",
        }],
    ),
    FieldSpec::required(
        fields::EMAIL,
        &[Rule::Format {
            check: is_valid_email,
            message: "Correo electrónico inválido",
        }],
    ),
    FieldSpec::required_when(fields::ADDRESS_ID, uses_existing_address, &[]),
    FieldSpec::required_when(fields::NEW_STREET, uses_new_address, &[]),
    FieldSpec::required_when(fields::NEW_REGION, uses_new_address, &[]),
    FieldSpec::required_when(fields::NEW_COMMUNE, uses_new_address, &[]),
];

// ============================================================================
// Aggregate Root
// ============================================================================

/// Supplier as returned by `GET /proveedores`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "telefono")]
    pub phone: String,

    pub email: String,

    #[serde(rename = "direccion", default)]
    pub address: Option<Address>,
}

impl Supplier {
    /// Draft used when the edit form opens. The phone loses its prefix and
    /// the current region/commune are preloaded for the new-address selectors.
    pub fn to_draft(&self) -> Draft {
        let mut draft = Draft::new();
        draft.insert(fields::NAME.into(), self.name.clone());
        draft.insert(fields::PHONE.into(), normalize_phone(&self.phone));
        draft.insert(fields::EMAIL.into(), self.email.clone());
        if let Some(address) = &self.address {
            draft.insert(fields::ADDRESS_ID.into(), address.id.as_string());
            draft.insert(fields::NEW_REGION.into(), address.region.clone());
            draft.insert(fields::NEW_COMMUNE.into(), address.commune.clone());
        }
        draft
    }

    pub fn address_label(&self) -> Option<String> {
        self.address.as_ref().map(Address::label)
    }
}

impl AggregateRoot for Supplier {
    type Id = SupplierId;

    fn id(&self) -> Option<Self::Id> {
        Some(self.id)
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "proveedores"
    }

    fn element_name() -> &'static str {
        "Proveedor"
    }

    fn list_name() -> &'static str {
        "Proveedores"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Where the supplier's address comes from
#[derive(Debug, Clone, PartialEq)]
pub enum AddressChoice {
    Existing(AddressId),
    New(NewAddress),
}

/// Body of `POST /proveedores` and `PUT /proveedores/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierDto {
    #[serde(rename = "nombre")]
    pub name: String,

    /// Full phone including [`PHONE_PREFIX`]
    #[serde(rename = "telefono")]
    pub phone: String,

    pub email: String,

    #[serde(rename = "direccion_id", skip_serializing_if = "Option::is_none", default)]
    pub address_id: Option<AddressId>,

    #[serde(rename = "direccion_nueva", skip_serializing_if = "Option::is_none", default)]
    pub new_address: Option<NewAddress>,
}

impl SupplierDto {
    pub fn new(name: String, local_phone: &str, email: String, address: AddressChoice) -> Self {
        let (address_id, new_address) = match address {
            AddressChoice::Existing(id) => (Some(id), None),
            AddressChoice::New(new) => (None, Some(new)),
        };
        Self {
            name,
            phone: format!("{}{}", PHONE_PREFIX, normalize_phone(local_phone)),
            email,
            address_id,
            new_address,
        }
    }

    /// Build the payload from a draft that passed [`SUPPLIER_RULES`]
    pub fn from_draft(draft: &Draft) -> Result<Self, String> {
        let address = if uses_new_address(draft) {
            AddressChoice::New(NewAddress {
                street: field_value(draft, fields::NEW_STREET).to_string(),
                region: field_value(draft, fields::NEW_REGION).to_string(),
                commune: field_value(draft, fields::NEW_COMMUNE).to_string(),
            })
        } else {
            AddressChoice::Existing(AddressId::from_string(field_value(
                draft,
                fields::ADDRESS_ID,
            ))?)
        };

        Ok(Self::new(
            field_value(draft, fields::NAME).to_string(),
            field_value(draft, fields::PHONE),
            field_value(draft, fields::EMAIL).to_string(),
            address,
        ))
    }
}
