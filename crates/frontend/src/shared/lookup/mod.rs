//! Third-party lookups used by the forms.
//!
//! Both services are best-effort: they may be down, slow or simply not know
//! the value. Screens talk to them only through [`GeoLookup`] and
//! [`PlateLookup`].

pub mod geo;
pub mod plate;

pub use geo::{DpaGeoLookup, GeoLookup};
pub use plate::{GetApiPlateLookup, PlateInfo, PlateLookup};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("servicio externo no disponible: {0}")]
    Unreachable(String),
    #[error("respuesta inesperada del servicio externo: {0}")]
    Parse(String),
}
