//! Form controller shared by the entity screens.
//!
//! [`FormSchema`] describes one entity's form; [`FormState`] is the
//! screen-owned draft/error container; [`execute`] runs the asynchronous
//! part of a submit (external enrichment, confirmation, request).

pub mod controller;
pub mod schema;
pub mod state;
pub mod submit;

pub use controller::FormController;
pub use schema::FormSchema;
pub use state::{FormState, SubmitRequest};
pub use submit::{execute, Enrich, NoEnrichment, SubmitOutcome};
