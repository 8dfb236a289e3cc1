use crate::shared::api::EntityMessages;
use contracts::domain::common::AggregateRoot;
use contracts::shared::validation::{Draft, FieldErrors, FieldSpec};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Everything entity-specific about a create/edit form.
pub trait FormSchema: 'static {
    type Record: AggregateRoot + Clone + DeserializeOwned + Send + Sync + 'static;
    type Payload: Serialize;

    /// Rules checked when the user submits
    fn rules() -> &'static [FieldSpec];

    /// Rules checked after enrichment, right before the payload is built
    fn final_rules() -> &'static [FieldSpec] {
        Self::rules()
    }

    fn messages() -> &'static EntityMessages;

    fn empty_draft() -> Draft {
        Draft::new()
    }

    fn draft_from(record: &Self::Record) -> Draft;

    /// Per-keystroke normalization. Returns the value to store and an
    /// advisory message that does not block anything by itself.
    fn normalize(_field: &str, raw: &str) -> (String, Option<String>) {
        (raw.to_string(), None)
    }

    /// Fields that cannot change in the current mode
    fn is_locked(_field: &str, _editing: bool) -> bool {
        false
    }

    /// Adjust dependent fields after `field` changed
    fn cascade(_field: &str, _draft: &mut Draft) {}

    /// Cross-field checks against the record being edited and the loaded list
    fn business_check(
        _draft: &Draft,
        _original: Option<&Self::Record>,
        _existing: &[Self::Record],
    ) -> FieldErrors {
        FieldErrors::new()
    }

    /// Question the user has to accept before the request goes out
    fn confirmation(_draft: &Draft, _original: Option<&Self::Record>) -> Option<String> {
        None
    }

    fn payload(draft: &Draft) -> Result<Self::Payload, String>;
}
