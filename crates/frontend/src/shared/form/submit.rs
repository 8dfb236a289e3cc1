use super::{FormSchema, SubmitRequest};
use crate::shared::api::{ApiError, RestClient, Transport};
use async_trait::async_trait;
use contracts::domain::common::{AggregateId, AggregateRoot};
use contracts::shared::validation::{validate, Draft, FieldErrors, ValidationContext};

/// Asynchronous step between the local checks and the request, allowed to
/// fill fields in or to block the submit.
#[async_trait(?Send)]
pub trait Enrich {
    async fn enrich(&self, draft: &mut Draft) -> Result<(), FieldErrors>;
}

pub struct NoEnrichment;

#[async_trait(?Send)]
impl Enrich for NoEnrichment {
    async fn enrich(&self, _draft: &mut Draft) -> Result<(), FieldErrors> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<R: AggregateRoot> {
    /// The backend stored the record; `edited` is the id that was updated
    Saved { record: R, edited: Option<R::Id> },
    /// The user declined the confirmation
    Cancelled,
    /// Enrichment or the final rules rejected the draft
    Blocked { errors: FieldErrors, draft: Draft },
    /// Request failed; the message is ready for display
    Failed(String),
}

/// Enrich, re-check, confirm, then create or update.
pub async fn execute<S, T>(
    api: &RestClient<T>,
    request: SubmitRequest<S>,
    enrich: &dyn Enrich,
    ctx: &ValidationContext,
    confirm: &dyn Fn(&str) -> bool,
) -> SubmitOutcome<S::Record>
where
    S: FormSchema,
    T: Transport,
{
    let SubmitRequest {
        mut draft,
        editing,
        confirmation,
    } = request;

    if let Err(errors) = enrich.enrich(&mut draft).await {
        return SubmitOutcome::Blocked { errors, draft };
    }

    let errors = validate(S::final_rules(), &draft, ctx);
    if !errors.is_empty() {
        return SubmitOutcome::Blocked { errors, draft };
    }

    if let Some(question) = confirmation {
        if !confirm(&question) {
            return SubmitOutcome::Cancelled;
        }
    }

    let payload = match S::payload(&draft) {
        Ok(payload) => payload,
        Err(e) => {
            log::error!("Payload de {} inválido: {}", S::Record::full_name(), e);
            return SubmitOutcome::Failed(S::messages().save_failed.to_string());
        }
    };

    let collection = S::Record::collection_path();
    let result: Result<S::Record, ApiError> = match editing {
        Some(id) => api.update(&collection, &id.as_string(), &payload).await,
        None => api.create(&collection, &payload).await,
    };

    match result {
        Ok(record) => SubmitOutcome::Saved {
            record,
            edited: editing,
        },
        Err(e) => {
            log::warn!("Error guardando {}: {}", S::Record::full_name(), e);
            SubmitOutcome::Failed(e.save_message(S::messages()))
        }
    }
}
