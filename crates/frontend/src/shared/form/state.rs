use super::FormSchema;
use super::SubmitOutcome;
use contracts::domain::common::AggregateRoot;
use contracts::shared::validation::{validate, Draft, FieldErrors, ValidationContext};
use std::marker::PhantomData;

type IdOf<S> = <<S as FormSchema>::Record as AggregateRoot>::Id;

/// Draft, errors and mode of one entity form
pub struct FormState<S: FormSchema> {
    pub draft: Draft,
    pub errors: FieldErrors,
    pub global_error: Option<String>,
    pub editing: Option<IdOf<S>>,
    pub visible: bool,
    original: Option<S::Record>,
    _schema: PhantomData<fn() -> S>,
}

impl<S: FormSchema> Default for FormState<S> {
    fn default() -> Self {
        Self {
            draft: S::empty_draft(),
            errors: FieldErrors::new(),
            global_error: None,
            editing: None,
            visible: false,
            original: None,
            _schema: PhantomData,
        }
    }
}

impl<S: FormSchema> Clone for FormState<S> {
    fn clone(&self) -> Self {
        Self {
            draft: self.draft.clone(),
            errors: self.errors.clone(),
            global_error: self.global_error.clone(),
            editing: self.editing,
            visible: self.visible,
            original: self.original.clone(),
            _schema: PhantomData,
        }
    }
}

/// Snapshot handed to [`super::execute`] once the local checks passed
pub struct SubmitRequest<S: FormSchema> {
    pub draft: Draft,
    pub editing: Option<IdOf<S>>,
    pub confirmation: Option<String>,
}

impl<S: FormSchema> FormState<S> {
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn original(&self) -> Option<&S::Record> {
        self.original.as_ref()
    }

    pub fn value(&self, field: &str) -> String {
        self.draft.get(field).cloned().unwrap_or_default()
    }

    pub fn error(&self, field: &str) -> Option<String> {
        self.errors.get(field).cloned()
    }

    pub fn open_create(&mut self) {
        *self = Self {
            visible: true,
            ..Self::default()
        };
    }

    /// Open the form on `record`. Records without an id cannot be updated,
    /// so the form stays closed for them.
    pub fn open_edit(&mut self, record: &S::Record) {
        let Some(id) = record.id() else {
            log::warn!("{} sin id, no se puede editar", S::Record::element_name());
            return;
        };
        *self = Self {
            draft: S::draft_from(record),
            editing: Some(id),
            original: Some(record.clone()),
            visible: true,
            ..Self::default()
        };
    }

    /// Drop the draft and hide the form
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Store a normalized value and clear the field's previous error
    /// along with the global one
    pub fn set_field(&mut self, field: &str, raw: &str) {
        if S::is_locked(field, self.is_editing()) {
            return;
        }
        let (value, advisory) = S::normalize(field, raw);
        self.global_error = None;
        self.errors.remove(field);
        if let Some(message) = advisory {
            self.errors.insert(field.to_string(), message);
        }
        self.draft.insert(field.to_string(), value);
        S::cascade(field, &mut self.draft);
    }

    /// Evaluate the rule table; `true` when the draft passes
    pub fn validate(&mut self, ctx: &ValidationContext) -> bool {
        self.errors = validate(S::rules(), &self.draft, ctx);
        self.errors.is_empty()
    }

    /// Local part of a submit: rules, then cross-field checks.
    /// `None` means the submit is blocked and the errors are set.
    pub fn prepare_submit(
        &mut self,
        ctx: &ValidationContext,
        existing: &[S::Record],
    ) -> Option<SubmitRequest<S>> {
        self.global_error = None;
        if !self.validate(ctx) {
            return None;
        }
        let errors = S::business_check(&self.draft, self.original.as_ref(), existing);
        if !errors.is_empty() {
            self.errors = errors;
            return None;
        }
        Some(SubmitRequest {
            draft: self.draft.clone(),
            editing: self.editing,
            confirmation: S::confirmation(&self.draft, self.original.as_ref()),
        })
    }

    /// Fold the outcome back into the form. Returns the saved record and
    /// the id it replaces, if it was an edit.
    pub fn complete_submit(
        &mut self,
        outcome: SubmitOutcome<S::Record>,
    ) -> Option<(Option<IdOf<S>>, S::Record)> {
        match outcome {
            SubmitOutcome::Saved { record, edited } => {
                self.cancel();
                Some((edited, record))
            }
            SubmitOutcome::Cancelled => None,
            SubmitOutcome::Blocked { errors, draft } => {
                self.draft = draft;
                self.errors = errors;
                None
            }
            SubmitOutcome::Failed(message) => {
                self.global_error = Some(message);
                None
            }
        }
    }
}
