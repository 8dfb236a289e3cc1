//! Reactive wrapper around [`FormState`] used by the screens.

use super::{execute, Enrich, FormSchema, FormState};
use crate::shared::api::{GlooTransport, RestClient};
use crate::shared::date_utils::today;
use crate::shared::dialogs;
use crate::shared::list_state::ListState;
use contracts::shared::validation::{is_checked, ValidationContext};
use leptos::prelude::*;
use leptos::task::spawn_local;

pub struct FormController<S: FormSchema> {
    pub form: RwSignal<FormState<S>>,
    pub saving: RwSignal<bool>,
}

impl<S: FormSchema> Clone for FormController<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: FormSchema> Copy for FormController<S> {}

impl<S: FormSchema> FormController<S> {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(FormState::default()),
            saving: RwSignal::new(false),
        }
    }

    pub fn value(self, field: &'static str) -> Signal<String> {
        let form = self.form;
        Signal::derive(move || form.with(|f| f.value(field)))
    }

    pub fn error(self, field: &'static str) -> Signal<Option<String>> {
        let form = self.form;
        Signal::derive(move || form.with(|f| f.error(field)))
    }

    pub fn checked(self, field: &'static str) -> Signal<bool> {
        let form = self.form;
        Signal::derive(move || form.with(|f| is_checked(&f.draft, field)))
    }

    pub fn is_visible(self) -> Signal<bool> {
        let form = self.form;
        Signal::derive(move || form.with(|f| f.visible))
    }

    pub fn is_editing(self) -> Signal<bool> {
        let form = self.form;
        Signal::derive(move || form.with(|f| f.is_editing()))
    }

    /// Whether `field` is read-only in the current mode
    pub fn is_locked(self, field: &'static str) -> Signal<bool> {
        let form = self.form;
        Signal::derive(move || form.with(|f| S::is_locked(field, f.is_editing())))
    }

    pub fn global_error(self) -> Signal<Option<String>> {
        let form = self.form;
        Signal::derive(move || form.with(|f| f.global_error.clone()))
    }

    pub fn set(self, field: &str, raw: &str) {
        self.form.update(|f| f.set_field(field, raw));
    }

    pub fn on_input(self, field: &'static str) -> Callback<String> {
        Callback::new(move |raw: String| self.set(field, &raw))
    }

    pub fn on_toggle(self, field: &'static str) -> Callback<bool> {
        Callback::new(move |on: bool| self.set(field, if on { "true" } else { "false" }))
    }

    pub fn open_create(self) {
        self.form.update(|f| f.open_create());
    }

    pub fn open_edit(self, record: &S::Record) {
        self.form.update(|f| f.open_edit(record));
    }

    pub fn cancel(self) {
        self.form.update(|f| f.cancel());
    }

    /// Validate locally, then run the asynchronous part of the submit and
    /// fold a saved record into `list`.
    pub fn submit<E>(self, api: RestClient<GlooTransport>, enrich: E, list: RwSignal<ListState<S::Record>>)
    where
        E: Enrich + 'static,
    {
        if self.saving.get_untracked() {
            return;
        }
        let ctx = ValidationContext::new(today());
        let existing = list.with_untracked(|l| l.items.clone());
        let mut request = None;
        self.form.update(|f| request = f.prepare_submit(&ctx, &existing));
        let Some(request) = request else {
            return;
        };

        self.saving.set(true);
        spawn_local(async move {
            let outcome = execute(&api, request, &enrich, &ctx, &dialogs::confirm).await;
            let mut saved = None;
            self.form.update(|f| saved = f.complete_submit(outcome));
            if let Some((edited, record)) = saved {
                let messages = S::messages();
                list.update(|l| {
                    l.notice = Some(
                        if edited.is_some() { messages.updated } else { messages.created }.to_string(),
                    );
                    l.error = None;
                    l.apply_mutation(edited, record);
                });
            }
            self.saving.set(false);
        });
    }
}

impl<S: FormSchema> Default for FormController<S> {
    fn default() -> Self {
        Self::new()
    }
}
