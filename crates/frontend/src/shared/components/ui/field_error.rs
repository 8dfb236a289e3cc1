use leptos::prelude::*;

/// Message under a form control; renders nothing without an error
#[component]
pub fn FieldError(#[prop(into)] error: Signal<Option<String>>) -> impl IntoView {
    move || {
        error
            .get()
            .map(|message| view! { <span class="form__error">{message}</span> })
    }
}
