use super::FieldError;
use leptos::prelude::*;

/// Input component with label and error support
#[component]
pub fn Input(
    /// Label text (optional)
    #[prop(optional, into)]
    label: MaybeProp<String>,
    /// Input value
    #[prop(into)]
    value: Signal<String>,
    /// Input event handler
    #[prop(optional)]
    on_input: Option<Callback<String>>,
    /// Placeholder text
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    /// Input type: "text" (default), "number", "email", "date", ...
    #[prop(optional, into)]
    input_type: MaybeProp<String>,
    /// Fixed text shown before the control (e.g. a phone prefix)
    #[prop(optional, into)]
    prefix: MaybeProp<String>,
    /// Disabled state
    #[prop(optional, into)]
    disabled: Signal<bool>,
    /// Field error, if any
    #[prop(optional, into)]
    error: Signal<Option<String>>,
    /// ID for the input element
    #[prop(optional, into)]
    id: MaybeProp<String>,
) -> impl IntoView {
    let input_id = move || id.get().unwrap_or_default();
    let input_placeholder = move || placeholder.get().unwrap_or_default();
    let input_t = move || input_type.get().unwrap_or_else(|| "text".to_string());
    let input_class = move || {
        if error.with(Option::is_some) {
            "form__input form__input--invalid"
        } else {
            "form__input"
        }
    };

    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label" for=input_id>
                    {l}
                </label>
            })}
            <div class="form__control">
                {move || prefix.get().map(|p| view! { <span class="form__prefix">{p}</span> })}
                <input
                    id=input_id
                    class=input_class
                    type=input_t
                    prop:value=move || value.get()
                    placeholder=input_placeholder
                    disabled=move || disabled.get()
                    on:input=move |ev| {
                        if let Some(handler) = on_input {
                            handler.run(event_target_value(&ev));
                        }
                    }
                />
            </div>
            <FieldError error=error />
        </div>
    }
}
