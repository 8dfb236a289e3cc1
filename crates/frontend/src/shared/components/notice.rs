use leptos::prelude::*;
use thaw::*;

/// Success / error banners of a screen
#[component]
pub fn Notices(
    #[prop(into)] notice: Signal<Option<String>>,
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        {move || notice.get().map(|message| view! {
            <MessageBar intent=MessageBarIntent::Success>
                {message}
            </MessageBar>
        })}
        {move || error.get().map(|message| view! {
            <MessageBar intent=MessageBarIntent::Error>
                {message}
            </MessageBar>
        })}
    }
}
