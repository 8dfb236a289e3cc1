use leptos::prelude::*;

/// Header of a screen: icon, title, optional counter and action buttons
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] icon: Option<&'static str>,
    /// Number of records shown next to the title
    #[prop(optional, into)]
    count: MaybeProp<usize>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="page__header">
            <div class="page__header-left">
                {icon.map(crate::shared::icons::icon)}
                <h1 class="page__title">{title}</h1>
                {move || count.get().map(|n| view! { <span class="page__count">{n}</span> })}
            </div>
            <div class="page__header-right">
                {children.map(|c| c())}
            </div>
        </div>
    }
}
