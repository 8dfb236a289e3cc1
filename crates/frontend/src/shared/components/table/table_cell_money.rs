use crate::shared::date_utils::format_clp;
use leptos::prelude::*;
use thaw::*;

/// Right-aligned peso amount; a dash when the value is missing
#[component]
pub fn TableCellMoney(
    #[prop(into)] value: Signal<Option<f64>>,
    #[prop(optional, default = false)] bold: bool,
) -> impl IntoView {
    let formatted_text = move || match value.get() {
        Some(v) => format_clp(v),
        None => "—".to_string(),
    };
    let cell_style = if bold { "font-weight: 600" } else { "" };

    view! {
        <TableCell class="text-right">
            <span style=cell_style>{formatted_text}</span>
        </TableCell>
    }
}
