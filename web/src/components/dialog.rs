//! Minimal modal dialog overlay.

use leptos::*;

/// Backdrop + panel, rendered while `open` is true. Clicking the backdrop
/// or the close button fires `on_close`; the parent owns the open signal.
#[component]
pub fn Dialog(
    open: ReadSignal<bool>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] title: String,
    children: ChildrenFn,
) -> impl IntoView {
    move || {
        if !open.get() {
            return None;
        }
        Some(view! {
            <div class="dialog-backdrop" on:click=move |_| on_close.call(())></div>
            <div class="dialog" role="dialog">
                <div class="dialog-header">
                    <h2 class="dialog-title">{title.clone()}</h2>
                    <button class="dialog-close" on:click=move |_| on_close.call(())>
                        "✕"
                    </button>
                </div>
                <div class="dialog-body">{children()}</div>
            </div>
        })
    }
}
