//! Toast notifications – transient, dismissable messages shown in a fixed
//! corner overlay. Every failed lookup or rejected edit lands here.

use leptos::*;

/// One visible notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub detail: String,
}

/// Signal-backed toast stack, provided as context from the app root.
#[derive(Clone, Copy)]
pub struct Toasts {
    stack: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl Toasts {
    /// Push a notification. An empty `detail` renders as title-only.
    pub fn push(&self, title: impl Into<String>, detail: impl Into<String>) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        let toast = Toast {
            id,
            title: title.into(),
            detail: detail.into(),
        };
        self.stack.update(|stack| {
            stack.push(toast);
            // keep the overlay short; the oldest entry scrolls away
            if stack.len() > 4 {
                stack.remove(0);
            }
        });

        #[cfg(feature = "hydrate")]
        {
            let stack = self.stack;
            set_timeout(
                move || stack.update(|s| s.retain(|t| t.id != id)),
                std::time::Duration::from_secs(6),
            );
        }
    }

    pub fn dismiss(&self, id: u64) {
        self.stack.update(|stack| stack.retain(|t| t.id != id));
    }
}

/// Create the toast context. Called once from `App`.
pub fn provide_toasts() -> Toasts {
    let toasts = Toasts {
        stack: create_rw_signal(Vec::new()),
        next_id: create_rw_signal(0),
    };
    provide_context(toasts);
    toasts
}

/// Renders the current toast stack.
#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<Toasts>();

    view! {
        <div class="toast-stack">
            <For
                each=move || toasts.stack.get()
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    view! {
                        <div class="toast">
                            <div class="toast-body">
                                <p class="toast-title">{toast.title.clone()}</p>
                                {(!toast.detail.is_empty()).then(|| view! {
                                    <p class="toast-detail">{toast.detail.clone()}</p>
                                })}
                            </div>
                            <button class="toast-dismiss" on:click=move |_| toasts.dismiss(id)>
                                "✕"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
