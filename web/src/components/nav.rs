//! Top navigation bar component with the session indicator.

use leptos::*;
use leptos_router::*;

use crate::pages::login::{log_out, SessionUserResource};

/// Site-wide navigation bar.
#[component]
pub fn Nav() -> impl IntoView {
    let SessionUserResource(user) = expect_context::<SessionUserResource>();

    let on_sign_out = move |_| {
        spawn_local(async move {
            let _ = log_out().await;
            user.refetch();
        });
    };

    view! {
        <nav class="nav-bar">
            <div class="nav-brand">
                <A href="/" class="nav-logo">"🌿 Taxa"</A>
            </div>
            <div class="nav-links">
                <A href="/" class="nav-link">"Catalog"</A>
                <Suspense fallback=|| ()>
                    {move || user.get().map(|res| match res {
                        Ok(Some(session)) => view! {
                            <span class="nav-user">{session.display_name}</span>
                            <button class="nav-link sign-out" on:click=on_sign_out>
                                "Sign Out"
                            </button>
                        }.into_view(),
                        _ => view! {
                            <A href="/login" class="nav-link">"Sign In"</A>
                        }.into_view(),
                    })}
                </Suspense>
            </div>
        </nav>
    }
}
