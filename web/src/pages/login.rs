//! Sign-in page and session server functions.

use leptos::*;
use leptos_router::{use_navigate, NavigateOptions};

use crate::components::toast::Toasts;
use crate::model::SessionUser;

// ─── Session context ─────────────────────────────────────────────────────────

/// App-wide resource over the signed-in user, shared by the nav and the
/// login page so a sign-in/out refreshes the indicator everywhere.
#[derive(Clone, Copy)]
pub struct SessionUserResource(pub Resource<(), Result<Option<SessionUser>, ServerFnError>>);

/// Create the session-user resource and put it in context. Called once
/// from `App`.
pub fn provide_session_user() {
    let resource = create_resource(|| (), |_| async { current_user().await });
    provide_context(SessionUserResource(resource));
}

// ─── Server functions ────────────────────────────────────────────────────────

/// Verify credentials and establish a session cookie. Returns false on a
/// bad email/password pair.
#[server(LogIn, "/api")]
pub async fn log_in(email: String, password: String) -> Result<bool, ServerFnError> {
    use crate::server::auth;
    let state = use_context::<crate::app::AppState>()
        .ok_or_else(|| ServerFnError::new("Missing AppState"))?;

    let Some((profile_id, password_hash)) = state
        .sessions
        .credentials_by_email(email.trim())
        .map_err(|e| ServerFnError::new(format!("DB error: {e}")))?
    else {
        return Ok(false);
    };

    if !auth::verify_password(&password, &password_hash)
        .map_err(|e| ServerFnError::new(e.to_string()))?
    {
        return Ok(false);
    }

    let token = state
        .sessions
        .create_session(&profile_id)
        .map_err(|e| ServerFnError::new(format!("DB error: {e}")))?;

    let response = expect_context::<leptos_axum::ResponseOptions>();
    response.insert_header(
        axum::http::header::SET_COOKIE,
        axum::http::HeaderValue::from_str(&auth::session_cookie(&token))
            .map_err(|e| ServerFnError::new(e.to_string()))?,
    );
    tracing::info!(profile = %profile_id, "signed in");
    Ok(true)
}

/// Tear the current session down and clear its cookie.
#[server(LogOut, "/api")]
pub async fn log_out() -> Result<(), ServerFnError> {
    use crate::server::auth;
    let state = use_context::<crate::app::AppState>()
        .ok_or_else(|| ServerFnError::new("Missing AppState"))?;

    let headers: axum::http::HeaderMap = leptos_axum::extract().await?;
    if let Some(token) = auth::session_token(&headers) {
        state
            .sessions
            .delete_session(&token)
            .map_err(|e| ServerFnError::new(format!("DB error: {e}")))?;
    }

    let response = expect_context::<leptos_axum::ResponseOptions>();
    response.insert_header(
        axum::http::header::SET_COOKIE,
        axum::http::HeaderValue::from_str(&auth::clear_session_cookie())
            .map_err(|e| ServerFnError::new(e.to_string()))?,
    );
    Ok(())
}

/// The signed-in user's display data, or None without a live session.
#[server(CurrentUser, "/api")]
pub async fn current_user() -> Result<Option<SessionUser>, ServerFnError> {
    use crate::server::auth;
    let state = use_context::<crate::app::AppState>()
        .ok_or_else(|| ServerFnError::new("Missing AppState"))?;

    let Some(profile_id) = auth::current_profile(&state).await? else {
        return Ok(None);
    };
    let profile = state
        .store
        .author_profile(&profile_id)
        .map_err(|e| ServerFnError::new(format!("DB error: {e}")))?;
    Ok(profile.map(|p| SessionUser {
        display_name: p.display_name,
    }))
}

// ─── Page component ──────────────────────────────────────────────────────────

/// Email + password sign-in form.
#[component]
pub fn LoginPage() -> impl IntoView {
    let toasts = expect_context::<Toasts>();
    let SessionUserResource(user) = expect_context::<SessionUserResource>();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());

    let navigate = use_navigate();
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let email_value = email.get();
        let password_value = password.get();
        let navigate = navigate.clone();
        spawn_local(async move {
            match log_in(email_value, password_value).await {
                Ok(true) => {
                    user.refetch();
                    navigate("/", NavigateOptions::default());
                }
                Ok(false) => {
                    toasts.push("Authentication failed", "Check your email and password");
                }
                Err(e) => toasts.push("Authentication failed", e.to_string()),
            }
        });
    };

    view! {
        <div class="login-page">
            <h1>"Sign In"</h1>
            <form class="login-form" on:submit=on_submit>
                <label class="form-field">
                    <span class="form-label">"Email"</span>
                    <input
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </label>
                <label class="form-field">
                    <span class="form-label">"Password"</span>
                    <input
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" class="btn">"Sign In"</button>
            </form>
        </div>
    }
}
