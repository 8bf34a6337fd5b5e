//! Root Leptos application component with routing.

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::components::nav::Nav;
use crate::components::toast::{provide_toasts, ToastHost};
use crate::pages::login::provide_session_user;
use crate::pages::{catalog::CatalogPage, login::LoginPage};

/// Server-side application state, provided as Leptos context for server
/// functions. The store and session capabilities are trait objects so tests
/// and alternative backends can substitute their own implementations.
#[derive(Clone)]
#[cfg(feature = "ssr")]
pub struct AppState {
    pub store: std::sync::Arc<dyn crate::server::store::SpeciesStore>,
    pub sessions: std::sync::Arc<dyn crate::server::store::SessionStore>,
    pub leptos_options: leptos::LeptosOptions,
}

/// Dummy state for the client – never actually constructed on WASM, but the
/// type must exist so server functions can reference it in their signatures.
#[derive(Clone, Debug)]
#[cfg(not(feature = "ssr"))]
pub struct AppState;

/// The root `<App/>` component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_toasts();
    provide_session_user();

    view! {
        <Stylesheet id="leptos" href="/pkg/taxa-web.css"/>
        <Title text="Taxa – Species Catalog"/>
        <Meta name="viewport" content="width=device-width, initial-scale=1"/>
        <Meta name="description" content="Community species catalog with authenticated editing"/>

        <Router>
            <Nav/>
            <main class="main-content">
                <Routes>
                    <Route path="/" view=CatalogPage/>
                    <Route path="/login" view=LoginPage/>
                </Routes>
            </main>
            <ToastHost/>
        </Router>
    }
}
