//! Catalog page – every species as a summary card.

use leptos::*;

use taxa_common::SpeciesRecord;

use crate::components::species_card::SpeciesCard;

// ─── Server functions ────────────────────────────────────────────────────────

#[server(GetSpeciesCatalog, "/api")]
pub async fn get_species_catalog() -> Result<Vec<SpeciesRecord>, ServerFnError> {
    let state = use_context::<crate::app::AppState>()
        .ok_or_else(|| ServerFnError::new("Missing AppState"))?;
    state
        .store
        .list_species()
        .map_err(|e| ServerFnError::new(format!("DB error: {e}")))
}

// ─── Page component ──────────────────────────────────────────────────────────

/// Browse the whole catalog. This page owns the externally-fetched species
/// list; each card gets an invalidate-and-refetch callback for it, fired
/// after a successful edit.
#[component]
pub fn CatalogPage() -> impl IntoView {
    let species = create_resource(|| (), |_| async { get_species_catalog().await });
    let on_saved = Callback::new(move |_| species.refetch());

    view! {
        <div class="catalog-page">
            <h1>"Species Catalog"</h1>

            <Suspense fallback=move || view! { <p class="loading">"Loading species…"</p> }>
                {move || species.get().map(|res| match res {
                    Ok(list) => view! {
                        <div class="species-grid">
                            <For
                                each=move || list.clone()
                                key=|record| record.scientific_name.clone()
                                children=move |record: SpeciesRecord| {
                                    view! { <SpeciesCard species=record on_saved=on_saved /> }
                                }
                            />
                        </div>
                    }.into_view(),
                    Err(e) => view! {
                        <p class="error">"Error: " {e.to_string()}</p>
                    }.into_view(),
                })}
            </Suspense>
        </div>
    }
}
