//! Species summary card with a detail dialog and an author-gated edit form.
//!
//! The card renders a truncated summary of one record. "Learn More" fetches
//! the full row plus its author profile and opens the detail dialog; "Edit
//! Species" probes ownership first and only opens the pre-filled form for
//! the entry's author. Both fetches are fire-per-click with no in-flight
//! guard, so the last response to arrive wins.

use leptos::ev::SubmitEvent;
use leptos::*;

use taxa_common::{validate, FieldErrors, Kingdom, SpeciesDraft, SpeciesRecord};

use crate::components::dialog::Dialog;
use crate::components::toast::Toasts;
use crate::model::{DetailLookup, EditAccess, SaveOutcome, SpeciesDetail};

// ─── Server functions ────────────────────────────────────────────────────────

#[server(FetchSpeciesDetail, "/api")]
pub async fn fetch_species_detail(
    scientific_name: String,
) -> Result<DetailLookup, ServerFnError> {
    use crate::server::catalog;
    let state = use_context::<crate::app::AppState>()
        .ok_or_else(|| ServerFnError::new("Missing AppState"))?;
    catalog::species_detail(state.store.as_ref(), &scientific_name)
        .map_err(|e| ServerFnError::new(format!("DB error: {e}")))
}

#[server(OpenSpeciesEdit, "/api")]
pub async fn open_species_edit(scientific_name: String) -> Result<EditAccess, ServerFnError> {
    use crate::server::{auth, catalog};
    let state = use_context::<crate::app::AppState>()
        .ok_or_else(|| ServerFnError::new("Missing AppState"))?;
    let caller = auth::current_profile(&state).await?;
    catalog::edit_access(state.store.as_ref(), caller.as_deref(), &scientific_name)
        .map_err(|e| ServerFnError::new(format!("DB error: {e}")))
}

#[server(SaveSpeciesEdit, "/api")]
pub async fn save_species_edit(
    scientific_name: String,
    draft: SpeciesDraft,
) -> Result<SaveOutcome, ServerFnError> {
    use crate::server::{auth, catalog};
    let state = use_context::<crate::app::AppState>()
        .ok_or_else(|| ServerFnError::new("Missing AppState"))?;
    let caller = auth::current_profile(&state).await?;
    catalog::save_edit(state.store.as_ref(), caller.as_deref(), &scientific_name, &draft)
        .map_err(|e| ServerFnError::new(format!("DB error: {e}")))
}

// ─── Card component ──────────────────────────────────────────────────────────

/// One catalog entry: summary at rest, dialogs on demand.
#[component]
pub fn SpeciesCard(
    species: SpeciesRecord,
    /// Invalidate-and-refetch capability supplied by the hosting page,
    /// invoked after a successful edit.
    #[prop(optional, into)]
    on_saved: Option<Callback<()>>,
) -> impl IntoView {
    let toasts = expect_context::<Toasts>();

    // The pre-edit name every lookup is keyed on; stored so the click
    // handlers stay `Copy`.
    let card_name = store_value(species.scientific_name.clone());

    let (detail, set_detail) = create_signal::<Option<SpeciesDetail>>(None);
    let (detail_open, set_detail_open) = create_signal(false);
    let (edit_open, set_edit_open) = create_signal(false);

    // Edit form fields, populated from the probe's snapshot.
    let (f_scientific, set_f_scientific) = create_signal(String::new());
    let (f_common, set_f_common) = create_signal(String::new());
    let (f_kingdom, set_f_kingdom) = create_signal(Kingdom::Animalia.to_string());
    let (f_population, set_f_population) = create_signal(String::new());
    let (f_image, set_f_image) = create_signal(String::new());
    let (f_description, set_f_description) = create_signal(String::new());
    let (errors, set_errors) = create_signal(FieldErrors::default());

    // ── Learn More: two-step lookup, dialog only on a full hit ──
    let on_learn_more = move |_| {
        spawn_local(async move {
            match fetch_species_detail(card_name.get_value()).await {
                Ok(DetailLookup::Found(found)) => {
                    set_detail.set(Some(found));
                    set_detail_open.set(true);
                }
                Ok(DetailLookup::SpeciesMissing) => {
                    toasts.push("Something went wrong", "Species not represented in database");
                }
                Ok(DetailLookup::AuthorMissing) => {
                    toasts.push("No record of author", "The entry's author has no profile");
                }
                Err(e) => toasts.push("Something went wrong", e.to_string()),
            }
        });
    };

    // ── Edit: ownership probe, form only for the author ──
    let on_edit = move |_| {
        spawn_local(async move {
            match open_species_edit(card_name.get_value()).await {
                Ok(EditAccess::Granted(record)) => {
                    let defaults = SpeciesDraft::from_record(&record);
                    set_f_scientific.set(defaults.scientific_name);
                    set_f_common.set(defaults.common_name);
                    set_f_kingdom.set(defaults.kingdom);
                    set_f_population.set(defaults.total_population);
                    set_f_image.set(defaults.image);
                    set_f_description.set(defaults.description);
                    set_errors.set(FieldErrors::default());
                    set_edit_open.set(true);
                }
                Ok(EditAccess::Unauthenticated) => {
                    toasts.push("Authentication failed", "Sign in to edit your entries");
                }
                Ok(EditAccess::NotYours) => {
                    toasts.push("You must author the entry to change it", "");
                }
                Err(e) => toasts.push("Something went wrong", e.to_string()),
            }
        });
    };

    // ── Submit: local validation gates the request entirely ──
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let draft = SpeciesDraft {
            scientific_name: f_scientific.get(),
            common_name: f_common.get(),
            kingdom: f_kingdom.get(),
            total_population: f_population.get(),
            image: f_image.get(),
            description: f_description.get(),
        };
        let validated = match validate(&draft) {
            Ok(validated) => validated,
            Err(field_errors) => {
                set_errors.set(field_errors);
                return;
            }
        };
        set_errors.set(FieldErrors::default());

        spawn_local(async move {
            match save_species_edit(card_name.get_value(), draft).await {
                Ok(SaveOutcome::Saved) => {
                    // Reset the form to the post-transform values so the
                    // next open shows what was actually stored.
                    set_f_scientific.set(validated.scientific_name.clone());
                    set_f_common.set(validated.common_name.clone().unwrap_or_default());
                    set_f_kingdom.set(validated.kingdom.to_string());
                    set_f_population.set(
                        validated
                            .total_population
                            .map(|p| p.to_string())
                            .unwrap_or_default(),
                    );
                    set_f_image.set(validated.image.clone().unwrap_or_default());
                    set_f_description.set(validated.description.clone().unwrap_or_default());
                    set_edit_open.set(false);
                    if let Some(on_saved) = on_saved {
                        on_saved.call(());
                    }
                }
                Ok(SaveOutcome::Unauthenticated) => {
                    toasts.push("Authentication failed", "Sign in to edit your entries");
                }
                Ok(SaveOutcome::NotYours) => {
                    toasts.push("Can not modify other people's entries", "");
                }
                Ok(SaveOutcome::Invalid(field_errors)) => set_errors.set(field_errors),
                Err(e) => toasts.push("Could not update species", e.to_string()),
            }
        });
    };

    let preview = species.description_preview();

    view! {
        <div class="species-card">
            {species.image.clone().map(|src| view! {
                <div class="species-img-wrap">
                    <img
                        src={src}
                        alt={species.scientific_name.clone()}
                        class="species-img"
                        loading="lazy"
                    />
                </div>
            })}
            <div class="species-card-body">
                <h3 class="species-common">{species.common_name.clone().unwrap_or_default()}</h3>
                <h4 class="species-sci">{species.scientific_name.clone()}</h4>
                <p class="species-preview">{preview}</p>
                <button class="btn card-btn" on:click=on_learn_more>"Learn More"</button>
                <button class="btn card-btn secondary" on:click=on_edit>"Edit Species"</button>
            </div>

            <Dialog
                open=detail_open
                on_close=move |_| set_detail_open.set(false)
                title="Detailed View"
            >
                {move || detail.get().map(|found| {
                    let population = found
                        .species
                        .total_population
                        .map(|p| p.to_string())
                        .unwrap_or_default();
                    view! {
                        <div class="species-detail">
                            <p>
                                <span class="detail-label">"Scientific Name: "</span>
                                {found.species.scientific_name.clone()}
                            </p>
                            <p>
                                <span class="detail-label">"Common Name: "</span>
                                {found.species.common_name.clone().unwrap_or_default()}
                            </p>
                            <p>
                                <span class="detail-label">"Total Population: "</span>
                                {population}
                            </p>
                            <p>
                                <span class="detail-label">"Kingdom: "</span>
                                {found.species.kingdom.to_string()}
                            </p>
                            <p>
                                <span class="detail-label">"Description: "</span>
                                {found.species.description.clone().unwrap_or_default()}
                            </p>
                            <p>
                                <span class="detail-label">"Author: "</span>
                                {found.author_name.clone()}
                            </p>
                            <p>
                                <span class="detail-label">"Contact: "</span>
                                {found.author_email.clone()}
                            </p>
                        </div>
                    }
                })}
            </Dialog>

            <Dialog
                open=edit_open
                on_close=move |_| set_edit_open.set(false)
                title="Edit Species"
            >
                <form class="edit-form" on:submit=on_submit>
                    <label class="form-field">
                        <span class="form-label">"Scientific Name"</span>
                        <input
                            type="text"
                            prop:value=move || f_scientific.get()
                            on:input=move |ev| set_f_scientific.set(event_target_value(&ev))
                        />
                        {move || errors.get().scientific_name.map(|msg| view! {
                            <p class="field-error">{msg}</p>
                        })}
                    </label>

                    <label class="form-field">
                        <span class="form-label">"Common Name"</span>
                        <input
                            type="text"
                            prop:value=move || f_common.get()
                            on:input=move |ev| set_f_common.set(event_target_value(&ev))
                        />
                        {move || errors.get().common_name.map(|msg| view! {
                            <p class="field-error">{msg}</p>
                        })}
                    </label>

                    <label class="form-field">
                        <span class="form-label">"Kingdom"</span>
                        <select
                            prop:value=move || f_kingdom.get()
                            on:change=move |ev| set_f_kingdom.set(event_target_value(&ev))
                        >
                            {Kingdom::ALL
                                .iter()
                                .map(|kingdom| view! {
                                    <option value={kingdom.as_str()}>{kingdom.as_str()}</option>
                                })
                                .collect_view()}
                        </select>
                        {move || errors.get().kingdom.map(|msg| view! {
                            <p class="field-error">{msg}</p>
                        })}
                    </label>

                    <label class="form-field">
                        <span class="form-label">"Total Population"</span>
                        <input
                            type="number"
                            min="1"
                            prop:value=move || f_population.get()
                            on:input=move |ev| set_f_population.set(event_target_value(&ev))
                        />
                        {move || errors.get().total_population.map(|msg| view! {
                            <p class="field-error">{msg}</p>
                        })}
                    </label>

                    <label class="form-field">
                        <span class="form-label">"Image URL"</span>
                        <input
                            type="text"
                            prop:value=move || f_image.get()
                            on:input=move |ev| set_f_image.set(event_target_value(&ev))
                        />
                        {move || errors.get().image.map(|msg| view! {
                            <p class="field-error">{msg}</p>
                        })}
                    </label>

                    <label class="form-field">
                        <span class="form-label">"Description"</span>
                        <textarea
                            rows="4"
                            prop:value=move || f_description.get()
                            on:input=move |ev| set_f_description.set(event_target_value(&ev))
                        ></textarea>
                        {move || errors.get().description.map(|msg| view! {
                            <p class="field-error">{msg}</p>
                        })}
                    </label>

                    <div class="form-actions">
                        <button type="submit" class="btn">"Save Changes"</button>
                        <button
                            type="button"
                            class="btn secondary"
                            on:click=move |_| set_edit_open.set(false)
                        >
                            "Cancel"
                        </button>
                    </div>
                </form>
            </Dialog>
        </div>
    }
}
