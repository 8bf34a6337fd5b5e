//! Catalog workflows: the detail lookup and the authorization-gated edit
//! path, written against the store traits so tests drive them with an
//! in-memory fake.

use taxa_common::{validate, SpeciesDraft};

use crate::model::{DetailLookup, EditAccess, SaveOutcome, SpeciesDetail};
use crate::server::store::{SpeciesStore, StoreError};

/// Point lookup by scientific name, then join the author's profile.
///
/// The detail dialog may only open on `Found`; each miss maps to its own
/// notification on the client.
pub fn species_detail(
    store: &dyn SpeciesStore,
    scientific_name: &str,
) -> Result<DetailLookup, StoreError> {
    let Some(species) = store.species_by_name(scientific_name)? else {
        return Ok(DetailLookup::SpeciesMissing);
    };
    let Some(author) = store.author_profile(&species.author)? else {
        return Ok(DetailLookup::AuthorMissing);
    };
    Ok(DetailLookup::Found(SpeciesDetail {
        species,
        author_name: author.display_name,
        author_email: author.email,
    }))
}

/// Edit-authorization probe: a single lookup filtered by both the
/// scientific name and the caller's identity. A hit doubles as permission
/// and supplies the form's default values.
pub fn edit_access(
    store: &dyn SpeciesStore,
    caller: Option<&str>,
    scientific_name: &str,
) -> Result<EditAccess, StoreError> {
    let Some(caller) = caller else {
        return Ok(EditAccess::Unauthenticated);
    };
    match store.species_owned_by(scientific_name, caller)? {
        Some(record) => Ok(EditAccess::Granted(record)),
        None => Ok(EditAccess::NotYours),
    }
}

/// Submit an edit: re-check identity, re-validate the draft, re-run the
/// ownership probe against the card's pre-edit name, then write the row
/// matching the submitted name with the author reassigned to the caller.
pub fn save_edit(
    store: &dyn SpeciesStore,
    caller: Option<&str>,
    card_name: &str,
    draft: &SpeciesDraft,
) -> Result<SaveOutcome, StoreError> {
    let Some(caller) = caller else {
        return Ok(SaveOutcome::Unauthenticated);
    };
    let values = match validate(draft) {
        Ok(values) => values,
        Err(errors) => return Ok(SaveOutcome::Invalid(errors)),
    };
    if store.species_owned_by(card_name, caller)?.is_none() {
        return Ok(SaveOutcome::NotYours);
    }
    // The update is keyed on the submitted name. Renaming an entry matches
    // no row, which surfaces as an error instead of a silent no-op.
    if !store.update_species(&values.scientific_name, &values, caller)? {
        return Err(StoreError::Backend(format!(
            "no entry matches the scientific name {:?}",
            values.scientific_name
        )));
    }
    tracing::info!(species = %values.scientific_name, author = %caller, "species updated");
    Ok(SaveOutcome::Saved)
}

// ─── tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use taxa_common::{AuthorProfile, Kingdom, SpeciesRecord, ValidatedSpecies};

    use super::*;

    /// In-memory stand-in for the SQLite store, with an update-call counter
    /// so tests can assert that rejected submissions never write.
    struct MemStore {
        species: Mutex<Vec<SpeciesRecord>>,
        profiles: Vec<AuthorProfile>,
        update_calls: Mutex<u32>,
    }

    impl MemStore {
        fn with_raven() -> Self {
            MemStore {
                species: Mutex::new(vec![raven()]),
                profiles: vec![AuthorProfile {
                    id: "ada".into(),
                    display_name: "Ada".into(),
                    email: "ada@example.org".into(),
                }],
                update_calls: Mutex::new(0),
            }
        }

        fn update_calls(&self) -> u32 {
            *self.update_calls.lock().unwrap()
        }

        fn raven_row(&self) -> SpeciesRecord {
            self.species.lock().unwrap()[0].clone()
        }
    }

    fn raven() -> SpeciesRecord {
        SpeciesRecord {
            scientific_name: "Corvus corax".into(),
            common_name: Some("Common raven".into()),
            description: Some("Large all-black passerine.".into()),
            kingdom: Kingdom::Animalia,
            total_population: Some(16_000_000),
            image: None,
            author: "ada".into(),
        }
    }

    fn raven_draft() -> SpeciesDraft {
        SpeciesDraft {
            scientific_name: "Corvus corax".into(),
            common_name: "Common raven".into(),
            kingdom: "Animalia".into(),
            total_population: "16000000".into(),
            image: "".into(),
            description: "Large all-black passerine.".into(),
        }
    }

    impl SpeciesStore for MemStore {
        fn list_species(&self) -> Result<Vec<SpeciesRecord>, StoreError> {
            Ok(self.species.lock().unwrap().clone())
        }

        fn species_by_name(
            &self,
            scientific_name: &str,
        ) -> Result<Option<SpeciesRecord>, StoreError> {
            Ok(self
                .species
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.scientific_name == scientific_name)
                .cloned())
        }

        fn species_owned_by(
            &self,
            scientific_name: &str,
            author: &str,
        ) -> Result<Option<SpeciesRecord>, StoreError> {
            Ok(self
                .species
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.scientific_name == scientific_name && r.author == author)
                .cloned())
        }

        fn author_profile(&self, id: &str) -> Result<Option<AuthorProfile>, StoreError> {
            Ok(self.profiles.iter().find(|p| p.id == id).cloned())
        }

        fn update_species(
            &self,
            scientific_name: &str,
            values: &ValidatedSpecies,
            author: &str,
        ) -> Result<bool, StoreError> {
            *self.update_calls.lock().unwrap() += 1;
            let mut rows = self.species.lock().unwrap();
            match rows.iter_mut().find(|r| r.scientific_name == scientific_name) {
                Some(row) => {
                    *row = SpeciesRecord {
                        scientific_name: values.scientific_name.clone(),
                        common_name: values.common_name.clone(),
                        description: values.description.clone(),
                        kingdom: values.kingdom,
                        total_population: values.total_population,
                        image: values.image.clone(),
                        author: author.to_string(),
                    };
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }

    // ── detail lookup ──

    #[test]
    fn test_detail_missing_species() {
        let store = MemStore::with_raven();
        let outcome = species_detail(&store, "Corvus nowhere").unwrap();
        assert_eq!(outcome, DetailLookup::SpeciesMissing);
    }

    #[test]
    fn test_detail_missing_author_profile() {
        let store = MemStore::with_raven();
        store.species.lock().unwrap()[0].author = "ghost".into();
        let outcome = species_detail(&store, "Corvus corax").unwrap();
        assert_eq!(outcome, DetailLookup::AuthorMissing);
    }

    #[test]
    fn test_detail_found_carries_author_contact() {
        let store = MemStore::with_raven();
        let DetailLookup::Found(detail) = species_detail(&store, "Corvus corax").unwrap() else {
            panic!("expected Found");
        };
        assert_eq!(detail.species, raven());
        assert_eq!(detail.author_name, "Ada");
        assert_eq!(detail.author_email, "ada@example.org");
    }

    // ── edit probe ──

    #[test]
    fn test_probe_requires_identity() {
        let store = MemStore::with_raven();
        let outcome = edit_access(&store, None, "Corvus corax").unwrap();
        assert_eq!(outcome, EditAccess::Unauthenticated);
    }

    #[test]
    fn test_probe_never_grants_non_author() {
        let store = MemStore::with_raven();
        for _ in 0..5 {
            let outcome = edit_access(&store, Some("eve"), "Corvus corax").unwrap();
            assert_eq!(outcome, EditAccess::NotYours);
        }
    }

    #[test]
    fn test_probe_grants_author_the_prefill_snapshot() {
        let store = MemStore::with_raven();
        let outcome = edit_access(&store, Some("ada"), "Corvus corax").unwrap();
        assert_eq!(outcome, EditAccess::Granted(raven()));
    }

    // ── submission ──

    #[test]
    fn test_save_requires_identity() {
        let store = MemStore::with_raven();
        let outcome = save_edit(&store, None, "Corvus corax", &raven_draft()).unwrap();
        assert_eq!(outcome, SaveOutcome::Unauthenticated);
        assert_eq!(store.update_calls(), 0);
    }

    #[test]
    fn test_save_whitespace_name_never_reaches_update() {
        let store = MemStore::with_raven();
        let mut draft = raven_draft();
        draft.scientific_name = " ".into();
        let outcome = save_edit(&store, Some("ada"), "Corvus corax", &draft).unwrap();
        let SaveOutcome::Invalid(errors) = outcome else {
            panic!("expected Invalid");
        };
        assert!(errors.scientific_name.is_some());
        assert_eq!(store.update_calls(), 0);
    }

    #[test]
    fn test_save_non_author_rejected_without_write() {
        let store = MemStore::with_raven();
        let outcome = save_edit(&store, Some("eve"), "Corvus corax", &raven_draft()).unwrap();
        assert_eq!(outcome, SaveOutcome::NotYours);
        assert_eq!(store.update_calls(), 0);
    }

    #[test]
    fn test_save_blank_common_name_stored_as_null() {
        let store = MemStore::with_raven();
        let mut draft = raven_draft();
        draft.common_name = "".into();
        let outcome = save_edit(&store, Some("ada"), "Corvus corax", &draft).unwrap();
        assert_eq!(outcome, SaveOutcome::Saved);
        assert_eq!(store.raven_row().common_name, None);
    }

    #[test]
    fn test_save_reassigns_author_to_caller() {
        // "ada" owns the row; after her save the author is still ada, and a
        // save always writes the submitting caller's id.
        let store = MemStore::with_raven();
        save_edit(&store, Some("ada"), "Corvus corax", &raven_draft()).unwrap();
        assert_eq!(store.raven_row().author, "ada");
    }

    #[test]
    fn test_save_same_input_twice_is_idempotent() {
        let store = MemStore::with_raven();
        let draft = raven_draft();

        assert_eq!(
            save_edit(&store, Some("ada"), "Corvus corax", &draft).unwrap(),
            SaveOutcome::Saved
        );
        let after_first = store.raven_row();

        assert_eq!(
            save_edit(&store, Some("ada"), "Corvus corax", &draft).unwrap(),
            SaveOutcome::Saved
        );
        assert_eq!(store.raven_row(), after_first);
        assert_eq!(after_first.author, "ada");
        assert_eq!(store.update_calls(), 2);
    }

    #[test]
    fn test_save_trims_submitted_values() {
        let store = MemStore::with_raven();
        let mut draft = raven_draft();
        draft.common_name = "  Northern raven  ".into();
        save_edit(&store, Some("ada"), "Corvus corax", &draft).unwrap();
        assert_eq!(store.raven_row().common_name.as_deref(), Some("Northern raven"));
    }

    #[test]
    fn test_save_rename_surfaces_backend_error() {
        let store = MemStore::with_raven();
        let mut draft = raven_draft();
        draft.scientific_name = "Corvus renamed".into();
        let err = save_edit(&store, Some("ada"), "Corvus corax", &draft).unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
        // the probe passed; the keyed update found nothing to write
        assert_eq!(store.raven_row(), raven());
    }
}
