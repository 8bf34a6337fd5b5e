//! Edit-form validation: raw draft in, normalized typed values out.
//!
//! The same function runs in the browser (gating submission, feeding the
//! inline field errors) and on the server (re-checking whatever arrives on
//! the wire), so the normalization rules live in exactly one place.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::species::Kingdom;

// ─── Draft input ─────────────────────────────────────────────────────────────

/// Raw snapshot of the edit form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDraft {
    pub scientific_name: String,
    pub common_name: String,
    pub kingdom: String,
    pub total_population: String,
    pub image: String,
    pub description: String,
}

impl SpeciesDraft {
    /// Pre-fill a draft from an existing record (the edit dialog's defaults).
    pub fn from_record(record: &crate::species::SpeciesRecord) -> Self {
        SpeciesDraft {
            scientific_name: record.scientific_name.clone(),
            common_name: record.common_name.clone().unwrap_or_default(),
            kingdom: record.kingdom.to_string(),
            total_population: record
                .total_population
                .map(|p| p.to_string())
                .unwrap_or_default(),
            image: record.image.clone().unwrap_or_default(),
            description: record.description.clone().unwrap_or_default(),
        }
    }
}

// ─── Validated output ────────────────────────────────────────────────────────

/// Normalized edit-form values; blank text fields have collapsed to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedSpecies {
    pub scientific_name: String,
    pub common_name: Option<String>,
    pub kingdom: Kingdom,
    pub total_population: Option<u64>,
    pub image: Option<String>,
    pub description: Option<String>,
}

/// One optional message per form field, rendered inline next to the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldErrors {
    pub scientific_name: Option<String>,
    pub common_name: Option<String>,
    pub kingdom: Option<String>,
    pub total_population: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.scientific_name.is_none()
            && self.common_name.is_none()
            && self.kingdom.is_none()
            && self.total_population.is_none()
            && self.image.is_none()
            && self.description.is_none()
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// Validate and normalize a draft.
///
/// Trims every field; empty optional fields become `None`. Returns the full
/// set of field errors in one pass so the form can show them all at once.
pub fn validate(draft: &SpeciesDraft) -> Result<ValidatedSpecies, FieldErrors> {
    let mut errors = FieldErrors::default();

    let scientific_name = draft.scientific_name.trim();
    if scientific_name.is_empty() {
        errors.scientific_name = Some("Scientific name is required".into());
    }

    let kingdom = match draft.kingdom.trim().parse::<Kingdom>() {
        Ok(kingdom) => Some(kingdom),
        Err(_) => {
            errors.kingdom = Some("Kingdom must be one of the six taxonomic kingdoms".into());
            None
        }
    };

    let total_population = match draft.total_population.trim() {
        "" => None,
        raw => match raw.parse::<u64>() {
            Ok(population) if population >= 1 => Some(population),
            _ => {
                errors.total_population =
                    Some("Total population must be a positive whole number".into());
                None
            }
        },
    };

    let image = match draft.image.trim() {
        "" => None,
        raw => {
            if Url::parse(raw).is_ok() {
                Some(raw.to_string())
            } else {
                errors.image = Some("Image must be a well-formed URL".into());
                None
            }
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidatedSpecies {
        scientific_name: scientific_name.to_string(),
        common_name: optional_text(&draft.common_name),
        // kingdom is always Some when no errors were recorded
        kingdom: kingdom.unwrap_or(Kingdom::Animalia),
        total_population,
        image,
        description: optional_text(&draft.description),
    })
}

/// Trim a text field, collapsing blank input to `None`.
fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ─── tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::SpeciesRecord;

    fn valid_draft() -> SpeciesDraft {
        SpeciesDraft {
            scientific_name: "Panthera uncia".into(),
            common_name: "Snow leopard".into(),
            kingdom: "Animalia".into(),
            total_population: "4000".into(),
            image: "https://example.org/uncia.jpg".into(),
            description: "A large cat native to the mountain ranges of Asia.".into(),
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        let validated = validate(&valid_draft()).unwrap();
        assert_eq!(validated.scientific_name, "Panthera uncia");
        assert_eq!(validated.common_name.as_deref(), Some("Snow leopard"));
        assert_eq!(validated.kingdom, Kingdom::Animalia);
        assert_eq!(validated.total_population, Some(4000));
    }

    #[test]
    fn test_whitespace_scientific_name_rejected() {
        let mut draft = valid_draft();
        draft.scientific_name = "   ".into();
        let errors = validate(&draft).unwrap_err();
        assert!(errors.scientific_name.is_some());
    }

    #[test]
    fn test_fields_are_trimmed() {
        let mut draft = valid_draft();
        draft.scientific_name = "  Panthera uncia  ".into();
        draft.common_name = "  Snow leopard ".into();
        let validated = validate(&draft).unwrap();
        assert_eq!(validated.scientific_name, "Panthera uncia");
        assert_eq!(validated.common_name.as_deref(), Some("Snow leopard"));
    }

    #[test]
    fn test_blank_optional_fields_become_none() {
        let mut draft = valid_draft();
        draft.common_name = "".into();
        draft.description = "   ".into();
        draft.image = "".into();
        draft.total_population = " ".into();
        let validated = validate(&draft).unwrap();
        assert_eq!(validated.common_name, None);
        assert_eq!(validated.description, None);
        assert_eq!(validated.image, None);
        assert_eq!(validated.total_population, None);
    }

    #[test]
    fn test_population_must_be_positive() {
        let mut draft = valid_draft();
        draft.total_population = "0".into();
        assert!(validate(&draft).unwrap_err().total_population.is_some());

        draft.total_population = "-5".into();
        assert!(validate(&draft).unwrap_err().total_population.is_some());

        draft.total_population = "many".into();
        assert!(validate(&draft).unwrap_err().total_population.is_some());
    }

    #[test]
    fn test_kingdom_restricted_to_known_names() {
        let mut draft = valid_draft();
        draft.kingdom = "Monera".into();
        assert!(validate(&draft).unwrap_err().kingdom.is_some());

        draft.kingdom = "".into();
        assert!(validate(&draft).unwrap_err().kingdom.is_some());
    }

    #[test]
    fn test_image_must_be_a_url() {
        let mut draft = valid_draft();
        draft.image = "not a url".into();
        assert!(validate(&draft).unwrap_err().image.is_some());

        draft.image = " https://example.org/ok.png ".into();
        let validated = validate(&draft).unwrap();
        assert_eq!(validated.image.as_deref(), Some("https://example.org/ok.png"));
    }

    #[test]
    fn test_all_errors_reported_in_one_pass() {
        let draft = SpeciesDraft {
            scientific_name: " ".into(),
            common_name: "".into(),
            kingdom: "Mineralia".into(),
            total_population: "zero".into(),
            image: "nope".into(),
            description: "".into(),
        };
        let errors = validate(&draft).unwrap_err();
        assert!(errors.scientific_name.is_some());
        assert!(errors.kingdom.is_some());
        assert!(errors.total_population.is_some());
        assert!(errors.image.is_some());
        assert!(errors.common_name.is_none());
        assert!(errors.description.is_none());
    }

    #[test]
    fn test_round_trip_through_record_defaults() {
        let record = SpeciesRecord {
            scientific_name: "Amanita muscaria".into(),
            common_name: None,
            description: Some("Iconic red-and-white mushroom.".into()),
            kingdom: Kingdom::Fungi,
            total_population: None,
            image: None,
            author: "profile-2".into(),
        };
        let validated = validate(&SpeciesDraft::from_record(&record)).unwrap();
        assert_eq!(validated.scientific_name, record.scientific_name);
        assert_eq!(validated.common_name, None);
        assert_eq!(validated.kingdom, Kingdom::Fungi);
        assert_eq!(validated.total_population, None);
    }
}
