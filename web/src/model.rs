//! Shared data-transfer objects used by both server and client.

use serde::{Deserialize, Serialize};

use taxa_common::{FieldErrors, SpeciesRecord};

// ─── Detail view ─────────────────────────────────────────────────────────────

/// A species record joined with its author's display data, shown in the
/// detail dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDetail {
    pub species: SpeciesRecord,
    pub author_name: String,
    pub author_email: String,
}

/// Outcome of the two-step detail lookup (species row, then author profile).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DetailLookup {
    Found(SpeciesDetail),
    /// No species row matched the scientific name.
    SpeciesMissing,
    /// The species row exists but its author id resolves to no profile.
    AuthorMissing,
}

// ─── Edit workflow ───────────────────────────────────────────────────────────

/// Outcome of the edit-authorization probe.
///
/// The probe is a convenience check for the UI, not a security boundary;
/// the save path re-checks ownership before writing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditAccess {
    /// Caller owns the entry; carries the pre-edit snapshot used as the
    /// edit form's default values.
    Granted(SpeciesRecord),
    /// No identity could be resolved for the caller.
    Unauthenticated,
    /// The entry exists but is authored by somebody else (or not at all).
    NotYours,
}

/// Outcome of an edit submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SaveOutcome {
    Saved,
    Unauthenticated,
    NotYours,
    /// Server-side validation rejected the draft; rendered inline exactly
    /// like a local validation failure.
    Invalid(FieldErrors),
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// The signed-in user, as shown in the navigation bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub display_name: String,
}
