//! Taxa Common – species-catalog data model shared by server and browser.
//!
//! Everything in this crate is pure data + pure functions so it compiles
//! unchanged for the native server build and the WASM hydrate build.

pub mod species;
pub mod validate;

pub use species::{AuthorProfile, Kingdom, SpeciesRecord};
pub use validate::{validate, FieldErrors, SpeciesDraft, ValidatedSpecies};
