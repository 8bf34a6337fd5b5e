//! Species record and author profile types.
//!
//! A species row is keyed by its scientific name; the `author` field holds
//! the id of the profile that created the entry and is the only identity
//! allowed to change it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Characters kept in the card's description preview.
const PREVIEW_CHARS: usize = 150;

// ─── Kingdom ─────────────────────────────────────────────────────────────────

/// Taxonomic kingdom of a species entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kingdom {
    Animalia,
    Plantae,
    Fungi,
    Protista,
    Archaea,
    Bacteria,
}

impl Kingdom {
    /// Every kingdom, in the order shown in select inputs.
    pub const ALL: [Kingdom; 6] = [
        Kingdom::Animalia,
        Kingdom::Plantae,
        Kingdom::Fungi,
        Kingdom::Protista,
        Kingdom::Archaea,
        Kingdom::Bacteria,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kingdom::Animalia => "Animalia",
            Kingdom::Plantae => "Plantae",
            Kingdom::Fungi => "Fungi",
            Kingdom::Protista => "Protista",
            Kingdom::Archaea => "Archaea",
            Kingdom::Bacteria => "Bacteria",
        }
    }
}

impl fmt::Display for Kingdom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kingdom {
    type Err = UnknownKingdom;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Animalia" => Ok(Kingdom::Animalia),
            "Plantae" => Ok(Kingdom::Plantae),
            "Fungi" => Ok(Kingdom::Fungi),
            "Protista" => Ok(Kingdom::Protista),
            "Archaea" => Ok(Kingdom::Archaea),
            "Bacteria" => Ok(Kingdom::Bacteria),
            _ => Err(UnknownKingdom(s.to_string())),
        }
    }
}

/// Returned when a string does not name one of the six kingdoms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown kingdom: {0}")]
pub struct UnknownKingdom(pub String);

// ─── Species record ──────────────────────────────────────────────────────────

/// One row of the species catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    /// Unique key; lookups are point queries on this value.
    pub scientific_name: String,
    pub common_name: Option<String>,
    pub description: Option<String>,
    pub kingdom: Kingdom,
    /// Positive when present.
    pub total_population: Option<u64>,
    /// URL of an illustrative image.
    pub image: Option<String>,
    /// Profile id of the entry's author.
    pub author: String,
}

impl SpeciesRecord {
    /// Description preview for the summary card.
    ///
    /// Empty when there is no description; the full trimmed text when it
    /// fits in 150 characters; otherwise the first 150 characters with
    /// trailing whitespace removed and `...` appended.
    pub fn description_preview(&self) -> String {
        let Some(description) = &self.description else {
            return String::new();
        };
        let trimmed = description.trim();
        if trimmed.chars().count() <= PREVIEW_CHARS {
            return trimmed.to_string();
        }
        let clipped: String = trimmed.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", clipped.trim_end())
    }
}

// ─── Author profile ──────────────────────────────────────────────────────────

/// Display data for the profile behind a record's `author` id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorProfile {
    pub id: String,
    pub display_name: String,
    pub email: String,
}

// ─── tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_description(description: Option<&str>) -> SpeciesRecord {
        SpeciesRecord {
            scientific_name: "Panthera uncia".into(),
            common_name: Some("Snow leopard".into()),
            description: description.map(String::from),
            kingdom: Kingdom::Animalia,
            total_population: Some(4000),
            image: None,
            author: "profile-1".into(),
        }
    }

    #[test]
    fn test_preview_empty_without_description() {
        assert_eq!(record_with_description(None).description_preview(), "");
    }

    #[test]
    fn test_preview_short_description_untouched() {
        let rec = record_with_description(Some("  A large cat of the high mountains.  "));
        assert_eq!(
            rec.description_preview(),
            "A large cat of the high mountains."
        );
    }

    #[test]
    fn test_preview_clips_long_description() {
        let long = "x".repeat(149) + " tail that should be cut off";
        let rec = record_with_description(Some(&long));
        let preview = rec.description_preview();
        // 149 x's, then the space before "tail" is trimmed away
        assert_eq!(preview, format!("{}...", "x".repeat(149)));
    }

    #[test]
    fn test_preview_exactly_150_chars_has_no_ellipsis() {
        let exact = "y".repeat(150);
        let rec = record_with_description(Some(&exact));
        assert_eq!(rec.description_preview(), exact);
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        // 200 two-byte characters; byte-indexed slicing would split or panic
        let long = "é".repeat(200);
        let rec = record_with_description(Some(&long));
        assert_eq!(rec.description_preview(), format!("{}...", "é".repeat(150)));
    }

    #[test]
    fn test_kingdom_round_trip() {
        for kingdom in Kingdom::ALL {
            assert_eq!(kingdom.as_str().parse::<Kingdom>().unwrap(), kingdom);
        }
    }

    #[test]
    fn test_kingdom_rejects_unknown_names() {
        assert!("Monera".parse::<Kingdom>().is_err());
        assert!("animalia".parse::<Kingdom>().is_err());
        assert!("".parse::<Kingdom>().is_err());
    }
}
