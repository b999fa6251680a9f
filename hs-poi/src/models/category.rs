//! POI category labels
//!
//! Labels are Places API `type` values and are also used verbatim in the
//! extended column names, so they are restricted to `[a-z0-9_]`.

use hs_common::{Error, Result};
use serde::{Deserialize, Serialize};

/// Everyday services searched when no categories are configured
pub const DEFAULT_CATEGORIES: [&str; 6] = ["restaurant", "cafe", "hospital", "pharmacy", "atm", "bank"];

/// Leisure and tourism superset
pub const ATTRACTION_CATEGORIES: [&str; 12] = [
    "tourist_attraction",
    "museum",
    "park",
    "amusement_park",
    "restaurant",
    "bar",
    "cafe",
    "shopping_mall",
    "zoo",
    "aquarium",
    "art_gallery",
    "movie_theater",
];

/// Named category sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CategoryPreset {
    /// [`DEFAULT_CATEGORIES`]
    Essentials,
    /// [`ATTRACTION_CATEGORIES`]
    Attractions,
}

impl CategoryPreset {
    pub fn categories(&self) -> Vec<String> {
        let labels: &[&str] = match self {
            CategoryPreset::Essentials => &DEFAULT_CATEGORIES,
            CategoryPreset::Attractions => &ATTRACTION_CATEGORIES,
        };
        labels.iter().map(|s| s.to_string()).collect()
    }
}

/// Check a single category label
pub fn validate_category(label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(Error::InvalidInput("category label is empty".to_string()));
    }

    if !label
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(Error::InvalidInput(format!(
            "category '{}' may only contain lowercase letters, digits and '_'",
            label
        )));
    }

    Ok(())
}

/// Normalize and validate a category list
///
/// Labels are trimmed and lowercased; duplicates are dropped keeping the first
/// occurrence so column order follows the caller's order. An empty list is
/// rejected.
pub fn parse_categories<I, S>(labels: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut categories: Vec<String> = Vec::new();

    for raw in labels {
        let label = raw.as_ref().trim().to_lowercase();
        validate_category(&label)?;
        if !categories.contains(&label) {
            categories.push(label);
        }
    }

    if categories.is_empty() {
        return Err(Error::InvalidInput("at least one category is required".to_string()));
    }

    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(CategoryPreset::Essentials.categories().len(), 6);
        assert_eq!(CategoryPreset::Attractions.categories().len(), 12);
        assert_eq!(CategoryPreset::Essentials.categories()[0], "restaurant");
    }

    #[test]
    fn test_presets_are_valid() {
        parse_categories(DEFAULT_CATEGORIES).unwrap();
        parse_categories(ATTRACTION_CATEGORIES).unwrap();
    }

    #[test]
    fn test_parse_normalizes_and_dedupes() {
        let parsed = parse_categories([" Museum", "park", "museum"]).unwrap();
        assert_eq!(parsed, vec!["museum", "park"]);
    }

    #[test]
    fn test_parse_rejects_bad_labels() {
        assert!(parse_categories(["night club"]).is_err());
        assert!(parse_categories(["cafe,bar"]).is_err());
        assert!(parse_categories([""]).is_err());
        assert!(parse_categories(Vec::<String>::new()).is_err());
    }
}
