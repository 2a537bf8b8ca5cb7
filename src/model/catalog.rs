//! A product collection in the textile catalog.
//!
//! The same structure is produced by the remote store (snake_case JSON rows)
//! and by the bundled fallback dataset, so consumers never need to know which
//! source an entry came from.
//!
//! Entries are read-only to this crate: they are authored elsewhere and only
//! ever fetched.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use std::fmt::Display;
use std::str::FromStr;

/// Categories offered by the collections listing, in display order.
pub const CATEGORIES: [&str; 5] = ["Denim", "Sustainable", "Performance", "Lightweight", "Workwear"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub long_description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub features: Vec<String>,
    pub image: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    /// Display only. Values that are not a recognizable timestamp read as `None`.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// Nullable array columns come back as `null` rather than `[]`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

/// Accepts RFC 3339 and zone-less timestamps; the latter are taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

impl CatalogEntry {
    /// Creates an entry with the required display fields.
    ///
    /// `image` doubles as the single gallery image until [`with_images`](Self::with_images)
    /// supplies a full gallery.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        long_description: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: category.into(),
            description: description.into(),
            long_description: long_description.into(),
            features: Vec::new(),
            image: image.into(),
            images: Vec::new(),
            is_featured: None,
            created_at: None,
        }
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.is_featured = Some(featured);
        self
    }

    /// Absent and `false` both mean "not featured".
    pub fn is_featured(&self) -> bool {
        self.is_featured.unwrap_or(false)
    }

    /// Gallery images in display order, index 0 selected by default.
    ///
    /// Degrades to the single representative `image` when no gallery exists.
    pub fn gallery(&self) -> &[String] {
        if self.images.is_empty() {
            std::slice::from_ref(&self.image)
        } else {
            &self.images
        }
    }
}

/// Category selection for the collections listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => entry.category == *category,
        }
    }

    /// Keeps matching entries in their original order.
    pub fn apply<'a>(&self, entries: &'a [CatalogEntry]) -> Vec<&'a CatalogEntry> {
        entries.iter().filter(|entry| self.matches(entry)).collect()
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        // Known categories are matched case-insensitively; anything else is kept verbatim.
        let category = CATEGORIES
            .iter()
            .find(|known| known.eq_ignore_ascii_case(s))
            .map(|known| known.to_string())
            .unwrap_or_else(|| s.to_string());
        Ok(CategoryFilter::Only(category))
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "All"),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, category: &str) -> CatalogEntry {
        CatalogEntry::new(id, "Title", category, "Short", "Long", "https://img/1")
    }

    #[test]
    fn test_gallery_degrades_to_single_image() {
        let bare = entry("a", "Denim");
        assert_eq!(bare.gallery(), &["https://img/1".to_string()]);

        let full = entry("b", "Denim").with_images(["x", "y"]);
        assert_eq!(full.gallery(), &["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_featured_flag_defaults_to_false() {
        assert!(!entry("a", "Denim").is_featured());
        assert!(entry("a", "Denim").featured(true).is_featured());
        assert!(!entry("a", "Denim").featured(false).is_featured());
    }

    #[test]
    fn test_category_filter_preserves_order() {
        let entries = vec![entry("a", "Denim"), entry("b", "Workwear"), entry("c", "Denim")];
        let filter: CategoryFilter = "denim".parse().unwrap();
        let ids: Vec<_> = filter.apply(&entries).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);

        let all: CategoryFilter = "All".parse().unwrap();
        assert_eq!(all.apply(&entries).len(), 3);
    }

    #[test]
    fn test_remote_row_deserializes() {
        let row = serde_json::json!({
            "id": "3f1c",
            "title": "Raw Denim Series",
            "category": "Denim",
            "description": "Unwashed.",
            "long_description": "Unwashed, untreated.",
            "features": ["14oz"],
            "image": "https://img/1",
            "images": ["https://img/1", "https://img/2"],
            "is_featured": true,
            "created_at": "2024-03-01T09:30:00.123456+00:00"
        });
        let entry: CatalogEntry = serde_json::from_value(row).unwrap();
        assert!(entry.is_featured());
        assert_eq!(entry.gallery().len(), 2);
        assert!(entry.created_at.is_some());
    }

    #[test]
    fn test_missing_optional_fields_deserialize() {
        let row = serde_json::json!({
            "id": "x",
            "title": "T",
            "category": "Denim",
            "description": "d",
            "long_description": "ld",
            "image": "i"
        });
        let entry: CatalogEntry = serde_json::from_value(row).unwrap();
        assert!(entry.features.is_empty());
        assert_eq!(entry.is_featured, None);
        assert_eq!(entry.created_at, None);
    }

    #[test]
    fn test_null_arrays_and_naive_timestamp_deserialize() {
        let row = serde_json::json!({
            "id": "x",
            "title": "T",
            "category": "Denim",
            "description": "d",
            "long_description": "ld",
            "features": null,
            "image": "i",
            "images": null,
            "created_at": "2024-03-01T09:30:00.123456"
        });
        let entry: CatalogEntry = serde_json::from_value(row).unwrap();
        assert!(entry.features.is_empty());
        assert_eq!(entry.gallery(), vec!["i".to_string()]);
        let created = entry.created_at.unwrap();
        assert_eq!(created.to_rfc3339(), "2024-03-01T09:30:00.123456+00:00");
    }

    #[test]
    fn test_unreadable_timestamp_is_dropped() {
        assert!(parse_timestamp("2024-03-01 09:30:00").is_some());
        assert_eq!(parse_timestamp("last tuesday"), None);
    }
}
