//! Catalog records and the tracked property set.
//!
//! A `Record` is one catalog entry as received from an upstream feeder:
//! a handful of well-known text properties plus whatever extra fields the
//! provider attaches. Only tracked properties are ever indexed; extras
//! ride along verbatim and round-trip unchanged.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The closed set of indexed catalog properties.
///
/// Each variant is backed by its own vector index and metadata sequence.
/// The set is fixed at compile time; records may carry other fields, but
/// those are stored without being indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    StreamId,
    Title,
    Plot,
    Genre,
    ReleaseDate,
    Rating,
    Director,
    Cast,
}

impl Property {
    /// Every tracked property, in registry order.
    pub const ALL: [Property; 8] = [
        Property::StreamId,
        Property::Title,
        Property::Plot,
        Property::Genre,
        Property::ReleaseDate,
        Property::Rating,
        Property::Director,
        Property::Cast,
    ];

    /// The wire name of this property.
    pub fn as_str(&self) -> &'static str {
        match self {
            Property::StreamId => "stream_id",
            Property::Title => "title",
            Property::Plot => "plot",
            Property::Genre => "genre",
            Property::ReleaseDate => "release_date",
            Property::Rating => "rating",
            Property::Director => "director",
            Property::Cast => "cast",
        }
    }

    /// Whether queries against this property use substring containment
    /// over stored values instead of semantic search.
    pub fn is_substring_matched(&self) -> bool {
        matches!(self, Property::ReleaseDate)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Property {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stream_id" => Ok(Property::StreamId),
            "title" => Ok(Property::Title),
            "plot" => Ok(Property::Plot),
            "genre" => Ok(Property::Genre),
            "release_date" => Ok(Property::ReleaseDate),
            "rating" => Ok(Property::Rating),
            "director" => Ok(Property::Director),
            "cast" => Ok(Property::Cast),
            other => Err(format!("unknown property: '{other}'")),
        }
    }
}

/// One catalog entry, stored verbatim as the metadata entry for every
/// tracked property it carries.
///
/// Tracked properties get a named slot so the ingestion pipeline never
/// iterates arbitrary keys; anything else lands in `extra`. Values are
/// raw JSON: feeders usually send strings, but nothing stops them from
/// sending numbers or arrays, and only string values are embeddable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<Value>,

    /// Untracked fields, stored but never indexed.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// The value stored under a tracked property, if present.
    pub fn value(&self, property: Property) -> Option<&Value> {
        match property {
            Property::StreamId => self.stream_id.as_ref(),
            Property::Title => self.title.as_ref(),
            Property::Plot => self.plot.as_ref(),
            Property::Genre => self.genre.as_ref(),
            Property::ReleaseDate => self.release_date.as_ref(),
            Property::Rating => self.rating.as_ref(),
            Property::Director => self.director.as_ref(),
            Property::Cast => self.cast.as_ref(),
        }
    }

    /// The string value of a tracked property, if present and a string.
    pub fn text(&self, property: Property) -> Option<&str> {
        self.value(property).and_then(Value::as_str)
    }

    /// Tracked properties present in this record, in registry order.
    pub fn present(&self) -> impl Iterator<Item = Property> + '_ {
        Property::ALL
            .into_iter()
            .filter(move |p| self.value(*p).is_some())
    }
}

/// One ranked query result: the stored record plus its distance from the
/// query vector (always 0.0 for substring matches).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryHit {
    pub metadata: Record,
    pub distance: f32,
}

/// The persisted mapping of property to metadata sequence.
///
/// A BTreeMap keeps the snapshot artifact deterministic across runs.
pub type MetadataRegistry = BTreeMap<Property, Vec<Record>>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_property_wire_names_round_trip() {
        for property in Property::ALL {
            let parsed: Property = property.as_str().parse().unwrap();
            assert_eq!(parsed, property);
        }
    }

    #[test]
    fn test_property_parse_rejects_unknown() {
        let err = "Title".parse::<Property>().unwrap_err();
        assert!(err.contains("Title"));
        assert!("".parse::<Property>().is_err());
    }

    #[test]
    fn test_only_release_date_is_substring_matched() {
        for property in Property::ALL {
            assert_eq!(
                property.is_substring_matched(),
                property == Property::ReleaseDate
            );
        }
    }

    #[test]
    fn test_record_round_trips_with_extra_fields() {
        let raw = json!({
            "stream_id": "42",
            "title": "Space Odyssey",
            "rating": 7.5,
            "container_extension": "mkv",
            "backdrop_path": ["a.jpg", "b.jpg"],
        });

        let record: Record = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.text(Property::Title), Some("Space Odyssey"));
        assert_eq!(record.value(Property::Rating), Some(&json!(7.5)));
        assert_eq!(record.extra["container_extension"], json!("mkv"));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn test_record_absent_properties_are_skipped() {
        let record: Record = serde_json::from_value(json!({"title": "x"})).unwrap();
        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back, json!({"title": "x"}));
    }

    #[test]
    fn test_present_yields_registry_order() {
        let record: Record =
            serde_json::from_value(json!({"genre": "scifi", "title": "x", "cast": "y"})).unwrap();
        let present: Vec<Property> = record.present().collect();
        assert_eq!(
            present,
            vec![Property::Title, Property::Genre, Property::Cast]
        );
    }

    #[test]
    fn test_text_is_none_for_non_string_values() {
        let record: Record = serde_json::from_value(json!({"rating": 8})).unwrap();
        assert!(record.value(Property::Rating).is_some());
        assert_eq!(record.text(Property::Rating), None);
    }

    #[test]
    fn test_metadata_registry_serializes_with_string_keys() {
        let mut registry = MetadataRegistry::new();
        registry.insert(Property::Title, vec![Record::default()]);

        let raw = serde_json::to_string(&registry).unwrap();
        assert!(raw.contains("\"title\""));

        let back: MetadataRegistry = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[&Property::Title].len(), 1);
    }
}
