//! GeoJSON-style feature collections as property sources.
//!
//! Only `features[*].properties` is read. `geometry`, `type`, `bbox` and any
//! other member are accepted and ignored.
//!
//! ```
//! use jenks_core::dataset::{json::FeatureCollection, AttributeColumns};
//!
//! let fc = FeatureCollection::from_json_str(r#"{
//!     "type": "FeatureCollection",
//!     "features": [
//!         {"type": "Feature", "properties": {"Spanish": "120"}, "geometry": null},
//!         {"type": "Feature", "properties": {"Spanish": 75}, "geometry": null}
//!     ]
//! }"#).unwrap();
//!
//! let cols = AttributeColumns::extract(&["Spanish"], &fc.features);
//! assert_eq!(cols.column("Spanish"), Some(&[120.0, 75.0][..]));
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{PropertySource, PropertyValue};

/// A collection of features; only their properties matter here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    /// Features in document order.
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// One feature record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Property object. GeoJSON allows `null` here.
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl FeatureCollection {
    /// Parse a feature collection from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Parse a feature collection from a JSON reader.
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// `true` when the collection has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl PropertySource for Feature {
    fn property(&self, name: &str) -> Option<PropertyValue<'_>> {
        match self.properties.as_ref()?.get(name)? {
            Value::Number(n) => n.as_f64().map(PropertyValue::Number),
            Value::String(s) => Some(PropertyValue::Text(s.as_str())),
            // Booleans, arrays and objects never read as numbers.
            _ => None,
        }
    }
}

impl PropertySource for Map<String, Value> {
    fn property(&self, name: &str) -> Option<PropertyValue<'_>> {
        match self.get(name)? {
            Value::Number(n) => n.as_f64().map(PropertyValue::Number),
            Value::String(s) => Some(PropertyValue::Text(s.as_str())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature",
             "properties": {"BoroName": "Queens", "Diabetes crude prevalence (%)": "11.2", "Total_pop": 4100},
             "geometry": {"type": "Point", "coordinates": [-73.8, 40.7]}},
            {"type": "Feature",
             "properties": {"BoroName": "Bronx", "Diabetes crude prevalence (%)": null, "Total_pop": "2875"},
             "geometry": null},
            {"type": "Feature", "properties": null, "geometry": null},
            {"type": "Feature",
             "properties": {"BoroName": "Queens", "Diabetes crude prevalence (%)": 9.4, "Total_pop": true}}
        ]
    }"#;

    #[test]
    fn test_parse_ignores_geometry() {
        let fc = FeatureCollection::from_json_str(SAMPLE).unwrap();
        assert_eq!(fc.len(), 4);
        assert!(fc.features[2].properties.is_none());
    }

    #[test]
    fn test_numbers_strings_null_and_bool() {
        let fc = FeatureCollection::from_json_str(SAMPLE).unwrap();
        let f = &fc.features;
        assert_eq!(f[0].numeric_property("Diabetes crude prevalence (%)"), Some(11.2));
        assert_eq!(f[1].numeric_property("Diabetes crude prevalence (%)"), None);
        assert_eq!(f[1].numeric_property("Total_pop"), Some(2875.0));
        assert_eq!(f[2].numeric_property("Total_pop"), None);
        assert_eq!(f[3].numeric_property("Total_pop"), None);
        assert_eq!(f[3].numeric_property("Diabetes crude prevalence (%)"), Some(9.4));
    }

    #[test]
    fn test_missing_features_member() {
        let fc = FeatureCollection::from_json_str(r#"{"type":"FeatureCollection"}"#).unwrap();
        assert!(fc.is_empty());
    }

    #[test]
    fn test_from_reader() {
        let fc = FeatureCollection::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(fc.len(), 4);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(FeatureCollection::from_json_str("{\"features\": [").is_err());
    }
}
