//! Attribute extraction: from feature property records to flat numeric columns.
//!
//! Indicator datasets arrive as records of named properties (one record per
//! census tract, say). Each named attribute becomes one flat column of finite
//! values. Missing or non-numeric entries are dropped here, so the classifier
//! never sees NaN or infinities.
//!
//! # Numeric parsing
//!
//! Text values are parsed leniently with [`parse_float`]: a numeric *prefix*
//! is enough (`"12.5%"` → `12.5`, `"  7 people"` → `7`), anything that does
//! not start with a number is rejected (`"n/a"`, `""`). Non-finite results
//! are rejected too.
//!
//! # Sources
//!
//! Anything that can look up a property by name implements
//! [`PropertySource`]. Implementations are provided for string maps
//! (`hashbrown::HashMap`, `BTreeMap`) and, with the `json` feature, for
//! GeoJSON-style features ([`json::Feature`]). Geometry is never read.

#[cfg(feature = "json")]
pub mod json;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::hash::BuildHasher;

// ─── Numeric parsing ────────────────────────────────────────────────────────

/// Parse the leading decimal number of `text`, ignoring leading whitespace
/// and any trailing garbage.
///
/// Accepts an optional sign, digits with an optional fractional part (at
/// least one digit overall) and an optional exponent. Returns `None` when no
/// number prefix exists or when the result is not finite.
///
/// ```
/// use jenks_core::dataset::parse_float;
///
/// assert_eq!(parse_float(" 12.5%"), Some(12.5));
/// assert_eq!(parse_float("-3e2 units"), Some(-300.0));
/// assert_eq!(parse_float("n/a"), None);
/// assert_eq!(parse_float("1e999"), None);
/// ```
pub fn parse_float(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        // A lone trailing '.' only counts when digits precede it ("5." is 5).
        if frac_digits > 0 || int_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

// ─── PropertySource ─────────────────────────────────────────────────────────

/// A raw property value as stored in a record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropertyValue<'a> {
    /// Already numeric.
    Number(f64),
    /// Text, parsed leniently when a number is needed.
    Text(&'a str),
}

impl PropertyValue<'_> {
    /// Finite numeric reading of this value, if any.
    pub fn as_finite(&self) -> Option<f64> {
        match *self {
            Self::Number(v) => v.is_finite().then_some(v),
            Self::Text(t) => parse_float(t),
        }
    }

    /// Textual reading, used as a grouping key.
    pub fn to_key(&self) -> String {
        match *self {
            Self::Number(v) => alloc::format!("{v}"),
            Self::Text(t) => String::from(t),
        }
    }
}

/// A record whose properties can be looked up by name.
pub trait PropertySource {
    /// Raw value of property `name`, or `None` if absent (or null).
    fn property(&self, name: &str) -> Option<PropertyValue<'_>>;

    /// Finite numeric value of property `name`.
    ///
    /// Missing, non-numeric and non-finite values all yield `None`.
    fn numeric_property(&self, name: &str) -> Option<f64> {
        self.property(name).and_then(|v| v.as_finite())
    }
}

impl<S: BuildHasher> PropertySource for hashbrown::HashMap<String, String, S> {
    fn property(&self, name: &str) -> Option<PropertyValue<'_>> {
        self.get(name).map(|v| PropertyValue::Text(v.as_str()))
    }
}

impl PropertySource for BTreeMap<String, String> {
    fn property(&self, name: &str) -> Option<PropertyValue<'_>> {
        self.get(name).map(|v| PropertyValue::Text(v.as_str()))
    }
}

impl PropertySource for BTreeMap<String, f64> {
    fn property(&self, name: &str) -> Option<PropertyValue<'_>> {
        self.get(name).map(|&v| PropertyValue::Number(v))
    }
}

// ─── AttributeColumns ───────────────────────────────────────────────────────

/// One attribute's values across all records, in record order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeColumn {
    /// Attribute (property) name.
    pub name: String,
    /// Finite values, one per record that carried a usable value.
    pub values: Vec<f64>,
}

/// A set of attribute columns, in the order the attributes were requested.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeColumns {
    columns: Vec<AttributeColumn>,
}

impl AttributeColumns {
    /// Pull one column per name in `attributes` out of `records`.
    ///
    /// Records lacking a usable value for an attribute are skipped for that
    /// attribute only. Duplicate names in `attributes` produce one column.
    pub fn extract<'r, R, I>(attributes: &[&str], records: I) -> Self
    where
        R: PropertySource + 'r,
        I: IntoIterator<Item = &'r R>,
    {
        let mut columns: Vec<AttributeColumn> = Vec::with_capacity(attributes.len());
        for &name in attributes {
            if !columns.iter().any(|c| c.name == name) {
                columns.push(AttributeColumn { name: String::from(name), values: Vec::new() });
            }
        }

        for record in records {
            for column in columns.iter_mut() {
                if let Some(v) = record.numeric_property(&column.name) {
                    column.values.push(v);
                }
            }
        }

        Self { columns }
    }

    /// Build from already-extracted columns.
    pub fn from_columns(columns: Vec<AttributeColumn>) -> Self {
        Self { columns }
    }

    /// Values of the column named `name`.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.iter().find(|c| c.name == name).map(|c| c.values.as_slice())
    }

    /// Columns in request order.
    pub fn iter(&self) -> core::slice::Iter<'_, AttributeColumn> {
        self.columns.iter()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// `true` if no attributes were requested.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<'a> IntoIterator for &'a AttributeColumns {
    type Item = &'a AttributeColumn;
    type IntoIter = core::slice::Iter<'a, AttributeColumn>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
