//! Decoded RDB data row

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One RDB data row, mapping column header to raw value
///
/// Columns keep header order. A row shorter than the header simply has no
/// entry for the trailing columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RdbRecord {
    fields: IndexMap<String, String>,
}

impl RdbRecord {
    /// Zip header names with row values, stopping at the shorter of the two
    pub fn from_fields<'a, H, V>(headers: H, values: V) -> Self
    where
        H: IntoIterator<Item = &'a String>,
        V: IntoIterator<Item = &'a str>,
    {
        let fields = headers
            .into_iter()
            .zip(values)
            .map(|(header, value)| (header.clone(), value.to_string()))
            .collect();
        Self { fields }
    }

    /// Get the value of a column
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Whether the row has a value for a column
    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// Column names present in this row, in header order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Column/value pairs in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of columns present
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row has no columns
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consume the record into its underlying ordered map
    pub fn into_inner(self) -> IndexMap<String, String> {
        self.fields
    }
}

impl<K, V> FromIterator<(K, V)> for RdbRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
