use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstituteCategory {
    School,
    College,
    University,
    TrainingCenter,
}

/// Creation payload for an institute. The id is assigned by the record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInstitute {
    pub name: String,
    pub email: String,
    pub category: InstituteCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Institute {
    pub id: String,
    pub name: String,
    pub email: String,
    pub category: InstituteCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// An ordered column-name → value mapping for one CSV row.
///
/// Preserves the declaration order of the source header, which matters for
/// the first-field naming fallback. Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowMap(Vec<(String, String)>);

impl RowMap {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, column: String, value: String) {
        self.0.push((column, value));
    }

    /// Value of the first column whose name equals `column` exactly.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Value of the first column in declaration order.
    pub fn first_value(&self) -> Option<&str> {
        self.0.first().map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for RowMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for RowMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (column, value) in &self.0 {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RowMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RowMapVisitor;

        impl<'de> Visitor<'de> for RowMapVisitor {
            type Value = RowMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of column names to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((column, value)) = access.next_entry::<String, String>()? {
                    entries.push((column, value));
                }
                Ok(RowMap(entries))
            }
        }

        deserializer.deserialize_map(RowMapVisitor)
    }
}

/// Normalizer output: a department row ready for bulk insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentDraft {
    pub institute_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "RowMap::is_empty")]
    pub metadata: RowMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub institute_id: String,
    pub name: String,
    #[serde(default)]
    pub metadata: RowMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_map_preserves_declaration_order() {
        let row: RowMap = vec![
            ("Zone".to_string(), "North".to_string()),
            ("Department".to_string(), "Physics".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(row.first_value(), Some("North"));
        assert_eq!(row.get("Department"), Some("Physics"));
        assert_eq!(row.get("department"), None);

        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"Zone":"North","Department":"Physics"}"#);
    }

    #[test]
    fn row_map_round_trips_through_json() {
        let row: RowMap = vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&row).unwrap();
        let back: RowMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn institute_category_uses_snake_case_wire_names() {
        let json = serde_json::to_string(&InstituteCategory::TrainingCenter).unwrap();
        assert_eq!(json, r#""training_center""#);

        let parsed: InstituteCategory = serde_json::from_str(r#""college""#).unwrap();
        assert_eq!(parsed, InstituteCategory::College);
    }

    #[test]
    fn draft_metadata_is_omitted_when_empty() {
        let draft = DepartmentDraft {
            institute_id: "inst-1".to_string(),
            name: "Computer Science".to_string(),
            metadata: RowMap::new(),
        };

        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("metadata").is_none());
    }
}
