use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A scalar value returned by the knowledge store for one field of a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Convert a JSON value into a scalar field. `null`, arrays and objects
    /// have no scalar meaning and are dropped (the field becomes absent).
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(FieldValue::Bool(b)),
            serde_json::Value::Number(n) => n.as_f64().map(FieldValue::Number),
            serde_json::Value::String(s) => Some(FieldValue::Text(local_name(&s).to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// Reduce a graph URI such as `http://example.org/eco#Train` to `Train`.
/// Plain literals are returned unchanged.
pub fn local_name(value: &str) -> &str {
    if !value.contains("://") {
        return value;
    }
    value
        .rsplit(['#', '/'])
        .find(|part| !part.is_empty())
        .unwrap_or(value)
}

/// One tuple returned by a knowledge store query.
///
/// Field presence is never guaranteed. All reads go through the optional
/// accessors below so every caller has to decide what a missing value means.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRow {
    fields: Vec<(String, FieldValue)>,
}

impl ResultRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, used heavily by tests and the in-memory store.
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value.into());
        self
    }

    /// Insert or replace a field, keeping the original position on replace.
    pub fn insert(&mut self, name: &str, value: FieldValue) {
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value;
        } else {
            self.fields.push((name.to_string(), value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Text view of a field. Empty strings count as absent.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            FieldValue::Text(s) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric view of a field. Text that parses as a number is accepted;
    /// anything else (including malformed text) reads as absent.
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            FieldValue::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Some(n),
                _ => {
                    tracing::warn!(field = name, value = %s, "ignoring malformed numeric field");
                    None
                }
            },
            _ => None,
        }
    }

    /// True when the field exists with a meaningful value (non-empty text,
    /// a non-zero number, or `true`).
    pub fn is_present(&self, name: &str) -> bool {
        match self.get(name) {
            Some(FieldValue::Text(s)) => !s.trim().is_empty(),
            Some(FieldValue::Number(n)) => *n != 0.0,
            Some(FieldValue::Bool(b)) => *b,
            None => false,
        }
    }

    /// Display form of a field, used for names and labels.
    pub fn display(&self, name: &str) -> Option<String> {
        self.get(name).map(|v| v.to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl Serialize for ResultRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ResultRow {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut row = ResultRow::new();
        for (k, v) in raw {
            if let Some(value) = FieldValue::from_json(v) {
                row.insert(&k, value);
            }
        }
        Ok(row)
    }
}

/// The four recommendation categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Destination,
    Accommodation,
    Activity,
    Transport,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Destination,
        Category::Accommodation,
        Category::Activity,
        Category::Transport,
    ];

    /// Plural key used in datasets and travel plans.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Destination => "destinations",
            Category::Accommodation => "accommodations",
            Category::Activity => "activities",
            Category::Transport => "transport",
        }
    }

    /// Parse a category from its plural key, an English singular or the
    /// graph class name (`Hébergement`, `ActivitéTouristique`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "destination" | "destinations" => Some(Category::Destination),
            "accommodation" | "accommodations" | "hébergement" | "hebergement" => {
                Some(Category::Accommodation)
            }
            "activity" | "activities" | "activitétouristique" | "activitetouristique" => {
                Some(Category::Activity)
            }
            "transport" => Some(Category::Transport),
            _ => None,
        }
    }

    /// Field holding the candidate's name.
    pub fn name_field(&self) -> &'static str {
        match self {
            Category::Destination => "destination",
            Category::Accommodation => "hebergement",
            Category::Activity => "activite",
            Category::Transport => "transport",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Category::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown entity type '{}'", s)))
    }
}
