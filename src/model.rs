//! Tour records as delivered by the host page.
//!
//! Records arrive already validated by the server; deserialization only
//! guards optional fields and tolerates the loose encodings the server emits
//! (decimal columns as strings, tag lists as JSON-encoded strings).

use crate::error::ViewerError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HotspotKind {
    Navigation,
    Info,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SphereRef {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Hotspot {
    pub id: i64,
    #[serde(default)]
    pub sphere_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: HotspotKind,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub yaw: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pitch: f64,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub tooltip: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub target_sphere: Option<SphereRef>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Media {
    #[serde(alias = "original_url")]
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Sphere {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub media: Vec<Media>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub initial_yaw: f64,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
}

impl Sphere {
    pub fn from_json(json: &str) -> Result<Self, ViewerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Primary panorama URL, or `""` when the sphere has no image yet.
    pub fn panorama_url(&self) -> &str {
        self.media.first().map(|m| m.url.as_str()).unwrap_or("")
    }

    pub fn hotspot(&self, id: i64) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.id == id)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VirtualTour {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "tolerant_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub spheres: Vec<Sphere>,
}

impl VirtualTour {
    pub fn from_json(json: &str) -> Result<Self, ViewerError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Accepts a number or a numeric string; anything else becomes 0.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Tags may arrive as an array, as a JSON-encoded array string, or as
/// garbage. Parse failures fall back to an empty list.
fn tolerant_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_tags(value))
}

pub fn parse_tags(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Value::String(s) => match serde_json::from_str::<Value>(&s) {
            Ok(inner @ Value::Array(_)) => parse_tags(inner),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
