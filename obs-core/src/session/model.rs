//! Session data structures

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// 2^63: every whole `f64` below this magnitude converts to `i64` exactly.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Per-visitor observing target
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Latitude in degrees
    #[serde(default, serialize_with = "serialize_coordinate")]
    pub lat: f64,
    /// Longitude in degrees
    #[serde(default, serialize_with = "serialize_coordinate")]
    pub lon: f64,
    /// Named target, unset until the first update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Keys the cookie carried that this version does not know about
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Session {
    /// Create a session at the given coordinates
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            ..Self::default()
        }
    }

    /// Set the target, builder style
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Merge an update payload into this session
    pub fn apply(&mut self, patch: SessionPatch, mode: UpdateMode) {
        match mode {
            UpdateMode::Overwrite => {
                self.lat = patch.lat.unwrap_or_default();
                self.lon = patch.lon.unwrap_or_default();
                self.target = Some(patch.target.unwrap_or_default());
            }
            UpdateMode::Partial => {
                if let Some(lat) = patch.lat {
                    self.lat = lat;
                }
                if let Some(lon) = patch.lon {
                    self.lon = lon;
                }
                if let Some(target) = patch.target {
                    self.target = Some(target);
                }
            }
        }
    }
}

/// Update payload bound from a request body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionPatch {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub target: Option<String>,
}

/// How an update payload is merged into the stored session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// `lat`, `lon` and `target` are always written; missing fields become zero values
    #[default]
    Overwrite,
    /// Only fields present in the payload are written
    Partial,
}

/// Whole coordinates are written as JSON integers (`0`, not `0.0`, and
/// `100000000000000000`, not `1e17`). Other values use the shortest
/// round-tripping form.
fn serialize_coordinate<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() < I64_BOUND {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
