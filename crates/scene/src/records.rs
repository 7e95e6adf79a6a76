use foundation::color::Rgba;
use foundation::math::LngLatAlt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Ordered JSON object as delivered by the playback collaborator.
pub type Fields = Map<String, Value>;

/// Point position: lon/lat/alt plus an optional scalar in the 4th slot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointPosition {
    pub coords: LngLatAlt,
    pub value: Option<f64>,
}

impl PointPosition {
    /// Accepts 3 or 4 finite numeric components.
    pub fn from_value(v: &Value) -> Option<Self> {
        let comps = v.as_array()?;
        if comps.len() != 3 && comps.len() != 4 {
            return None;
        }
        let mut nums = [0.0; 4];
        for (slot, c) in nums.iter_mut().zip(comps) {
            let n = c.as_f64()?;
            if !n.is_finite() {
                return None;
            }
            *slot = n;
        }
        Some(Self {
            coords: LngLatAlt::new(nums[0], nums[1], nums[2]),
            value: (comps.len() == 4).then_some(nums[3]),
        })
    }
}

impl Serialize for PointPosition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let [x, y, z] = self.coords.to_array();
        match self.value {
            Some(w) => [x, y, z, w].serialize(serializer),
            None => [x, y, z].serialize(serializer),
        }
    }
}

/// One entry of a record's point collection.
///
/// Keeps the full source object (for hover text) next to typed views of the
/// two fields the viewer interprets. A malformed `position` reads as absent;
/// a malformed `color` falls back to the derived colour.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointEntry {
    position: Option<PointPosition>,
    color: Option<Rgba>,
    fields: Fields,
}

impl PointEntry {
    pub fn from_fields(fields: Fields) -> Self {
        let position = fields.get("position").and_then(PointPosition::from_value);
        let color = fields
            .get("color")
            .and_then(Value::as_array)
            .and_then(|c| c.iter().map(Value::as_f64).collect::<Option<Vec<_>>>())
            .and_then(|c| Rgba::from_channels(&c));
        Self {
            position,
            color,
            fields,
        }
    }

    pub fn position(&self) -> Option<&PointPosition> {
        self.position.as_ref()
    }

    pub fn color(&self) -> Option<Rgba> {
        self.color
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }
}

impl From<Value> for PointEntry {
    fn from(v: Value) -> Self {
        match v {
            Value::Object(fields) => Self::from_fields(fields),
            _ => Self::default(),
        }
    }
}

impl<'de> Deserialize<'de> for PointEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

impl Serialize for PointEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// Per-frame record from the playback collaborator (one element of
/// `movedData`). Only `pointCloud` is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovedRecord {
    #[serde(
        rename = "pointCloud",
        default,
        deserialize_with = "lenient_point_cloud",
        skip_serializing_if = "Option::is_none"
    )]
    pub point_cloud: Option<Vec<PointEntry>>,
    #[serde(flatten)]
    pub extra: Fields,
}

impl MovedRecord {
    pub fn with_point_cloud(points: Vec<PointEntry>) -> Self {
        Self {
            point_cloud: Some(points),
            extra: Fields::new(),
        }
    }
}

// Anything other than an array (null, a number, an object) means "no points".
fn lenient_point_cloud<'de, D>(deserializer: D) -> Result<Option<Vec<PointEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items.into_iter().map(PointEntry::from).collect()),
        _ => None,
    })
}
