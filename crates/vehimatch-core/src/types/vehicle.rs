use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque catalog identifier of a vehicle record.
///
/// Ordered so that ties which survive the popularity tie-break resolve to the
/// lowest identifier. Deserializes from a string or an integer, so catalogs
/// keyed by numeric database ids load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VehicleId(String);

impl VehicleId {
    /// Wraps an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for VehicleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for VehicleId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for VehicleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(VehicleIdVisitor)
    }
}

struct VehicleIdVisitor;

impl Visitor<'_> for VehicleIdVisitor {
    type Value = VehicleId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a vehicle id as a string or an integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<VehicleId, E> {
        Ok(VehicleId::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<VehicleId, E> {
        Ok(VehicleId(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<VehicleId, E> {
        Ok(VehicleId::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<VehicleId, E> {
        Ok(VehicleId(v.to_string()))
    }
}

/// Reads an attribute, treating `null` like an absent key.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A canonical catalog vehicle.
///
/// Missing or `null` attributes are stored as empty strings; an empty
/// attribute never contributes to a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub id: VehicleId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub make: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub model: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub badge: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub transmission_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fuel_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub drive_type: String,
}

impl VehicleRecord {
    /// Creates a record with every attribute empty.
    #[must_use]
    pub fn new(id: impl Into<VehicleId>) -> Self {
        Self {
            id: id.into(),
            make: String::new(),
            model: String::new(),
            badge: String::new(),
            transmission_type: String::new(),
            fuel_type: String::new(),
            drive_type: String::new(),
        }
    }

    pub fn with_make(mut self, make: impl Into<String>) -> Self {
        self.make = make.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = badge.into();
        self
    }

    pub fn with_transmission_type(mut self, transmission_type: impl Into<String>) -> Self {
        self.transmission_type = transmission_type.into();
        self
    }

    pub fn with_fuel_type(mut self, fuel_type: impl Into<String>) -> Self {
        self.fuel_type = fuel_type.into();
        self
    }

    pub fn with_drive_type(mut self, drive_type: impl Into<String>) -> Self {
        self.drive_type = drive_type.into();
        self
    }
}

impl fmt::Display for VehicleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.make, self.model)?;
        if !self.badge.is_empty() {
            write!(f, " {}", self.badge)?;
        }
        write!(f, " ({})", self.id)
    }
}
