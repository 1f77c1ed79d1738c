use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::types::VehicleRecord;

/// A matchable vehicle attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Field {
    Make,
    Model,
    Badge,
    TransmissionType,
    FuelType,
    DriveType,
}

impl Field {
    /// Every field, in record declaration order.
    pub const ALL: [Field; 6] = [
        Field::Make,
        Field::Model,
        Field::Badge,
        Field::TransmissionType,
        Field::FuelType,
        Field::DriveType,
    ];

    /// Reads this attribute from a record.
    #[must_use]
    pub fn value(self, record: &VehicleRecord) -> &str {
        match self {
            Self::Make => &record.make,
            Self::Model => &record.model,
            Self::Badge => &record.badge,
            Self::TransmissionType => &record.transmission_type,
            Self::FuelType => &record.fuel_type,
            Self::DriveType => &record.drive_type,
        }
    }

    /// The snake_case attribute name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Make => "make",
            Self::Model => "model",
            Self::Badge => "badge",
            Self::TransmissionType => "transmission_type",
            Self::FuelType => "fuel_type",
            Self::DriveType => "drive_type",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| MatchError::UnknownField(s.to_string()))
    }
}

impl TryFrom<String> for Field {
    type Error = MatchError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Field> for &'static str {
    fn from(field: Field) -> Self {
        field.name()
    }
}
