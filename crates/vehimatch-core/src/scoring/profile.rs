use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{MatchError, Result};

use super::field::Field;

/// Default field weights.
pub const WEIGHT_MAKE: u32 = 3;
pub const WEIGHT_MODEL: u32 = 2;
pub const WEIGHT_BADGE: u32 = 2;
pub const WEIGHT_TRANSMISSION_TYPE: u32 = 1;
pub const WEIGHT_FUEL_TYPE: u32 = 1;
pub const WEIGHT_DRIVE_TYPE: u32 = 1;

/// Confidence values are expressed on a `0..=CONFIDENCE_SCALE` scale.
pub const CONFIDENCE_SCALE: u32 = 10;

/// One entry of a [`FieldWeightTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldWeight {
    pub field: Field,
    pub weight: u32,
}

/// Ordered mapping from field to the points it awards when it matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldWeightTable {
    entries: Vec<FieldWeight>,
}

impl Default for FieldWeightTable {
    fn default() -> Self {
        Self {
            entries: vec![
                FieldWeight { field: Field::Make, weight: WEIGHT_MAKE },
                FieldWeight { field: Field::Model, weight: WEIGHT_MODEL },
                FieldWeight { field: Field::Badge, weight: WEIGHT_BADGE },
                FieldWeight { field: Field::TransmissionType, weight: WEIGHT_TRANSMISSION_TYPE },
                FieldWeight { field: Field::FuelType, weight: WEIGHT_FUEL_TYPE },
                FieldWeight { field: Field::DriveType, weight: WEIGHT_DRIVE_TYPE },
            ],
        }
    }
}

impl FieldWeightTable {
    /// Builds a table from `(field name, weight)` pairs, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::UnknownField` for a name that is not a vehicle
    /// attribute and `MatchError::DuplicateField` for a repeated field.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        let entries = pairs
            .into_iter()
            .map(|(name, weight)| -> Result<FieldWeight> {
                Ok(FieldWeight { field: name.parse()?, weight })
            })
            .collect::<Result<Vec<_>>>()?;
        let table = Self { entries };
        table.check_unique()?;
        Ok(table)
    }

    /// Iterates the entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldWeight> {
        self.entries.iter()
    }

    /// Weight of `field`, if it is in the table.
    #[must_use]
    pub fn weight(&self, field: Field) -> Option<u32> {
        self.entries.iter().find(|e| e.field == field).map(|e| e.weight)
    }

    /// Sum of all weights; the denominator of the confidence scale.
    ///
    /// Saturates at `u32::MAX`; [`MatcherConfig::validate`] rejects tables
    /// that get there.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.checked_total().unwrap_or(u32::MAX)
    }

    /// Sum of all weights, or `None` on overflow.
    #[must_use]
    pub fn checked_total(&self) -> Option<u32> {
        self.entries
            .iter()
            .try_fold(0u32, |total, e| total.checked_add(e.weight))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check_unique(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.field) {
                return Err(MatchError::DuplicateField(entry.field.to_string()));
            }
        }
        Ok(())
    }
}

/// Immutable scoring configuration handed to a [`Matcher`](crate::Matcher).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Points per matched field.
    #[serde(default)]
    pub weights: FieldWeightTable,
    /// Fields compared by whole-word intersection instead of containment.
    #[serde(default = "default_partial_fields")]
    pub partial_fields: Vec<Field>,
}

fn default_partial_fields() -> Vec<Field> {
    vec![Field::Badge]
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            weights: FieldWeightTable::default(),
            partial_fields: default_partial_fields(),
        }
    }
}

impl MatcherConfig {
    /// Create a configuration with the default weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the weight table.
    pub fn with_weights(mut self, weights: FieldWeightTable) -> Self {
        self.weights = weights;
        self
    }

    /// Replace the set of partial-match fields.
    pub fn with_partial_fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.partial_fields = fields.into_iter().collect();
        self
    }

    /// Decodes and validates a JSON configuration.
    ///
    /// ```
    /// use vehimatch_core::MatcherConfig;
    ///
    /// let config = MatcherConfig::from_json(
    ///     r#"{"weights":[{"field":"make","weight":5},{"field":"model","weight":5}],"partial_fields":[]}"#,
    /// ).unwrap();
    /// assert_eq!(config.weights.total(), 10);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidConfig` when the JSON is malformed or names
    /// an unknown field, or any error from [`MatcherConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every weighted field is unique, that every partial-match
    /// field is weighted and that the weights sum without overflow.
    ///
    /// A table whose weights sum to zero is accepted; every confidence it
    /// produces is 0.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::DuplicateField`, `MatchError::PartialFieldNotWeighted`
    /// or `MatchError::WeightOverflow`.
    pub fn validate(&self) -> Result<()> {
        self.weights.check_unique()?;

        for field in &self.partial_fields {
            if self.weights.weight(*field).is_none() {
                return Err(MatchError::PartialFieldNotWeighted(field.to_string()));
            }
        }

        let total = self.weights.checked_total().ok_or(MatchError::WeightOverflow)?;
        if total == 0 {
            warn!("matcher weights sum to zero; every confidence will be 0");
        }
        Ok(())
    }

    /// Returns `true` if `field` uses whole-word matching.
    #[must_use]
    pub fn is_partial(&self, field: Field) -> bool {
        self.partial_fields.contains(&field)
    }
}
