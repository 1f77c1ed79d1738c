use std::fmt;

use serde::{Deserialize, Serialize};

use super::vehicle::VehicleId;

/// A record that scored above zero against one description.
///
/// Candidates live only for the resolution of a single description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub id: &'a VehicleId,
    /// Sum of the weights of every matched field.
    pub score: u32,
    /// Listing count of the record, 0 when the catalog has none.
    pub popularity: u64,
}

/// The outcome of matching one description against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Original, non-normalized description.
    pub input: String,

    /// Winning record, `None` when nothing scored above zero.
    pub vehicle_id: Option<VehicleId>,

    /// Match quality in `[0, 10]`.
    pub confidence: u8,

    /// Listing count of the winner; present only alongside `vehicle_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_count: Option<u64>,
}

impl MatchResult {
    /// Creates the result for a description that matched nothing.
    #[must_use]
    pub fn unmatched(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            vehicle_id: None,
            confidence: 0,
            listing_count: None,
        }
    }

    /// Creates the result for a resolved winner.
    #[must_use]
    pub fn matched(
        input: impl Into<String>,
        vehicle_id: VehicleId,
        confidence: u8,
        listing_count: u64,
    ) -> Self {
        Self {
            input: input.into(),
            vehicle_id: Some(vehicle_id),
            confidence,
            listing_count: Some(listing_count),
        }
    }

    /// Returns `true` if a record was selected.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.vehicle_id.is_some()
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MatchResult(input={:?}", self.input)?;
        match (&self.vehicle_id, self.listing_count) {
            (Some(id), Some(count)) => write!(f, ", vehicle={id}, listings={count}")?,
            (Some(id), None) => write!(f, ", vehicle={id}")?,
            _ => write!(f, ", vehicle=none")?,
        }
        write!(f, ", conf={})", self.confidence)
    }
}
