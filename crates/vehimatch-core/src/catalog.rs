//! # Catalog Snapshot
//!
//! The read-only view of canonical vehicles and their listing counts that a
//! [`Matcher`](crate::Matcher) scores against. A catalog is assembled once
//! through [`CatalogBuilder`] and never changes afterwards.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::error::{MatchError, Result};
use crate::types::{VehicleId, VehicleRecord};

/// Listing counts per vehicle. A missing entry counts as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopularityIndex {
    counts: HashMap<VehicleId, u64>,
}

impl PopularityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one listing for `id`.
    pub fn record_listing(&mut self, id: VehicleId) {
        *self.counts.entry(id).or_insert(0) += 1;
    }

    /// Sets the listing count for `id`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::NegativePopularity` if `count` is below zero.
    pub fn set(&mut self, id: VehicleId, count: i64) -> Result<()> {
        let count = u64::try_from(count).map_err(|_| MatchError::NegativePopularity {
            id: id.to_string(),
            count,
        })?;
        self.counts.insert(id, count);
        Ok(())
    }

    /// Listing count for `id`, 0 when unknown.
    #[must_use]
    pub fn get(&self, id: &VehicleId) -> u64 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all listing counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

impl FromIterator<VehicleId> for PopularityIndex {
    fn from_iter<T: IntoIterator<Item = VehicleId>>(listings: T) -> Self {
        let mut index = Self::new();
        for id in listings {
            index.record_listing(id);
        }
        index
    }
}

/// Immutable catalog of vehicle records plus their popularity.
///
/// Records iterate in ascending identifier order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: BTreeMap<VehicleId, VehicleRecord>,
    popularity: PopularityIndex,
}

impl Catalog {
    /// Starts assembling a catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Looks up a record by identifier.
    #[must_use]
    pub fn get(&self, id: &VehicleId) -> Option<&VehicleRecord> {
        self.records.get(id)
    }

    /// Iterates all records in identifier order.
    pub fn records(&self) -> impl Iterator<Item = &VehicleRecord> {
        self.records.values()
    }

    #[must_use]
    pub fn popularity(&self) -> &PopularityIndex {
        &self.popularity
    }

    /// Listing count for `id`, 0 when unknown.
    #[must_use]
    pub fn listing_count(&self, id: &VehicleId) -> u64 {
        self.popularity.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Collects records and listing counts, rejecting inconsistent data before
/// it reaches the matcher.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    records: BTreeMap<VehicleId, VehicleRecord>,
    popularity: PopularityIndex,
}

impl CatalogBuilder {
    /// Adds a record.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::DuplicateVehicle` if the identifier is already
    /// present.
    pub fn insert(&mut self, record: VehicleRecord) -> Result<&mut Self> {
        if self.records.contains_key(&record.id) {
            return Err(MatchError::DuplicateVehicle(record.id.to_string()));
        }
        self.records.insert(record.id.clone(), record);
        Ok(self)
    }

    /// Adds one listing for `id`.
    pub fn listing(&mut self, id: impl Into<VehicleId>) -> &mut Self {
        self.popularity.record_listing(id.into());
        self
    }

    /// Sets an aggregated listing count for `id`.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::NegativePopularity` if `count` is below zero.
    pub fn listing_count(&mut self, id: impl Into<VehicleId>, count: i64) -> Result<&mut Self> {
        self.popularity.set(id.into(), count)?;
        Ok(self)
    }

    /// Replaces the popularity index wholesale.
    pub fn popularity(&mut self, popularity: PopularityIndex) -> &mut Self {
        self.popularity = popularity;
        self
    }

    /// Freezes the collected data into a catalog snapshot.
    pub fn build(&mut self) -> Catalog {
        let records = std::mem::take(&mut self.records);
        let popularity = std::mem::take(&mut self.popularity);

        let orphaned = popularity
            .counts
            .keys()
            .filter(|id| !records.contains_key(*id))
            .count();
        if orphaned > 0 {
            debug!(orphaned, "listing counts reference vehicles missing from the catalog");
        }

        Catalog {
            records,
            popularity,
        }
    }
}
