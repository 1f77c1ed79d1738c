//! Loads a catalog from a JSON document.
//!
//! ```json
//! {
//!   "vehicles": [{"id": "1", "make": "Toyota", "model": "86", "badge": "GT"}],
//!   "listings": [{"id": "a", "vehicle_id": "1"}],
//!   "listing_counts": {"1": 4}
//! }
//! ```
//!
//! Individual `listings` each add one to their vehicle's count;
//! `listing_counts` sets pre-aggregated totals and wins over listings for the
//! same vehicle.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;
use vehimatch_core::{Catalog, PopularityIndex, VehicleId, VehicleRecord};

use crate::error::Result;

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    vehicles: Vec<VehicleRecord>,
    #[serde(default)]
    listings: Vec<ListingRow>,
    #[serde(default)]
    listing_counts: BTreeMap<VehicleId, i64>,
}

/// Only the vehicle reference of a listing matters for matching.
#[derive(Debug, Deserialize)]
struct ListingRow {
    vehicle_id: VehicleId,
}

/// Reads and loads a JSON catalog file.
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let content = fs::read_to_string(path.as_ref())?;
    load_json_str(&content)
}

/// Loads a catalog from a JSON string.
pub fn load_json_str(json: &str) -> Result<Catalog> {
    let document: CatalogDocument = serde_json::from_str(json)?;

    let mut popularity: PopularityIndex = document
        .listings
        .into_iter()
        .map(|listing| listing.vehicle_id)
        .collect();
    for (id, count) in document.listing_counts {
        popularity.set(id, count)?;
    }

    let mut builder = Catalog::builder();
    let vehicles = document.vehicles.len();
    for vehicle in document.vehicles {
        builder.insert(vehicle)?;
    }
    builder.popularity(popularity);

    let catalog = builder.build();
    info!(
        vehicles,
        listings = catalog.popularity().total(),
        "loaded catalog from json"
    );
    Ok(catalog)
}
