//! # Vehimatch Core
//!
//! Matches free-text vehicle descriptions against a catalog of canonical
//! vehicle records. Each description is normalized, scored against every
//! record with a weighted field table, and resolved to a single best record
//! with a `0..=10` confidence.
//!
//! ## Quick Start
//!
//! ```rust
//! use vehimatch_core::{Catalog, Matcher, MatcherConfig, VehicleRecord};
//!
//! let mut builder = Catalog::builder();
//! builder
//!     .insert(
//!         VehicleRecord::new("5824662093168640")
//!             .with_make("Volkswagen")
//!             .with_model("Golf")
//!             .with_badge("R"),
//!     )
//!     .unwrap();
//! builder.listing_count("5824662093168640", 18).unwrap();
//! let catalog = builder.build();
//!
//! let matcher = Matcher::new(MatcherConfig::default()).unwrap();
//! let results = matcher.match_batch(&catalog, &["VW Golf R 2020"]);
//!
//! assert_eq!(results[0].vehicle_id.as_ref().unwrap().as_str(), "5824662093168640");
//! assert_eq!(results[0].confidence, 7);
//! assert_eq!(results[0].listing_count, Some(18));
//! ```
pub mod catalog;
pub mod error;
pub mod matcher;
pub mod normalizer;
pub mod scoring;
pub mod types;

// Re-export primary API
pub use catalog::{Catalog, CatalogBuilder, PopularityIndex};
pub use error::{MatchError, Result};
pub use matcher::{Matcher, Resolution};
pub use normalizer::{DEFAULT_ABBREVIATIONS, Normalizer};
pub use scoring::{CONFIDENCE_SCALE, Field, FieldWeight, FieldWeightTable, MatcherConfig};
pub use types::{Candidate, MatchResult, VehicleId, VehicleRecord};
