//! # Vehimatch Store
//!
//! Builds the immutable [`Catalog`] snapshot that the matcher consumes, from
//! either the listing-ingestion SQLite database or a JSON export of it.
//! Collaborator data is validated here, before any matching starts.
pub mod error;
pub mod json;
pub mod sqlite;

use std::path::Path;

use vehimatch_core::Catalog;

pub use error::{Result, StoreError};
pub use json::{load_json, load_json_str};
pub use sqlite::{load_from_connection, load_sqlite};

/// Loads a catalog, picking the loader from the file extension: `.json`
/// files are read as JSON documents, anything else as a SQLite database.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        load_json(path)
    } else {
        load_sqlite(path)
    }
}
