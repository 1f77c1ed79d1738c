use thiserror::Error;

use vehimatch_core::MatchError;

/// Errors raised while loading a catalog snapshot.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The catalog file could not be read.
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The SQLite database could not be queried.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A JSON catalog document is malformed.
    #[error("invalid catalog document: {0}")]
    Json(#[from] serde_json::Error),

    /// A row holds a vehicle identifier that is neither an integer nor text.
    #[error("unsupported identifier in {table}.{column}")]
    InvalidId {
        table: &'static str,
        column: &'static str,
    },

    /// The loaded data violates a catalog invariant.
    #[error(transparent)]
    Catalog(#[from] MatchError),
}

/// Result type alias for catalog loading.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_errors_display_transparently() {
        let err = StoreError::from(MatchError::DuplicateVehicle("7".into()));
        assert_eq!(err.to_string(), "duplicate vehicle id: 7");
    }

    #[test]
    fn invalid_id_names_the_column() {
        let err = StoreError::InvalidId {
            table: "listing",
            column: "vehicle_id",
        };
        assert!(err.to_string().contains("listing.vehicle_id"));
    }
}
