use thiserror::Error;

/// Errors raised while configuring a matcher or assembling a catalog.
///
/// Matching itself never fails; every variant here is reported at
/// construction or load time.
#[derive(Debug, Error)]
pub enum MatchError {
    /// A weight table or partial-match entry names a field that is not a
    /// vehicle attribute.
    #[error("unknown vehicle field: {0:?}")]
    UnknownField(String),

    /// The same field appears twice in the weight table.
    #[error("field {0} is weighted more than once")]
    DuplicateField(String),

    /// A partial-match field has no entry in the weight table.
    #[error("partial-match field {0} has no weight")]
    PartialFieldNotWeighted(String),

    /// The weights add up to more than a `u32` can hold.
    #[error("field weights sum past u32::MAX")]
    WeightOverflow,

    /// Two records share an identifier.
    #[error("duplicate vehicle id: {0}")]
    DuplicateVehicle(String),

    /// A popularity count below zero was supplied.
    #[error("negative listing count {count} for vehicle {id}")]
    NegativePopularity {
        /// The vehicle the count belongs to.
        id: String,
        /// The rejected count.
        count: i64,
    },

    /// A serialized matcher configuration could not be decoded.
    #[error("invalid matcher configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// An abbreviation pattern failed to compile.
    #[error("regex compilation error: {0}")]
    Regex(#[from] regex::Error),
}

/// Result type alias for vehimatch operations.
pub type Result<T> = std::result::Result<T, MatchError>;
