pub mod result;
pub mod vehicle;

pub use result::{Candidate, MatchResult};
pub use vehicle::{VehicleId, VehicleRecord};
