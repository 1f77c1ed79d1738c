pub mod field;
pub mod profile;

pub use field::Field;
pub use profile::{CONFIDENCE_SCALE, FieldWeight, FieldWeightTable, MatcherConfig};
