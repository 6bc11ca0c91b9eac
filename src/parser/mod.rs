pub mod properties;
pub mod tags;

pub use properties::{parse_properties, PropertyBlock};
pub use tags::extract_tags;
