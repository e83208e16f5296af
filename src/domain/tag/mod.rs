pub mod entity;
pub mod invariants;

pub use entity::Tag;
pub use invariants::{normalized_tag_name, validate_tag_name};
