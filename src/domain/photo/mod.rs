pub mod entity;
pub mod invariants;

pub use entity::PhotoRecord;
pub use invariants::validate_photo;
