use serde::{Deserialize, Serialize};

/// A user-assigned label attached to photo records
/// Tags are shared: one tag row may be associated with many photos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Store-assigned identifier
    pub id: i64,

    /// Unique, trimmed display name
    pub name: String,
}

impl Tag {
    pub fn new(id: i64, name: String) -> Self {
        Self { id, name }
    }
}
