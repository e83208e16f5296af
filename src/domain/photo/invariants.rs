use super::entity::PhotoRecord;
use crate::domain::{DomainError, DomainResult};

/// Validates all PhotoRecord invariants
/// These are the absolute rules that must hold for a record to enter the store
pub fn validate_photo(photo: &PhotoRecord) -> DomainResult<()> {
    validate_photo_id(&photo.photo_id)?;
    Ok(())
}

/// The remote identifier cannot be empty; it keys both the stored record
/// and the cached image bytes
fn validate_photo_id(photo_id: &str) -> DomainResult<()> {
    if photo_id.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Photo record must carry a non-empty photo_id".to_string(),
        ));
    }
    Ok(())
}

/// Invariants that must hold true for the Photo domain:
///
/// 1. photo_id is non-empty and unique within the store
/// 2. A record with an existing photo_id is never duplicated; the stored
///    record wins and re-ingested fields are discarded
/// 3. Records are never deleted by this subsystem
/// 4. remote_url may be absent; resolving an image for such a record is an
///    error unless the cache already holds bytes for its key

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_valid_photo() {
        let photo = PhotoRecord::new(
            "52917316".to_string(),
            "Evening light".to_string(),
            Utc::now(),
            Some("https://farm5.staticflickr.com/4425/52917316_9d3c.jpg".to_string()),
        );
        assert!(validate_photo(&photo).is_ok());
    }

    #[test]
    fn test_empty_photo_id_fails() {
        let photo = PhotoRecord::new("   ".to_string(), "Untitled".to_string(), Utc::now(), None);
        assert!(validate_photo(&photo).is_err());
    }
}
