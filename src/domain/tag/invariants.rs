use crate::domain::{DomainError, DomainResult};

/// Canonical form of a tag name: surrounding whitespace stripped.
/// Case is preserved; "Sunset" and "sunset" are distinct tags.
pub fn normalized_tag_name(name: &str) -> String {
    name.trim().to_string()
}

/// A tag name must be non-empty once normalized
pub fn validate_tag_name(name: &str) -> DomainResult<()> {
    if normalized_tag_name(name).is_empty() {
        return Err(DomainError::InvariantViolation(
            "Tag name cannot be empty".to_string(),
        ));
    }
    Ok(())
}
