// src/services/tag_service.rs
//
// Tag vocabulary management and photo/tag associations.

use std::sync::Arc;

use crate::domain::{normalized_tag_name, validate_tag_name, Tag};
use crate::error::{PhotoError, PhotoResult};
use crate::events::{EventBus, PhotoTagged};
use crate::repositories::{PhotoRepository, TagRepository};

pub struct TagService {
    tag_repo: Arc<dyn TagRepository>,
    photo_repo: Arc<dyn PhotoRepository>,
    event_bus: Arc<EventBus>,
}

impl TagService {
    pub fn new(
        tag_repo: Arc<dyn TagRepository>,
        photo_repo: Arc<dyn PhotoRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            tag_repo,
            photo_repo,
            event_bus,
        }
    }

    /// Every known tag, name ascending
    pub fn list_all_tags(&self) -> PhotoResult<Vec<Tag>> {
        self.tag_repo.list_all()
    }

    /// Attach a tag to a stored photo, creating the tag if the name is new.
    /// Tagging the same photo with the same name twice is a no-op.
    pub fn tag_photo(&self, photo_id: &str, name: &str) -> PhotoResult<Tag> {
        validate_tag_name(name).map_err(PhotoError::Domain)?;
        let name = normalized_tag_name(name);

        self.photo_repo
            .get_by_photo_id(photo_id)?
            .ok_or(PhotoError::NotFound)?;

        let tag = self.tag_repo.get_or_create(&name)?;
        self.tag_repo.add_photo(tag.id, photo_id)?;

        self.event_bus
            .emit(PhotoTagged::new(photo_id.to_string(), tag.name.clone()));

        Ok(tag)
    }

    /// Detach a tag from a photo. Detaching an absent association is a no-op.
    pub fn untag_photo(&self, photo_id: &str, tag_id: i64) -> PhotoResult<()> {
        self.tag_repo.remove_photo(tag_id, photo_id)
    }

    /// Tags attached to one photo, name ascending
    pub fn tags_for_photo(&self, photo_id: &str) -> PhotoResult<Vec<Tag>> {
        self.tag_repo.list_for_photo(photo_id)
    }
}
