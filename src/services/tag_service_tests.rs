// src/services/tag_service_tests.rs
//
// TagService tests against a real temp-file SQLite pool, so uniqueness and
// junction behavior come from the actual schema.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    use crate::db::{create_connection_pool_at, initialize_database};
    use crate::domain::PhotoRecord;
    use crate::error::PhotoError;
    use crate::events::EventBus;
    use crate::repositories::{
        PhotoRepository, SqlitePhotoRepository, SqliteTagRepository, TagRepository,
    };
    use crate::services::TagService;

    // ========================================================================
    // TEST HELPERS
    // ========================================================================

    struct Harness {
        service: TagService,
        photo_repo: Arc<SqlitePhotoRepository>,
        bus: Arc<EventBus>,
        _data_dir: TempDir,
    }

    fn harness() -> Harness {
        let data_dir = tempfile::tempdir().unwrap();

        let pool =
            Arc::new(create_connection_pool_at(&data_dir.path().join("photos.db")).unwrap());
        {
            let conn = pool.get().unwrap();
            initialize_database(&conn).unwrap();
        }

        let photo_repo = Arc::new(SqlitePhotoRepository::new(Arc::clone(&pool)));
        let tag_repo: Arc<dyn TagRepository> =
            Arc::new(SqliteTagRepository::new(Arc::clone(&pool)));
        let bus = Arc::new(EventBus::new());

        let service = TagService::new(
            tag_repo,
            Arc::clone(&photo_repo) as Arc<dyn PhotoRepository>,
            Arc::clone(&bus),
        );

        Harness {
            service,
            photo_repo,
            bus,
            _data_dir: data_dir,
        }
    }

    fn seed_photo(h: &Harness, photo_id: &str) {
        let photo = PhotoRecord::new(
            photo_id.to_string(),
            "Seeded".to_string(),
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            None,
        );
        h.photo_repo.upsert_batch(&[photo]).unwrap();
    }

    // ========================================================================
    // TAGGING
    // ========================================================================

    #[test]
    fn test_tag_photo_creates_and_attaches() {
        let h = harness();
        seed_photo(&h, "p1");

        let tag = h.service.tag_photo("p1", "beach").unwrap();

        assert_eq!(tag.name, "beach");
        let attached = h.service.tags_for_photo("p1").unwrap();
        assert_eq!(attached.len(), 1);
        assert_eq!(attached[0], tag);

        let log = h.bus.get_event_log();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].event_type, "PhotoTagged");
    }

    #[test]
    fn test_tag_photo_normalizes_name() {
        let h = harness();
        seed_photo(&h, "p1");

        let padded = h.service.tag_photo("p1", "  beach  ").unwrap();
        let plain = h.service.tag_photo("p1", "beach").unwrap();

        assert_eq!(padded.name, "beach");
        assert_eq!(padded, plain);
        assert_eq!(h.service.list_all_tags().unwrap().len(), 1);
    }

    #[test]
    fn test_tag_photo_twice_is_noop() {
        let h = harness();
        seed_photo(&h, "p1");

        h.service.tag_photo("p1", "beach").unwrap();
        h.service.tag_photo("p1", "beach").unwrap();

        assert_eq!(h.service.tags_for_photo("p1").unwrap().len(), 1);
    }

    #[test]
    fn test_tag_unknown_photo_fails() {
        let h = harness();

        let result = h.service.tag_photo("ghost", "beach");

        assert!(matches!(result, Err(PhotoError::NotFound)));
        // The existence check fires before vocabulary creation
        assert!(h.service.list_all_tags().unwrap().is_empty());
    }

    #[test]
    fn test_blank_tag_name_rejected() {
        let h = harness();
        seed_photo(&h, "p1");

        let result = h.service.tag_photo("p1", "   ");

        assert!(matches!(result, Err(PhotoError::Domain(_))));
        assert!(h.service.list_all_tags().unwrap().is_empty());
    }

    // ========================================================================
    // DETACH AND LISTING
    // ========================================================================

    #[test]
    fn test_untag_photo_detaches() {
        let h = harness();
        seed_photo(&h, "p1");
        let tag = h.service.tag_photo("p1", "beach").unwrap();

        h.service.untag_photo("p1", tag.id).unwrap();
        assert!(h.service.tags_for_photo("p1").unwrap().is_empty());

        // Detaching again is silently accepted
        h.service.untag_photo("p1", tag.id).unwrap();

        // The vocabulary entry survives detachment
        assert_eq!(h.service.list_all_tags().unwrap().len(), 1);
    }

    #[test]
    fn test_list_all_tags_sorted_by_name() {
        let h = harness();
        seed_photo(&h, "p1");

        h.service.tag_photo("p1", "sunset").unwrap();
        h.service.tag_photo("p1", "beach").unwrap();
        h.service.tag_photo("p1", "hiking").unwrap();

        let names: Vec<String> = h
            .service
            .list_all_tags()
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["beach", "hiking", "sunset"]);
    }
}
