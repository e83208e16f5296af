// src/repositories/tag_repository.rs
//
// Tag persistence and photo <-> tag association

use rusqlite::{params, Row};
use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::domain::Tag;
use crate::error::{PhotoError, PhotoResult};

pub trait TagRepository: Send + Sync {
    /// Look up a tag by name, creating it when absent. Names are stored as
    /// given; normalization happens in the domain layer.
    fn get_or_create(&self, name: &str) -> PhotoResult<Tag>;
    fn get_by_id(&self, id: i64) -> PhotoResult<Option<Tag>>;
    fn list_all(&self) -> PhotoResult<Vec<Tag>>;
    fn add_photo(&self, tag_id: i64, photo_id: &str) -> PhotoResult<()>;
    fn remove_photo(&self, tag_id: i64, photo_id: &str) -> PhotoResult<()>;
    fn list_for_photo(&self, photo_id: &str) -> PhotoResult<Vec<Tag>>;
}

pub struct SqliteTagRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteTagRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_tag(row: &Row) -> Result<Tag, rusqlite::Error> {
        Ok(Tag {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}

impl TagRepository for SqliteTagRepository {
    fn get_or_create(&self, name: &str) -> PhotoResult<Tag> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT OR IGNORE INTO tags (name) VALUES (?1)",
            params![name],
        )?;

        let tag = conn.query_row(
            "SELECT id, name FROM tags WHERE name = ?1",
            params![name],
            Self::row_to_tag,
        )?;

        Ok(tag)
    }

    fn get_by_id(&self, id: i64) -> PhotoResult<Option<Tag>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT id, name FROM tags WHERE id = ?1")?;

        match stmt.query_row(params![id], Self::row_to_tag) {
            Ok(tag) => Ok(Some(tag)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(PhotoError::Persistence(e)),
        }
    }

    fn list_all(&self) -> PhotoResult<Vec<Tag>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT id, name FROM tags ORDER BY name")?;

        let tags: Vec<Tag> = stmt
            .query_map([], Self::row_to_tag)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tags)
    }

    fn add_photo(&self, tag_id: i64, photo_id: &str) -> PhotoResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT OR IGNORE INTO photo_tags (photo_id, tag_id) VALUES (?1, ?2)",
            params![photo_id, tag_id],
        )?;

        Ok(())
    }

    fn remove_photo(&self, tag_id: i64, photo_id: &str) -> PhotoResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "DELETE FROM photo_tags WHERE photo_id = ?1 AND tag_id = ?2",
            params![photo_id, tag_id],
        )?;

        Ok(())
    }

    fn list_for_photo(&self, photo_id: &str) -> PhotoResult<Vec<Tag>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT t.id, t.name
             FROM tags t
             JOIN photo_tags pt ON pt.tag_id = t.id
             WHERE pt.photo_id = ?1
             ORDER BY t.name",
        )?;

        let tags: Vec<Tag> = stmt
            .query_map(params![photo_id], Self::row_to_tag)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tags)
    }
}
