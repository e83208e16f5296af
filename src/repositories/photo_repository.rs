// src/repositories/photo_repository.rs
//
// Photo catalog persistence

use chrono::{DateTime, Utc};
use rusqlite::{params, Row, TransactionBehavior};
use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::domain::PhotoRecord;
use crate::error::{PhotoError, PhotoResult};

#[cfg_attr(test, mockall::automock)]
pub trait PhotoRepository: Send + Sync {
    /// Insert every record whose photo_id is not yet stored, in one
    /// transaction. Records whose photo_id already exists are left untouched.
    /// Returns the stored rows for the incoming ids, in incoming order.
    fn upsert_batch(&self, incoming: &[PhotoRecord]) -> PhotoResult<Vec<PhotoRecord>>;
    fn get_by_photo_id(&self, photo_id: &str) -> PhotoResult<Option<PhotoRecord>>;
    fn list_all(&self) -> PhotoResult<Vec<PhotoRecord>>;
    fn count(&self) -> PhotoResult<i64>;
}

pub struct SqlitePhotoRepository {
    pool: Arc<ConnectionPool>,
}

impl SqlitePhotoRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to PhotoRecord - returns rusqlite::Error for query_map compatibility
    fn row_to_photo(row: &Row) -> Result<PhotoRecord, rusqlite::Error> {
        let taken_at = DateTime::parse_from_rfc3339(&row.get::<_, String>("taken_at")?)
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
            })?
            .with_timezone(&Utc);

        Ok(PhotoRecord {
            photo_id: row.get("photo_id")?,
            title: row.get("title")?,
            taken_at,
            remote_url: row.get("remote_url")?,
        })
    }
}

impl PhotoRepository for SqlitePhotoRepository {
    fn upsert_batch(&self, incoming: &[PhotoRecord]) -> PhotoResult<Vec<PhotoRecord>> {
        let mut conn = self.pool.get()?;

        // Immediate: take the write lock before the existence reads, so a
        // contending batch queues on the busy timeout instead of hitting a
        // snapshot conflict once it tries to insert. Dropping the transaction
        // without commit rolls the whole batch back, so a failure on any
        // record leaves the store unchanged.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        for photo in incoming {
            let already_stored: i64 = tx.query_row(
                "SELECT COUNT(*) FROM photos WHERE photo_id = ?1",
                params![photo.photo_id],
                |row| row.get(0),
            )?;

            if already_stored == 0 {
                tx.execute(
                    "INSERT INTO photos (photo_id, title, taken_at, remote_url, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        photo.photo_id,
                        photo.title,
                        photo.taken_at.to_rfc3339(),
                        photo.remote_url,
                        Utc::now().to_rfc3339(),
                    ],
                )?;
            }
        }

        // Re-read inside the same transaction so callers get the rows as
        // persisted, not the incoming values.
        let mut persisted = Vec::with_capacity(incoming.len());
        for photo in incoming {
            let record = tx.query_row(
                "SELECT photo_id, title, taken_at, remote_url
                 FROM photos WHERE photo_id = ?1",
                params![photo.photo_id],
                Self::row_to_photo,
            )?;
            persisted.push(record);
        }

        tx.commit()?;

        Ok(persisted)
    }

    fn get_by_photo_id(&self, photo_id: &str) -> PhotoResult<Option<PhotoRecord>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT photo_id, title, taken_at, remote_url
             FROM photos WHERE photo_id = ?1",
        )?;

        match stmt.query_row(params![photo_id], Self::row_to_photo) {
            Ok(photo) => Ok(Some(photo)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(PhotoError::Persistence(e)),
        }
    }

    fn list_all(&self) -> PhotoResult<Vec<PhotoRecord>> {
        let conn = self.pool.get()?;

        // id is the insertion rowid, so same-instant photos keep arrival order
        let mut stmt = conn.prepare(
            "SELECT photo_id, title, taken_at, remote_url
             FROM photos
             ORDER BY taken_at ASC, id ASC",
        )?;

        let photos: Vec<PhotoRecord> = stmt
            .query_map([], Self::row_to_photo)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(photos)
    }

    fn count(&self) -> PhotoResult<i64> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM photos", [], |row| row.get(0))?;

        Ok(count)
    }
}
