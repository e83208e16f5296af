// src/db/connection.rs
//
// SQLite connection pooling.
//
// Every connection comes up in WAL mode with foreign keys on: readers get a
// consistent snapshot while a write transaction is in flight, and concurrent
// writers queue on the busy timeout instead of erroring. This is the whole of
// the crate's single-writer/multi-reader story; nothing above this layer
// takes a lock.

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

use crate::error::{PhotoError, PhotoResult};

pub type ConnectionPool = Pool<SqliteConnectionManager>;
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Applied to every pooled connection before first use
const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON;
     PRAGMA journal_mode = WAL;
     PRAGMA synchronous = NORMAL;
     PRAGMA busy_timeout = 5000;";

/// Generous for a client-side library; SQLite still admits one writer
const POOL_MAX_CONNECTIONS: u32 = 15;

/// Default database location: {data_dir}/photohub/photohub.db
pub fn get_database_path() -> PhotoResult<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| PhotoError::Other("Could not determine app data directory".to_string()))?;

    let photohub_dir = data_dir.join("photohub");
    std::fs::create_dir_all(&photohub_dir)?;

    Ok(photohub_dir.join("photohub.db"))
}

/// Pool over the default database location
pub fn create_connection_pool() -> PhotoResult<ConnectionPool> {
    create_connection_pool_at(&get_database_path()?)
}

/// Pool over an explicit database file, creating parent directories as
/// needed. Tests and embedders use this to control storage layout.
pub fn create_connection_pool_at(db_path: &Path) -> PhotoResult<ConnectionPool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let manager = SqliteConnectionManager::file(db_path)
        .with_init(|conn| conn.execute_batch(CONNECTION_PRAGMAS));

    Pool::builder()
        .max_size(POOL_MAX_CONNECTIONS)
        .build(manager)
        .map_err(|e| PhotoError::Pool(format!("Failed to create connection pool: {}", e)))
}

/// Checkout wrapper with a pool-specific error message
pub fn get_connection(pool: &ConnectionPool) -> PhotoResult<PooledConn> {
    pool.get()
        .map_err(|e| PhotoError::Pool(format!("Failed to get database connection: {}", e)))
}

/// Standalone in-memory connection for schema-level unit tests
pub fn create_test_connection() -> PhotoResult<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    Ok(conn)
}
