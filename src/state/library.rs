use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};

use super::data::ApodRecord;
use crate::config::CacheConfig;
use crate::error::Result;

/// The ApodCache manages the SQLite image cache database.
/// It stores one row per distinct image; the image bytes live in files
/// next to the database. Rows are never updated or deleted.
pub struct ApodCache {
    conn: Connection,
    config: CacheConfig,
}

impl ApodCache {
    /// Open (or create) the cache described by `config`.
    ///
    /// Creates the cache directory and the schema when missing.
    pub fn open(config: &CacheConfig) -> Result<Self> {
        config.ensure_dir()?;

        let conn = Connection::open(&config.db_path)?;
        tracing::debug!(db = %config.db_path.display(), "image cache database opened");

        let cache = ApodCache {
            conn,
            config: config.clone(),
        };
        cache.init_schema()?;

        Ok(cache)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<()> {
        // UNIQUE on image_sha256 doubles as the hash lookup index
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS apod_cache (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                title           TEXT NOT NULL CHECK (length(title) > 0),
                explanation     TEXT NOT NULL CHECK (length(explanation) > 0),
                image_path      TEXT NOT NULL UNIQUE,
                image_sha256    TEXT NOT NULL UNIQUE
            )",
            [],
        )?;

        Ok(())
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Directory holding the cached image files
    pub fn cache_dir(&self) -> &Path {
        &self.config.cache_dir
    }

    /// Id of the record whose image has this content hash
    pub fn lookup_by_hash(&self, content_hash: &str) -> Result<Option<i64>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM apod_cache WHERE image_sha256 = ?1",
                [content_hash],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// Id of the record whose image is stored at `image_path`
    pub fn lookup_by_path(&self, image_path: &Path) -> Result<Option<i64>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM apod_cache WHERE image_path = ?1",
                [image_path.to_string_lossy()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// Id of the first record (in insertion order) with this title
    pub fn lookup_by_title(&self, title: &str) -> Result<Option<i64>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM apod_cache WHERE title = ?1 ORDER BY id LIMIT 1",
                [title],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// Insert a new record and return its id.
    ///
    /// A duplicate path or hash, or an empty title/explanation, fails with
    /// [`crate::error::ApodError::Constraint`].
    pub fn insert(&self, title: &str, explanation: &str, image_path: &Path, content_hash: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO apod_cache (title, explanation, image_path, image_sha256) VALUES (?1, ?2, ?3, ?4)",
            params![title, explanation, image_path.to_string_lossy(), content_hash],
        )?;

        let id = self.conn.last_insert_rowid();
        tracing::info!(id, title, hash = content_hash, "added APOD to image cache");
        Ok(id)
    }

    /// Get a record by id
    pub fn get_by_id(&self, id: i64) -> Result<Option<ApodRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT id, title, explanation, image_path, image_sha256 FROM apod_cache WHERE id = ?1",
                [id],
                record_from_row,
            )
            .optional()?;
        Ok(record)
    }

    /// Titles of all cached images, in insertion order
    pub fn list_titles(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT title FROM apod_cache ORDER BY id")?;

        let titles = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok(titles)
    }

    /// Get a count of images in the cache
    pub fn image_count(&self) -> Result<i64> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM apod_cache", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<ApodRecord> {
    let image_path: String = row.get(3)?;
    Ok(ApodRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        explanation: row.get(2)?,
        image_path: PathBuf::from(image_path),
        content_hash: row.get(4)?,
    })
}

// Implement Debug for better error messages
impl std::fmt::Debug for ApodCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApodCache")
            .field("db_path", &self.config.db_path)
            .finish()
    }
}
