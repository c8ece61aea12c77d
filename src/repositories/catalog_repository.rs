// src/repositories/catalog_repository.rs
//
// Catalog repository: every read and write the catalog supports
//
// PRINCIPLES:
// - Reads of missing rows return None, never an error
// - Every mutation persists the catalog image as its last step
// - Deletes remove dependent rows explicitly, dependents first
// - A reset handle refuses further work instead of resurrecting state

use std::sync::Mutex;

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Row};

use crate::domain::{
    CastMemberRecord, ContentDetails, ContentKind, ContentPatch, ContentRecord, CrewMemberRecord,
    EpisodeRecord, NewContent,
};
use crate::error::{CatalogError, CatalogResult};
use crate::store::{CatalogStore, StorageSlot, StoreStats};

pub struct SqliteCatalogRepository {
    store: Mutex<Option<CatalogStore>>,
}

impl SqliteCatalogRepository {
    /// Wrap an already opened store.
    pub fn new(store: CatalogStore) -> Self {
        Self {
            store: Mutex::new(Some(store)),
        }
    }

    /// Open the catalog backed by `slot` and wrap it.
    pub fn open(slot: Box<dyn StorageSlot>) -> CatalogResult<Self> {
        Ok(Self::new(CatalogStore::open(slot)?))
    }

    /// Run `f` against the live store.
    ///
    /// Fails with `StoreReset` once `reset_store` has discarded the
    /// handle.
    fn with_store<T>(&self, f: impl FnOnce(&CatalogStore) -> CatalogResult<T>) -> CatalogResult<T> {
        let guard = self.store.lock().unwrap();
        let store = guard.as_ref().ok_or(CatalogError::StoreReset)?;
        f(store)
    }

    /// Convert a database row to a ContentRecord.
    fn row_to_content(row: &Row) -> rusqlite::Result<ContentRecord> {
        let kind_str: String = row.get("kind")?;
        let kind = ContentKind::parse(&kind_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                7,
                rusqlite::types::Type::Text,
                Box::new(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("Invalid content kind '{}'", kind_str),
                )),
            )
        })?;

        Ok(ContentRecord {
            id: row.get("id")?,
            title: row.get("title")?,
            year: row.get("year")?,
            genre: row.get("genre")?,
            rating: row.get("rating")?,
            poster_url: row.get("poster_url")?,
            banner_url: row.get("banner_url")?,
            kind,
            duration: row.get("duration")?,
            overview: row.get("overview")?,
            streaming_url: row.get("streaming_url")?,
        })
    }

    fn row_to_episode(row: &Row) -> rusqlite::Result<EpisodeRecord> {
        Ok(EpisodeRecord {
            id: row.get("id")?,
            content_id: row.get("content_id")?,
            episode_number: row.get("episode_number")?,
            title: row.get("title")?,
            url: row.get("url")?,
        })
    }

    fn row_to_cast_member(row: &Row) -> rusqlite::Result<CastMemberRecord> {
        Ok(CastMemberRecord {
            id: row.get("id")?,
            content_id: row.get("content_id")?,
            name: row.get("name")?,
            role: row.get("role")?,
        })
    }

    fn row_to_crew_member(row: &Row) -> rusqlite::Result<CrewMemberRecord> {
        Ok(CrewMemberRecord {
            id: row.get("id")?,
            content_id: row.get("content_id")?,
            name: row.get("name")?,
            role: row.get("role")?,
        })
    }
}

// ---------------------------------------------------------------------
// Repository contract
// ---------------------------------------------------------------------
#[cfg_attr(test, mockall::automock)]
pub trait CatalogRepository: Send + Sync {
    /// All content rows in insertion order.
    fn list_content(&self) -> CatalogResult<Vec<ContentRecord>>;

    /// One content row with its episodes, cast and crew. Episodes are
    /// ordered by episode number. Unknown ids return `None`.
    fn get_content(&self, id: i64) -> CatalogResult<Option<ContentDetails>>;

    /// Insert a content row and return its assigned id.
    fn add_content(&self, content: &NewContent) -> CatalogResult<i64>;

    /// Apply the supplied fields of `patch` to one content row.
    ///
    /// An empty patch does nothing, not even a persist. Unknown ids
    /// are silently ignored.
    fn update_content(&self, id: i64, patch: &ContentPatch) -> CatalogResult<()>;

    /// Delete a content row and all of its dependent rows.
    fn delete_content(&self, id: i64) -> CatalogResult<()>;

    /// Insert an episode and return its assigned id.
    fn add_episode(
        &self,
        content_id: i64,
        episode_number: u32,
        title: &str,
        url: &str,
    ) -> CatalogResult<i64>;

    /// Rewrite an episode's title and url. Unknown ids are ignored.
    fn update_episode(&self, id: i64, title: &str, url: &str) -> CatalogResult<()>;

    /// Delete one episode. Unknown ids are ignored.
    fn delete_episode(&self, id: i64) -> CatalogResult<()>;

    /// Insert an acting credit and return its assigned id.
    ///
    /// Credits are add-only: there is deliberately no update or
    /// delete surface for cast or crew rows. Editing a credit means
    /// deleting and re-adding the whole content entry.
    fn add_cast_member(&self, content_id: i64, name: &str, role: &str) -> CatalogResult<i64>;

    /// Insert a production credit and return its assigned id. Same
    /// add-only contract as `add_cast_member`.
    fn add_crew_member(&self, content_id: i64, name: &str, role: &str) -> CatalogResult<i64>;

    /// Snapshot the live catalog as a database image, without
    /// persisting anything.
    fn export_snapshot(&self) -> CatalogResult<Vec<u8>>;

    /// Remove the persisted image and discard the live catalog.
    ///
    /// Idempotent. Every other operation on this handle fails with
    /// `StoreReset` afterwards.
    fn reset_store(&self) -> CatalogResult<()>;

    /// Row counts and size of the live catalog.
    fn stats(&self) -> CatalogResult<StoreStats>;
}

// ---------------------------------------------------------------------
// SQLite Implementation
// ---------------------------------------------------------------------
impl CatalogRepository for SqliteCatalogRepository {
    fn list_content(&self) -> CatalogResult<Vec<ContentRecord>> {
        self.with_store(|store| {
            let mut stmt = store.conn().prepare(
                "SELECT id, title, year, genre, rating, poster_url, banner_url, kind,
                        duration, overview, streaming_url
                 FROM content ORDER BY id",
            )?;

            let rows = stmt
                .query_map([], Self::row_to_content)?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    fn get_content(&self, id: i64) -> CatalogResult<Option<ContentDetails>> {
        self.with_store(|store| {
            let conn = store.conn();

            let mut stmt = conn.prepare(
                "SELECT id, title, year, genre, rating, poster_url, banner_url, kind,
                        duration, overview, streaming_url
                 FROM content WHERE id = ?1",
            )?;

            let content = match stmt.query_row(params![id], Self::row_to_content) {
                Ok(content) => content,
                Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
                Err(e) => return Err(CatalogError::Database(e)),
            };

            let mut stmt = conn.prepare(
                "SELECT id, content_id, episode_number, title, url
                 FROM episodes WHERE content_id = ?1 ORDER BY episode_number",
            )?;
            let episodes = stmt
                .query_map(params![id], Self::row_to_episode)?
                .collect::<Result<Vec<_>, _>>()?;

            let mut stmt = conn.prepare(
                "SELECT id, content_id, name, role
                 FROM cast_members WHERE content_id = ?1 ORDER BY id",
            )?;
            let cast = stmt
                .query_map(params![id], Self::row_to_cast_member)?
                .collect::<Result<Vec<_>, _>>()?;

            let mut stmt = conn.prepare(
                "SELECT id, content_id, name, role
                 FROM crew_members WHERE content_id = ?1 ORDER BY id",
            )?;
            let crew = stmt
                .query_map(params![id], Self::row_to_crew_member)?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Some(ContentDetails {
                content,
                episodes,
                cast,
                crew,
            }))
        })
    }

    fn add_content(&self, content: &NewContent) -> CatalogResult<i64> {
        self.with_store(|store| {
            store.conn().execute(
                "INSERT INTO content (title, year, genre, rating, poster_url, banner_url,
                                      kind, duration, overview, streaming_url)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    content.title,
                    content.year,
                    content.genre,
                    content.rating,
                    content.poster_url,
                    content.banner_url,
                    content.kind.as_str(),
                    content.duration,
                    content.overview,
                    content.streaming_url,
                ],
            )?;
            let id = store.conn().last_insert_rowid();

            store.persist()?;
            Ok(id)
        })
    }

    fn update_content(&self, id: i64, patch: &ContentPatch) -> CatalogResult<()> {
        if patch.is_empty() {
            return Ok(());
        }

        self.with_store(|store| {
            // Build the SET clause from the supplied fields only, in
            // column order, with positional placeholders.
            let mut assignments: Vec<String> = Vec::new();
            let mut values: Vec<Value> = Vec::new();

            if let Some(title) = &patch.title {
                values.push(Value::Text(title.clone()));
                assignments.push(format!("title = ?{}", values.len()));
            }
            if let Some(year) = patch.year {
                values.push(Value::Integer(year));
                assignments.push(format!("year = ?{}", values.len()));
            }
            if let Some(genre) = &patch.genre {
                values.push(Value::Text(genre.clone()));
                assignments.push(format!("genre = ?{}", values.len()));
            }
            if let Some(rating) = &patch.rating {
                values.push(Value::Text(rating.clone()));
                assignments.push(format!("rating = ?{}", values.len()));
            }
            if let Some(poster_url) = &patch.poster_url {
                values.push(Value::Text(poster_url.clone()));
                assignments.push(format!("poster_url = ?{}", values.len()));
            }
            if let Some(banner_url) = &patch.banner_url {
                values.push(Value::Text(banner_url.clone()));
                assignments.push(format!("banner_url = ?{}", values.len()));
            }
            if let Some(kind) = patch.kind {
                values.push(Value::Text(kind.as_str().to_string()));
                assignments.push(format!("kind = ?{}", values.len()));
            }
            if let Some(duration) = &patch.duration {
                values.push(Value::Text(duration.clone()));
                assignments.push(format!("duration = ?{}", values.len()));
            }
            if let Some(overview) = &patch.overview {
                values.push(Value::Text(overview.clone()));
                assignments.push(format!("overview = ?{}", values.len()));
            }
            if let Some(streaming_url) = &patch.streaming_url {
                values.push(Value::Text(streaming_url.clone()));
                assignments.push(format!("streaming_url = ?{}", values.len()));
            }

            values.push(Value::Integer(id));
            let sql = format!(
                "UPDATE content SET {} WHERE id = ?{}",
                assignments.join(", "),
                values.len()
            );

            store.conn().execute(&sql, params_from_iter(values))?;

            store.persist()?;
            Ok(())
        })
    }

    fn delete_content(&self, id: i64) -> CatalogResult<()> {
        self.with_store(|store| {
            let conn = store.conn();

            // Dependents first; the foreign_keys pragma is off, so
            // cascade declarations do not fire.
            conn.execute("DELETE FROM episodes WHERE content_id = ?1", params![id])?;
            conn.execute("DELETE FROM cast_members WHERE content_id = ?1", params![id])?;
            conn.execute("DELETE FROM crew_members WHERE content_id = ?1", params![id])?;
            conn.execute("DELETE FROM content WHERE id = ?1", params![id])?;

            store.persist()?;
            Ok(())
        })
    }

    fn add_episode(
        &self,
        content_id: i64,
        episode_number: u32,
        title: &str,
        url: &str,
    ) -> CatalogResult<i64> {
        self.with_store(|store| {
            store.conn().execute(
                "INSERT INTO episodes (content_id, episode_number, title, url)
                 VALUES (?1, ?2, ?3, ?4)",
                params![content_id, episode_number as i64, title, url],
            )?;
            let id = store.conn().last_insert_rowid();

            store.persist()?;
            Ok(id)
        })
    }

    fn update_episode(&self, id: i64, title: &str, url: &str) -> CatalogResult<()> {
        self.with_store(|store| {
            store.conn().execute(
                "UPDATE episodes SET title = ?1, url = ?2 WHERE id = ?3",
                params![title, url, id],
            )?;

            store.persist()?;
            Ok(())
        })
    }

    fn delete_episode(&self, id: i64) -> CatalogResult<()> {
        self.with_store(|store| {
            store
                .conn()
                .execute("DELETE FROM episodes WHERE id = ?1", params![id])?;

            store.persist()?;
            Ok(())
        })
    }

    fn add_cast_member(&self, content_id: i64, name: &str, role: &str) -> CatalogResult<i64> {
        self.with_store(|store| {
            store.conn().execute(
                "INSERT INTO cast_members (content_id, name, role) VALUES (?1, ?2, ?3)",
                params![content_id, name, role],
            )?;
            let id = store.conn().last_insert_rowid();

            store.persist()?;
            Ok(id)
        })
    }

    fn add_crew_member(&self, content_id: i64, name: &str, role: &str) -> CatalogResult<i64> {
        self.with_store(|store| {
            store.conn().execute(
                "INSERT INTO crew_members (content_id, name, role) VALUES (?1, ?2, ?3)",
                params![content_id, name, role],
            )?;
            let id = store.conn().last_insert_rowid();

            store.persist()?;
            Ok(id)
        })
    }

    fn export_snapshot(&self) -> CatalogResult<Vec<u8>> {
        self.with_store(|store| store.export_image())
    }

    fn reset_store(&self) -> CatalogResult<()> {
        let mut guard = self.store.lock().unwrap();
        match guard.take() {
            Some(store) => store.reset(),
            None => Ok(()),
        }
    }

    fn stats(&self) -> CatalogResult<StoreStats> {
        self.with_store(|store| store.stats())
    }
}
