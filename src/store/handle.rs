// src/store/handle.rs
//
// The catalog store handle: one in-memory database bound to the slot
// it persists into
//
// PRINCIPLES:
// - Open restores the persisted image when one exists, seeds otherwise
// - Every caller-visible mutation ends with a persist
// - Export reads the live database without touching the slot

use rusqlite::Connection;

use crate::error::CatalogResult;
use crate::store::codec;
use crate::store::schema::{self, StoreStats};
use crate::store::seed;
use crate::store::slot::StorageSlot;

/// Slot key the catalog image lives under.
pub const STORE_IMAGE_KEY: &str = "pavi_movies_db";

/// A live catalog: an in-memory SQLite database plus the storage slot
/// its image is saved into.
pub struct CatalogStore {
    conn: Connection,
    slot: Box<dyn StorageSlot>,
}

impl CatalogStore {
    /// Open the catalog backed by `slot`.
    ///
    /// If the slot holds an image, the catalog is restored from it and
    /// nothing is written back. If the slot is empty, a fresh catalog
    /// is created, seeded with the initial titles, and persisted so
    /// the next open sees it.
    ///
    /// A slot value that cannot be decoded or restored is an error;
    /// the persisted catalog is never silently replaced.
    pub fn open(slot: Box<dyn StorageSlot>) -> CatalogResult<Self> {
        match slot.get(STORE_IMAGE_KEY)? {
            Some(text) => {
                let image = codec::decode_image(&text)?;
                let conn = codec::restore(&image)?;
                log::debug!("Catalog restored from persisted image ({} bytes)", image.len());
                Ok(CatalogStore { conn, slot })
            }
            None => {
                let conn = Connection::open_in_memory()?;
                schema::create_tables(&conn)?;
                seed::seed_catalog(&conn)?;

                let store = CatalogStore { conn, slot };
                store.persist()?;
                log::info!("Catalog seeded with initial titles");
                Ok(store)
            }
        }
    }

    /// The live database connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Snapshot the live database and write the image into the slot.
    ///
    /// Whole-image overwrite every time: when two handles share one
    /// slot, the last persist wins and the other handle's writes are
    /// gone from the slot. If the slot write fails the in-memory
    /// mutation stands; there is no rollback.
    pub fn persist(&self) -> CatalogResult<()> {
        let image = codec::snapshot(&self.conn)?;
        let text = codec::encode_image(&image)?;
        self.slot.put(STORE_IMAGE_KEY, &text)?;
        Ok(())
    }

    /// Snapshot the live database without persisting.
    ///
    /// The returned image is a complete SQLite database file, suitable
    /// for download or backup.
    pub fn export_image(&self) -> CatalogResult<Vec<u8>> {
        codec::snapshot(&self.conn)
    }

    /// Discard the catalog: remove the persisted image and drop the
    /// live database. The next open starts from seed data.
    pub fn reset(self) -> CatalogResult<()> {
        self.slot.remove(STORE_IMAGE_KEY)?;
        Ok(())
    }

    /// Row counts and size of the live catalog.
    pub fn stats(&self) -> CatalogResult<StoreStats> {
        schema::collect_stats(&self.conn)
    }
}
