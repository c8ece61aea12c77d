// src/store/codec.rs
//
// Image codec: turns the live in-memory database into a byte image
// and back, plus the text encoding stored in the slot
//
// PRINCIPLES:
// - Snapshots never mutate the source database
// - Restore validates: garbage bytes are an error, not an empty catalog
// - Slot text is a JSON array of bytes, one number per byte

use std::os::raw::c_int;
use std::time::Duration;

use rusqlite::backup::Backup;
use rusqlite::Connection;

use crate::error::CatalogResult;

/// Pages copied per backup step. The catalog is small; one or two
/// steps cover it.
const PAGES_PER_STEP: c_int = 128;

/// Serialize the live database into a standalone byte image.
///
/// The image is a complete SQLite database file, produced by backing
/// the connection up into a scratch file and reading it back. The
/// source connection is only read.
pub fn snapshot(conn: &Connection) -> CatalogResult<Vec<u8>> {
    let scratch = tempfile::tempdir()?;
    let scratch_path = scratch.path().join("snapshot.db");

    let mut target = Connection::open(&scratch_path)?;
    {
        let backup = Backup::new(conn, &mut target)?;
        backup.run_to_completion(PAGES_PER_STEP, Duration::ZERO, None)?;
    }
    target.close().map_err(|(_, e)| e)?;

    let image = std::fs::read(&scratch_path)?;
    Ok(image)
}

/// Open a fresh in-memory database from a byte image.
///
/// Fails if the bytes are not a well-formed SQLite database.
pub fn restore(image: &[u8]) -> CatalogResult<Connection> {
    let scratch = tempfile::tempdir()?;
    let scratch_path = scratch.path().join("restore.db");
    std::fs::write(&scratch_path, image)?;

    let source = Connection::open(&scratch_path)?;
    let mut conn = Connection::open_in_memory()?;
    {
        let backup = Backup::new(&source, &mut conn)?;
        backup.run_to_completion(PAGES_PER_STEP, Duration::ZERO, None)?;
    }
    source.close().map_err(|(_, e)| e)?;

    Ok(conn)
}

/// Encode a byte image as slot text: `[82,101,...]`.
pub fn encode_image(image: &[u8]) -> CatalogResult<String> {
    let text = serde_json::to_string(image)?;
    Ok(text)
}

/// Decode slot text back into a byte image.
pub fn decode_image(text: &str) -> CatalogResult<Vec<u8>> {
    let image = serde_json::from_str(text)?;
    Ok(image)
}
