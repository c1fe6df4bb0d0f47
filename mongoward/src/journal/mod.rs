//! Journal preallocation for the state database.
//!
//! On an empty data directory mongod allocates its journal segments
//! itself, and with `--smallfiles` it still creates them far larger than
//! this deployment needs. Creating small placeholder files before the
//! first start makes it adopt those instead.


use std::fs::Permissions;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use anyerror::AnyError;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::errors::JournalError;

/// Number of preallocation files mongod expects to find.
const PREALLOC_FILES: u32 = 3;

/// Minimum size of one preallocation file.
const PREALLOC_SIZE: u64 = 1024 * 1024;

/// Zero-filled write granularity.
const CHUNK_SIZE: usize = 64 * 1024;

/// Ensure `<db_dir>/journal` exists with owner-only permissions and
/// contains the full set of preallocation files, each at least 1 MiB of
/// zeroes.
///
/// Only call this while the service is not installed yet: once the
/// database has taken ownership of the directory, recreating the files
/// would clobber a live journal. A failure leaves partial files in place;
/// the next pass rewrites them from scratch.
pub async fn make_journal_dirs(db_dir: &Path) -> Result<(), JournalError> {
    let journal_dir = db_dir.join("journal");

    debug!("creating journal directory {}", journal_dir.display());

    fs::create_dir_all(&journal_dir).await.map_err(|e| {
        JournalError::CreateDir {
            dir: journal_dir.display().to_string(),
            source: AnyError::new(&e),
        }
    })?;
    fs::set_permissions(&journal_dir, Permissions::from_mode(0o700))
        .await
        .map_err(|e| JournalError::CreateDir {
            dir: journal_dir.display().to_string(),
            source: AnyError::new(&e),
        })?;

    let zeroes = vec![0u8; CHUNK_SIZE];

    for i in 0..PREALLOC_FILES {
        let path = journal_dir.join(format!("prealloc.{}", i));

        let res = preallocate(&path, &zeroes).await;
        res.map_err(|e| JournalError::Prealloc {
            path: path.display().to_string(),
            source: AnyError::new(&e),
        })?;
    }

    Ok(())
}

async fn preallocate(
    path: &Path,
    zeroes: &[u8],
) -> Result<(), std::io::Error> {
    let mut f = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o700)
        .open(path)
        .await?;

    let mut total: u64 = 0;
    while total < PREALLOC_SIZE {
        f.write_all(zeroes).await?;
        total += zeroes.len() as u64;
    }
    f.flush().await?;

    Ok(())
}
