//! Database backup with a fixed-size rotation window.
//!
//! Each cycle snapshots the live database via `VACUUM INTO` under a
//! timestamped name. Timestamps sort lexicographically, so the oldest
//! artifact is simply the first name in sorted order.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::{store::SqliteStore, Result};

const PREFIX: &str = "till-";
const SUFFIX: &str = ".db";

impl SqliteStore {
  /// Snapshot the live database into `directory`.
  ///
  /// If `retain` or more backups already exist there, the single oldest is
  /// deleted first. Eviction is best-effort: a failed delete is logged and
  /// the new backup is still written.
  pub(crate) async fn snapshot(&self, directory: &Path, retain: usize) -> Result<PathBuf> {
    std::fs::create_dir_all(directory)?;

    if let Some(oldest) = oldest_backup(directory, retain)?
      && let Err(err) = std::fs::remove_file(&oldest)
    {
      tracing::warn!(path = %oldest.display(), %err, "could not evict oldest backup");
    }

    let name = format!(
      "{PREFIX}{}{SUFFIX}",
      Utc::now().format("%Y%m%dT%H%M%S%3f")
    );
    let target = directory.join(name);
    let target_sql = target.to_string_lossy().into_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute("VACUUM INTO ?1", rusqlite::params![target_sql])?;
        Ok(())
      })
      .await?;

    tracing::info!(path = %target.display(), "wrote backup");
    Ok(target)
  }
}

/// The oldest backup in `dir`, if at least `retain` already exist.
fn oldest_backup(dir: &Path, retain: usize) -> Result<Option<PathBuf>> {
  let mut backups: Vec<PathBuf> = std::fs::read_dir(dir)?
    .filter_map(|entry| entry.ok())
    .map(|entry| entry.path())
    .filter(|path| {
      path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(PREFIX) && n.ends_with(SUFFIX))
    })
    .collect();

  if backups.len() < retain {
    return Ok(None);
  }

  backups.sort();
  Ok(backups.into_iter().next())
}
