//! Parsed env-file cache and path validation.
//!
//! Responsibilities:
//! - Validate that paths are absolute before any file-system access.
//! - Read and parse env files via `dotenvy`, memoizing the result per path.
//! - Map `dotenvy` failures onto [`EnvError`].
//!
//! Does NOT handle:
//! - Merging parsed mappings into the snapshot (see store.rs).
//! - Duplicate-load bookkeeping (see registry.rs).
//!
//! Invariants:
//! - A cached entry is only replaced by another `load_and_cache` call; the
//!   file is never silently re-read behind a `get`.
//! - Parse failures carry the byte position only, never raw line content.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::EnvError;
use crate::resolver::Op;

/// Fail with [`EnvError::InvalidPath`] unless `path` is absolute.
pub(crate) fn ensure_absolute(op: Op, path: &Path) -> Result<(), EnvError> {
    if path.is_absolute() {
        Ok(())
    } else {
        Err(EnvError::InvalidPath {
            op,
            path: path.to_path_buf(),
        })
    }
}

/// Memoized parse results, keyed by absolute file path.
#[derive(Debug, Default)]
pub(crate) struct FileCache {
    entries: HashMap<PathBuf, HashMap<String, String>>,
}

impl FileCache {
    pub(crate) fn get(&self, path: &Path) -> Option<&HashMap<String, String>> {
        self.entries.get(path)
    }

    /// Return the cached mapping for `path`, reading and parsing the file
    /// on first use.
    pub(crate) fn get_or_load(&mut self, path: &Path) -> Result<&HashMap<String, String>, EnvError> {
        match self.entries.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let vars = parse_env_file(path)?;
                Ok(entry.insert(vars))
            }
        }
    }

    /// Read and parse `path`, replacing any cached entry. Used both for
    /// first loads and for forced reloads.
    pub(crate) fn load_and_cache(&mut self, path: &Path) -> Result<&HashMap<String, String>, EnvError> {
        let vars = parse_env_file(path)?;
        let entry = self.entries.entry(path.to_path_buf()).or_default();
        *entry = vars;
        Ok(entry)
    }
}

fn parse_env_file(path: &Path) -> Result<HashMap<String, String>, EnvError> {
    let iter = dotenvy::from_path_iter(path).map_err(|err| read_error(path, err))?;
    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(|err| read_error(path, err))?;
        vars.insert(key, value);
    }
    debug!(path = %path.display(), keys = vars.len(), "parsed env file");
    Ok(vars)
}

/// Map a `dotenvy` failure onto [`EnvError`]. Line-parse failures are
/// reported by byte position only.
fn read_error(path: &Path, err: dotenvy::Error) -> EnvError {
    match err {
        dotenvy::Error::Io(source) => EnvError::Read {
            path: path.to_path_buf(),
            source,
        },
        dotenvy::Error::LineParse(_, error_index) => EnvError::Parse {
            path: path.to_path_buf(),
            error_index,
        },
        other => EnvError::Read {
            path: path.to_path_buf(),
            source: std::io::Error::other(other),
        },
    }
}
