//! The public store composing snapshot, file cache, and loaded-path
//! registry.
//!
//! Responsibilities:
//! - Resolve variables against the snapshot (`get_env`, `require_env`) or
//!   against a single file's cached mapping (`get_env_from`,
//!   `require_env_from`).
//! - Merge env files into the snapshot (`load_env`) and answer duplicate-
//!   load queries (`has_loaded_env`).
//!
//! Does NOT handle:
//! - The resolution policy itself (see resolver.rs).
//! - File parsing (see cache.rs, which delegates to `dotenvy`).
//!
//! Invariants:
//! - `load_env` validates and registers every path before any file is read;
//!   a failing path later in a batch leaves earlier paths registered.
//! - `get_env_from` never touches the snapshot or the registry; its only
//!   side effect is populating the file cache.
//! - All state lives in this value. Sharing it across threads is the
//!   caller's lock to take.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::cache::{FileCache, ensure_absolute};
use crate::error::EnvError;
use crate::options::{LoadOptions, ResolveOptions};
use crate::registry::LoadedPaths;
use crate::resolver::{Op, resolve};
use crate::snapshot::Snapshot;

/// Typed, validated access to environment variables, with env-file loading.
///
/// Construct once at process start, usually via [`EnvStore::from_process`],
/// and pass it by reference to everything that reads configuration.
#[derive(Debug)]
pub struct EnvStore {
    snapshot: Snapshot,
    cache: FileCache,
    loaded: LoadedPaths,
}

impl EnvStore {
    /// Store over an explicit snapshot. Tests use this with in-memory
    /// snapshots to avoid touching the process environment.
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            cache: FileCache::default(),
            loaded: LoadedPaths::default(),
        }
    }

    /// Store over a capture of the current process environment.
    pub fn from_process() -> Self {
        Self::new(Snapshot::from_process())
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Resolve `key` against the snapshot.
    ///
    /// Returns `Ok(None)` only when the key is absent, no fallback is set,
    /// and [`ResolveOptions::optional`] made the key optional.
    pub fn get_env(&self, key: &str, options: &ResolveOptions) -> Result<Option<String>, EnvError> {
        resolve(Op::GetEnv, self.snapshot.vars(), key, options)
    }

    /// Like [`EnvStore::get_env`], but unwraps the optional: a `None`
    /// resolution fails with [`EnvError::MissingKey`].
    pub fn require_env(&self, key: &str, options: &ResolveOptions) -> Result<String, EnvError> {
        match self.get_env(key, options)? {
            Some(value) => Ok(value),
            None => Err(EnvError::MissingKey {
                op: Op::GetEnv,
                key: key.to_string(),
            }),
        }
    }

    /// Resolve `key` against the mapping parsed from `path`, reading the
    /// file on first use and serving the cached mapping afterwards.
    ///
    /// The snapshot and the loaded-path registry are never touched.
    pub fn get_env_from(
        &mut self,
        path: impl AsRef<Path>,
        key: &str,
        options: &ResolveOptions,
    ) -> Result<Option<String>, EnvError> {
        let path = path.as_ref();
        ensure_absolute(Op::GetEnvFrom, path)?;
        let vars = self.cache.get_or_load(path)?;
        resolve(Op::GetEnvFrom, vars, key, options)
    }

    /// Like [`EnvStore::get_env_from`], but unwraps the optional.
    pub fn require_env_from(
        &mut self,
        path: impl AsRef<Path>,
        key: &str,
        options: &ResolveOptions,
    ) -> Result<String, EnvError> {
        match self.get_env_from(path, key, options)? {
            Some(value) => Ok(value),
            None => Err(EnvError::MissingKey {
                op: Op::GetEnvFrom,
                key: key.to_string(),
            }),
        }
    }

    /// Merge env files into the snapshot, in order.
    ///
    /// Three passes: validate and register every path, then parse every
    /// file afresh, then merge. Under [`LoadOptions::overwrite`] later
    /// paths win ties; otherwise the first path to define an unset key
    /// wins and keys already in the snapshot are never touched.
    pub fn load_env<I, P>(&mut self, paths: I, options: &LoadOptions) -> Result<(), EnvError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
        if paths.is_empty() {
            return Err(EnvError::NoPathsSpecified);
        }

        for path in &paths {
            ensure_absolute(Op::LoadEnv, path)?;
            if !options.reloads() && self.loaded.contains(path) {
                return Err(EnvError::AlreadyLoaded { path: path.clone() });
            }
            self.loaded.register(path);
        }

        for path in &paths {
            self.cache.load_and_cache(path)?;
        }

        for path in &paths {
            let Some(vars) = self.cache.get(path) else {
                continue;
            };
            debug!(
                path = %path.display(),
                keys = vars.len(),
                overwrite = options.overwrites(),
                "merging env file into snapshot"
            );
            for (key, value) in vars {
                if options.overwrites() || !self.snapshot.contains(key) {
                    self.snapshot.set(key, value);
                } else {
                    trace!(key = %key, "keeping existing snapshot value");
                }
            }
        }

        Ok(())
    }

    /// Whether `path` has been merged into the snapshot by `load_env`.
    pub fn has_loaded_env(&self, path: impl AsRef<Path>) -> bool {
        self.loaded.contains(path.as_ref())
    }
}
