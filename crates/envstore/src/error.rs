//! Error types for variable resolution and file loading.
//!
//! Invariants:
//! - Every variant names the originating operation and the offending
//!   key or path in its message.
//! - Parse failures carry the byte position only, never raw line content,
//!   so secrets in a malformed env file cannot leak into messages or logs.

use std::path::PathBuf;
use thiserror::Error;

use crate::resolver::Op;

/// Errors that can occur while resolving variables or loading env files.
///
/// All errors are fatal to the calling operation; there is no partial
/// success and no retry.
#[derive(Error, Debug)]
pub enum EnvError {
    /// A required key was absent and no fallback was configured.
    #[error("{op}: missing required key {key}")]
    MissingKey { op: Op, key: String },

    /// A present key held an empty string and neither `allow_empty` nor a
    /// fallback permitted it.
    #[error("{op}: saw empty value for key {key}")]
    EmptyValue { op: Op, key: String },

    /// A relative path was given where an absolute path is required.
    #[error("{op} requires an absolute file path (got {})", .path.display())]
    InvalidPath { op: Op, path: PathBuf },

    /// The loader was invoked with nothing to load.
    #[error("load_env: no file paths specified to load")]
    NoPathsSpecified,

    /// The path was already merged into the snapshot and reload was not
    /// requested.
    #[error("load_env: {} has already been merged into the snapshot", .path.display())]
    AlreadyLoaded { path: PathBuf },

    /// Reading the env file failed; the underlying I/O error is preserved.
    #[error("failed to read env file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The env file has invalid syntax at the given byte position.
    #[error("failed to parse env file {} at position {error_index}", .path.display())]
    Parse { path: PathBuf, error_index: usize },
}
