//! Typed, validated access to process environment variables.
//!
//! This crate resolves variables against an owned snapshot of the process
//! environment, with per-call policy for required-ness, empty values, and
//! fallbacks, and merges dotenv-style files into that snapshot while
//! guarding against accidental double loads. Parsing of the `key=value`
//! grammar is delegated to `dotenvy`.

mod cache;
mod error;
mod options;
mod registry;
mod resolver;
mod snapshot;
mod store;

pub use error::EnvError;
pub use options::{Fallback, LoadOptions, ResolveOptions};
pub use resolver::Op;
pub use snapshot::Snapshot;
pub use store::EnvStore;
