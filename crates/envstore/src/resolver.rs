//! Presence/emptiness/fallback resolution for a single variable lookup.
//!
//! Responsibilities:
//! - Apply the per-call policy from `ResolveOptions` to one key in one
//!   source mapping.
//! - Name the calling operation in every failure.
//!
//! Does NOT handle:
//! - Choosing the source mapping (see store.rs).
//! - File reading or caching (see cache.rs).
//!
//! Invariants:
//! - Emptiness is only checked for present keys; absence and emptiness are
//!   gated independently.
//! - Fallback presence is the gate, not fallback truthiness: an empty-string
//!   literal fallback is honored.
//! - For a present-but-empty value, `allow_empty` is consulted before the
//!   fallback, so an explicitly permitted empty string is returned as-is.

use std::collections::HashMap;
use std::fmt;

use crate::error::EnvError;
use crate::options::ResolveOptions;

/// The public operation a resolution or validation failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    GetEnv,
    GetEnvFrom,
    LoadEnv,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Op::GetEnv => "get_env",
            Op::GetEnvFrom => "get_env_from",
            Op::LoadEnv => "load_env",
        };
        f.write_str(name)
    }
}

/// Resolve `key` against `source` under `options`.
///
/// Returns `Ok(None)` only when the key is absent, no fallback is set, and
/// the options made the key optional.
pub(crate) fn resolve(
    op: Op,
    source: &HashMap<String, String>,
    key: &str,
    options: &ResolveOptions,
) -> Result<Option<String>, EnvError> {
    let Some(value) = source.get(key) else {
        if let Some(fallback) = options.fallback() {
            return Ok(Some(fallback.value()));
        }
        if options.is_required() {
            return Err(EnvError::MissingKey {
                op,
                key: key.to_string(),
            });
        }
        return Ok(None);
    };

    if value.is_empty() {
        if options.allows_empty() {
            return Ok(Some(String::new()));
        }
        if let Some(fallback) = options.fallback() {
            return Ok(Some(fallback.value()));
        }
        return Err(EnvError::EmptyValue {
            op,
            key: key.to_string(),
        });
    }

    Ok(Some(value.clone()))
}
