//! The environment snapshot: an owned capture of variable state.
//!
//! Responsibilities:
//! - Capture the process environment once, at construction.
//! - Serve reads for `get_env` and writes for the loader's merge pass.
//!
//! Does NOT handle:
//! - Mutating the OS environment. The loader merges into this value only;
//!   `std::env::set_var` is never called.
//!
//! Invariants:
//! - External changes to the process environment after capture are not
//!   observed.
//! - Entries whose name or value is not valid Unicode are skipped at
//!   capture time.

use std::collections::HashMap;

/// Captured mapping from variable name to value.
///
/// Construct once at process start with [`Snapshot::from_process`] and hand
/// it to [`crate::EnvStore`]; tests build in-memory snapshots via
/// `FromIterator` without touching the process environment.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    vars: HashMap<String, String>,
}

impl Snapshot {
    /// Empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub(crate) fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }

    pub(crate) fn vars(&self) -> &HashMap<String, String> {
        &self.vars
    }
}

impl<K, V> FromIterator<(K, V)> for Snapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
