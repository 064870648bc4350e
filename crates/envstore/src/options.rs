//! Per-call policy values for variable resolution and file loading.
//!
//! Responsibilities:
//! - Define `ResolveOptions` (required-ness, empty-value tolerance, fallback).
//! - Define `LoadOptions` (overwrite and reload flags for the loader).
//! - Represent fallbacks as an explicit literal-or-supplier variant.
//!
//! Invariants:
//! - A supplier fallback is evaluated lazily, only when the fallback is
//!   actually used.
//! - Fallback presence, not the emptiness of its value, is what gates the
//!   fallback branches in the resolver.

use std::fmt;

/// Substitute value used when a key is absent, or present but empty.
pub enum Fallback {
    /// A fixed replacement value. An empty string is a valid fallback.
    Literal(String),
    /// A zero-argument supplier, invoked only when the fallback is used.
    Supplier(Box<dyn Fn() -> String + Send + Sync>),
}

impl Fallback {
    pub(crate) fn value(&self) -> String {
        match self {
            Fallback::Literal(value) => value.clone(),
            Fallback::Supplier(supplier) => supplier(),
        }
    }
}

impl fmt::Debug for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Fallback::Supplier(_) => f.write_str("Supplier(..)"),
        }
    }
}

/// Policy controlling how a single variable lookup is resolved.
///
/// Defaults: the key is required, an empty string is rejected, and no
/// fallback is configured.
#[derive(Debug)]
pub struct ResolveOptions {
    require: bool,
    allow_empty: bool,
    fallback: Option<Fallback>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self {
            require: true,
            allow_empty: false,
            fallback: None,
        }
    }

    /// Absent keys resolve to `None` instead of failing.
    pub fn optional(mut self) -> Self {
        self.require = false;
        self
    }

    /// Accept an empty string as a valid value.
    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    /// Fixed substitute for an absent or empty value.
    pub fn with_fallback(mut self, value: impl Into<String>) -> Self {
        self.fallback = Some(Fallback::Literal(value.into()));
        self
    }

    /// Like [`ResolveOptions::with_fallback`], but the substitute is
    /// computed only if the fallback is used.
    pub fn with_fallback_fn(
        mut self,
        supplier: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        self.fallback = Some(Fallback::Supplier(Box::new(supplier)));
        self
    }

    pub(crate) fn is_required(&self) -> bool {
        self.require
    }

    pub(crate) fn allows_empty(&self) -> bool {
        self.allow_empty
    }

    pub(crate) fn fallback(&self) -> Option<&Fallback> {
        self.fallback.as_ref()
    }
}

/// Flags controlling how env files are merged into the snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    overwrite: bool,
    reload: bool,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loaded keys replace existing snapshot values. Without this, keys
    /// already present in the snapshot are never touched.
    pub fn overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }

    /// Permit loading a path that was already merged. The path stays
    /// registered and its file is parsed afresh.
    pub fn reload(mut self) -> Self {
        self.reload = true;
        self
    }

    pub(crate) fn overwrites(&self) -> bool {
        self.overwrite
    }

    pub(crate) fn reloads(&self) -> bool {
        self.reload
    }
}
