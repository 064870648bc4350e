//! Registry of paths already merged into the snapshot.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Set of absolute paths the loader has merged. Membership survives
/// reloads; a registered path is only merged again when reload is
/// explicitly requested.
#[derive(Debug, Default)]
pub(crate) struct LoadedPaths {
    paths: HashSet<PathBuf>,
}

impl LoadedPaths {
    pub(crate) fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub(crate) fn register(&mut self, path: &Path) {
        self.paths.insert(path.to_path_buf());
    }
}
