//! End-to-end tests over the public surface.
//!
//! These exercise the full load/merge/resolve flow against real files in
//! temporary directories. Tests that read the live process environment are
//! serialized and scope their variables with `temp-env`.

use std::fs;
use std::path::PathBuf;

use serial_test::serial;
use tempfile::TempDir;

use envstore::{EnvError, EnvStore, LoadOptions, ResolveOptions, Snapshot};

fn write_env(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// The typical application startup sequence: capture the environment, then
/// layer a local override file over a shared one.
#[test]
fn startup_layering_local_over_shared() {
    let dir = TempDir::new().unwrap();
    let shared = write_env(&dir, ".env", "DATABASE_URL=postgres://prod/db\nLOG_FORMAT=json\n");
    let local = write_env(&dir, ".env.local", "DATABASE_URL=postgres://localhost/db\n");

    let mut store = EnvStore::new(Snapshot::new());
    store.load_env([&local, &shared], &LoadOptions::new()).unwrap();

    // The local file was listed first, so its value wins for the shared key.
    assert_eq!(
        store
            .require_env("DATABASE_URL", &ResolveOptions::new())
            .unwrap(),
        "postgres://localhost/db"
    );
    assert_eq!(
        store.require_env("LOG_FORMAT", &ResolveOptions::new()).unwrap(),
        "json"
    );
    assert!(store.has_loaded_env(&local));
    assert!(store.has_loaded_env(&shared));
}

#[test]
fn overwrite_load_replaces_captured_values() {
    let dir = TempDir::new().unwrap();
    let path = write_env(&dir, ".env", "APP_MODE=file\n");

    let mut store = EnvStore::new([("APP_MODE", "captured")].into_iter().collect());

    // Default merge keeps what the snapshot already had.
    store.load_env([&path], &LoadOptions::new()).unwrap();
    assert_eq!(store.snapshot().get("APP_MODE"), Some("captured"));

    // A forced reload with overwrite replaces it.
    store
        .load_env([&path], &LoadOptions::new().overwrite().reload())
        .unwrap();
    assert_eq!(store.snapshot().get("APP_MODE"), Some("file"));
}

#[test]
fn accessor_policies_compose_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = write_env(&dir, ".env", "KEY=VALUE\nEMPTY=\n");

    let mut store = EnvStore::new(Snapshot::new());

    assert_eq!(
        store
            .get_env_from(&path, "KEY", &ResolveOptions::new())
            .unwrap()
            .as_deref(),
        Some("VALUE")
    );
    assert!(matches!(
        store.get_env_from(&path, "EMPTY", &ResolveOptions::new()),
        Err(EnvError::EmptyValue { .. })
    ));
    assert_eq!(
        store
            .get_env_from(&path, "EMPTY", &ResolveOptions::new().allow_empty())
            .unwrap()
            .as_deref(),
        Some("")
    );
    assert_eq!(
        store
            .get_env_from(&path, "MISSING", &ResolveOptions::new().with_fallback("X"))
            .unwrap()
            .as_deref(),
        Some("X")
    );
    assert_eq!(
        store
            .get_env_from(&path, "MISSING", &ResolveOptions::new().optional())
            .unwrap(),
        None
    );
    assert_eq!(
        store
            .get_env_from(
                &path,
                "MISSING",
                &ResolveOptions::new().with_fallback_fn(|| "computed".to_string())
            )
            .unwrap()
            .as_deref(),
        Some("computed")
    );
}

#[test]
fn error_messages_name_operation_and_subject() {
    let dir = TempDir::new().unwrap();
    let path = write_env(&dir, ".env", "A=1\n");

    let mut store = EnvStore::new(Snapshot::new());

    let err = store.get_env("MISSING", &ResolveOptions::new()).unwrap_err();
    assert_eq!(err.to_string(), "get_env: missing required key MISSING");

    let err = store
        .get_env_from("./.env", "A", &ResolveOptions::new())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "get_env_from requires an absolute file path (got ./.env)"
    );

    store.load_env([&path], &LoadOptions::new()).unwrap();
    let err = store.load_env([&path], &LoadOptions::new()).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("load_env: "), "got: {}", message);
    assert!(
        message.contains(&path.display().to_string()),
        "got: {}",
        message
    );
}

#[test]
fn missing_file_error_carries_not_found_source() {
    let dir = TempDir::new().unwrap();
    let absent = dir.path().join(".env.fail");

    let mut store = EnvStore::new(Snapshot::new());
    let err = store
        .get_env_from(&absent, "KEY", &ResolveOptions::new())
        .unwrap_err();
    match err {
        EnvError::Read { ref source, .. } => {
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        ref other => panic!("expected Read error, got {:?}", other),
    }
    // load_env surfaces the same underlying error.
    assert!(matches!(
        store.load_env([&absent], &LoadOptions::new().reload()),
        Err(EnvError::Read { .. })
    ));
}

#[test]
#[serial]
fn process_capture_feeds_resolution() {
    temp_env::with_vars(
        [
            ("ENVSTORE_IT_PRESENT", Some("live")),
            ("ENVSTORE_IT_EMPTY", Some("")),
        ],
        || {
            let store = EnvStore::from_process();
            assert_eq!(
                store
                    .require_env("ENVSTORE_IT_PRESENT", &ResolveOptions::new())
                    .unwrap(),
                "live"
            );
            assert!(matches!(
                store.get_env("ENVSTORE_IT_EMPTY", &ResolveOptions::new()),
                Err(EnvError::EmptyValue { .. })
            ));
        },
    );
}

#[test]
#[serial]
fn loading_never_writes_the_process_environment() {
    let dir = TempDir::new().unwrap();
    let path = write_env(&dir, ".env", "ENVSTORE_IT_FILE_ONLY=1\n");

    let mut store = EnvStore::from_process();
    store.load_env([&path], &LoadOptions::new()).unwrap();

    assert_eq!(store.snapshot().get("ENVSTORE_IT_FILE_ONLY"), Some("1"));
    assert!(std::env::var_os("ENVSTORE_IT_FILE_ONLY").is_none());
}
