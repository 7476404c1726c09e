use std::{
    fs::{self, File},
    io::{Read, Write},
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use famhub_core::store::{KvError, KvStore};
use tempfile::NamedTempFile;
use tracing::instrument;

/// File-backed store implementing the shared `KvStore` contract. Each key
/// maps to `<root>/<key>.json`; values are whatever bytes the caller wrote
/// (JSON throughout FamHub, so files stay inspectable with a text editor).
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_key(key)))
    }
}

#[async_trait]
impl KvStore for JsonFileStore {
    #[instrument(skip_all, fields(key))]
    async fn get(&self, key: &str) -> Result<Vec<u8>, KvError> {
        let path = self.path_for(key);
        let mut file = File::open(&path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                KvError::NotFound {
                    key: key.to_string(),
                }
            } else {
                storage_err(err)
            }
        })?;

        let mut buf = Vec::new();
        file.read_to_end(&mut buf).map_err(storage_err)?;
        Ok(buf)
    }

    #[instrument(skip_all, fields(key))]
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        fs::create_dir_all(&self.root).map_err(storage_err)?;
        write_atomic(&self.path_for(key), value)
    }

    #[instrument(skip_all, fields(key))]
    async fn remove(&self, key: &str) -> Result<(), KvError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(_) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_err(err)),
        }
    }
}

fn write_atomic(path: &Path, value: &[u8]) -> Result<(), KvError> {
    let parent = path.parent().ok_or_else(|| KvError::Storage {
        reason: "invalid storage path".to_string(),
    })?;
    fs::create_dir_all(parent).map_err(storage_err)?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(storage_err)?;
    tmp.write_all(value).map_err(storage_err)?;
    tmp.flush().map_err(storage_err)?;
    tmp.persist(path).map_err(|e| storage_err(e.error))?;
    Ok(())
}

// Keys are internal constants, but a hostile or future key must not escape
// the data directory.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

fn storage_err<E: ToString>(err: E) -> KvError {
    KvError::Storage {
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use famhub_core::store::storage_key;

    use super::*;

    #[tokio::test]
    async fn set_then_get_round_trips_bytes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path());

        let key = storage_key("tasks");
        let value = br#"[{"title":"laundry"}]"#;
        store.set(&key, value).await.expect("set");
        assert_eq!(store.get(&key).await.expect("get"), value);
    }

    #[tokio::test]
    async fn get_missing_key_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path());

        let err = store.get("famhub_meals").await.expect_err("missing key");
        assert!(matches!(err, KvError::NotFound { .. }));
    }

    #[tokio::test]
    async fn set_overwrites_unconditionally() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path());

        store.set("k", b"first").await.expect("set");
        store.set("k", b"second").await.expect("overwrite");
        assert_eq!(store.get("k").await.expect("get"), b"second");
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path());

        store.set("k", b"v").await.expect("set");
        store.remove("k").await.expect("remove");
        store.remove("k").await.expect("remove again");

        let err = store.get("k").await.expect_err("should be missing");
        assert!(matches!(err, KvError::NotFound { .. }));
    }

    #[tokio::test]
    async fn files_are_plain_inspectable_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path());

        let key = storage_key("grocery");
        store.set(&key, br#"[{"name":"milk"}]"#).await.expect("set");

        let on_disk = std::fs::read_to_string(store.path_for(&key)).expect("read file");
        assert!(on_disk.contains("milk"));
    }

    #[test]
    fn sanitize_keeps_paths_inside_the_root() {
        assert_eq!(sanitize_key("famhub_tasks"), "famhub_tasks");
        assert_eq!(sanitize_key("../escape"), "---escape");
    }
}
