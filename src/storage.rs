use crate::errors::StorageError;
use std::collections::HashMap;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::{env, process};
use tokio::{fs, sync::Mutex};
use tracing::debug;

pub const DATA_DIR_ENV: &str = "HABIT_DATA_DIR";

pub fn resolve_data_dir() -> PathBuf {
    data_dir_from(env::var(DATA_DIR_ENV).ok())
}

fn data_dir_from(value: Option<String>) -> PathBuf {
    match value {
        Some(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from("data"),
    }
}

/// String key-value medium the habit collection is persisted in.
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when nothing has been stored under `key` yet.
    fn get_item(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    fn set_item(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).await.map_err(write_err)?;

        // Readers only ever see the old or the new file.
        let path = self.path_for(key);
        let tmp = path.with_extension(format!("json.{}.tmp", process::id()));
        fs::write(&tmp, value).await.map_err(write_err)?;
        if let Err(source) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(write_err(source));
        }

        debug!(path = %path.display(), bytes = value.len(), "persisted key");
        Ok(())
    }
}

/// In-process store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    items: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_reads(&self, fail: bool) {
        self.inner.lock().await.fail_reads = fail;
    }

    pub async fn set_fail_writes(&self, fail: bool) {
        self.inner.lock().await.fail_writes = fail;
    }

    pub async fn raw(&self, key: &str) -> Option<String> {
        self.inner.lock().await.items.get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let inner = self.inner.lock().await;
        if inner.fail_reads {
            return Err(StorageError::Unavailable(format!("read of `{key}` refused")));
        }
        Ok(inner.items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().await;
        if inner.fail_writes {
            return Err(StorageError::Unavailable(format!("write of `{key}` refused")));
        }
        inner.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
