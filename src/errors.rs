use std::io;

/// Failures of the key-value medium underneath the habit store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read key `{key}`: {source}")]
    Read { key: String, source: io::Error },
    #[error("failed to write key `{key}`: {source}")]
    Write { key: String, source: io::Error },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum HabitError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("habit collection is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("habit `{0}` already exists")]
    DuplicateId(String),
    #[error("habit name cannot be empty")]
    EmptyName,
}

impl HabitError {
    pub fn is_storage(&self) -> bool {
        matches!(self, HabitError::Storage(_) | HabitError::Corrupt(_))
    }
}
