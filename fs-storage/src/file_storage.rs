use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::base_storage::AvatarStore;
use crate::AvatarRecord;
use data_error::{AvatarError, Result};

const STORAGE_VERSION: i32 = 1;

/// Avatar records of all users in a single JSON document on disk.
pub struct FileAvatarStore {
    label: String,
    path: PathBuf,
    data: FileStorageData,
}

/// The document that is serialized to and from disk.
#[derive(Clone, Serialize, Deserialize)]
struct FileStorageData {
    version: i32,
    entries: BTreeMap<String, AvatarRecord>,
}

impl FileStorageData {
    fn empty() -> Self {
        Self {
            version: STORAGE_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

impl FileAvatarStore {
    /// Create an empty store with a diagnostic label and file path.
    /// Nothing is written until the first save.
    pub fn new(label: String, path: &Path) -> Self {
        Self {
            label,
            path: PathBuf::from(path),
            data: FileStorageData::empty(),
        }
    }

    /// Open the store at `path`, loading existing records if the file
    /// is present.
    pub fn open(label: String, path: &Path) -> Result<Self> {
        let mut store = Self::new(label, path);
        if store.path.exists() {
            store.read_fs()?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.data.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.entries.is_empty()
    }

    pub fn user_ids(&self) -> impl Iterator<Item = &str> {
        self.data.entries.keys().map(String::as_str)
    }

    fn read_fs(&mut self) -> Result<()> {
        let file = fs::File::open(&self.path)?;
        let data: FileStorageData = serde_json::from_reader(file)
            .map_err(|err| AvatarError::Storage(self.label.clone(), err.to_string()))?;
        if data.version != STORAGE_VERSION {
            return Err(AvatarError::Storage(
                self.label.clone(),
                format!(
                    "Storage version mismatch: expected {}, got {}",
                    STORAGE_VERSION, data.version
                ),
            ));
        }

        log::info!(
            "{} {} entries have been read",
            self.label,
            data.entries.len()
        );
        self.data = data;
        Ok(())
    }

    /// Writes `data` next to the target and renames over it, so readers
    /// never see a half-written document.
    fn write_fs(&self, data: &FileStorageData) -> Result<()> {
        let parent_dir = self.path.parent().ok_or_else(|| {
            AvatarError::Storage(
                self.label.clone(),
                "Failed to get parent directory".to_owned(),
            )
        })?;
        fs::create_dir_all(parent_dir)?;

        let mut temp_path = self.path.clone().into_os_string();
        temp_path.push(".tmp");
        fs::write(&temp_path, serde_json::to_vec_pretty(data)?)?;
        fs::rename(&temp_path, &self.path)?;

        log::info!(
            "{} {} entries have been written",
            self.label,
            data.entries.len()
        );
        Ok(())
    }

    /// Applies `change` to a copy of the records and keeps the copy
    /// only once it is on disk.
    fn commit<F>(&mut self, change: F) -> Result<()>
    where
        F: FnOnce(&mut FileStorageData) -> Result<()>,
    {
        let mut data = self.data.clone();
        change(&mut data)?;
        self.write_fs(&data)?;
        self.data = data;
        Ok(())
    }

    fn check_user_id(&self, user_id: &str) -> Result<()> {
        if user_id.trim().is_empty() {
            return Err(AvatarError::Storage(
                self.label.clone(),
                "User id is empty".to_owned(),
            ));
        }
        Ok(())
    }
}

impl AvatarStore for FileAvatarStore {
    fn save(&mut self, user_id: &str, record: &AvatarRecord) -> Result<()> {
        self.check_user_id(user_id)?;
        self.commit(|data| {
            data.entries.insert(user_id.to_owned(), record.clone());
            Ok(())
        })
    }

    fn load(&self, user_id: &str) -> Result<Option<AvatarRecord>> {
        self.check_user_id(user_id)?;
        Ok(self.data.entries.get(user_id).cloned())
    }

    fn remove(&mut self, user_id: &str) -> Result<()> {
        let label = self.label.clone();
        self.commit(|data| {
            data.entries
                .remove(user_id)
                .map(|_| ())
                .ok_or_else(|| AvatarError::Storage(label, "Key not found".to_owned()))
        })
    }
}
