use std::fs;
use std::path::{Path, PathBuf};

use crc32fast::Hasher;
use url::Url;

use crate::base_storage::ImageStore;
use crate::DEFAULT_EXTENSION;
use data_avatar::sanitize_seed;
use data_error::{AvatarError, Result};

/// Uploaded images as plain files in one folder, addressed by
/// `file://` URLs.
pub struct FolderImageStore {
    label: String,
    root: PathBuf,
}

impl FolderImageStore {
    /// Create the store, creating `root` if needed.
    pub fn new(label: String, root: &Path) -> Result<Self> {
        fs::create_dir_all(root)?;
        if !root.is_dir() {
            return Err(AvatarError::Storage(
                label,
                "Path is not a directory".to_owned(),
            ));
        }

        let root = root.canonicalize()?;
        log::debug!("images/{}: storing under {}", label, root.display());
        Ok(Self { label, root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<user>-<crc32 of bytes>.<extension>`. Extensions that are
    /// empty or not ASCII alphanumeric become `bin`.
    fn file_name(user_id: &str, bytes: &[u8], extension: &str) -> String {
        let mut hasher = Hasher::new();
        hasher.update(bytes);
        let extension = extension.trim_start_matches('.').to_ascii_lowercase();
        let extension = if !extension.is_empty()
            && extension.chars().all(|c| c.is_ascii_alphanumeric())
        {
            extension
        } else {
            DEFAULT_EXTENSION.to_owned()
        };
        format!(
            "{}-{:08x}.{}",
            sanitize_seed(user_id),
            hasher.finalize(),
            extension
        )
    }
}

impl ImageStore for FolderImageStore {
    fn put(&self, user_id: &str, bytes: &[u8], extension: &str) -> Result<Url> {
        if bytes.is_empty() {
            return Err(AvatarError::Storage(
                self.label.clone(),
                "Empty image".to_owned(),
            ));
        }
        if user_id.trim().is_empty() {
            return Err(AvatarError::Storage(
                self.label.clone(),
                "User id is empty".to_owned(),
            ));
        }

        let file_name = Self::file_name(user_id, bytes, extension);
        temp_and_move(bytes, &self.root, &file_name)?;
        let path = self.root.join(&file_name);

        log::info!(
            "images/{}: stored {} bytes at {}",
            self.label,
            bytes.len(),
            path.display()
        );
        Url::from_file_path(&path).map_err(|_| {
            AvatarError::Storage(
                self.label.clone(),
                format!("Cannot express {} as a URL", path.display()),
            )
        })
    }
}

/// Write data to a temporary file next to the destination and move it
/// into place.
fn temp_and_move(data: &[u8], dest_dir: &Path, filename: &str) -> Result<()> {
    let temp = dest_dir.join(format!(".{}.tmp", filename));
    fs::write(&temp, data)?;
    fs::rename(&temp, dest_dir.join(filename))?;
    Ok(())
}
