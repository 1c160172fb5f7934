//! Local stand-ins for the remote collaborators of the profile screen:
//! a document store for avatar records and an object store for
//! uploaded images.

use data_avatar::AvatarDescriptor;
use serde::{Deserialize, Serialize};

pub mod base_storage;
pub mod file_storage;
pub mod folder_storage;

pub use base_storage::{AvatarStore, ImageStore};
pub use file_storage::FileAvatarStore;
pub use folder_storage::FolderImageStore;

pub const AVATAR_FOLDER: &str = ".avatar";
pub const PROFILES_FILE: &str = "profiles.json";
pub const UPLOADS_FOLDER: &str = "uploads";
/// Extension of uploads whose own extension is missing or unusable.
pub const DEFAULT_EXTENSION: &str = "bin";

/// What gets persisted when a profile edit is saved: the chosen
/// avatar plus the profile accent color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarRecord {
    pub avatar: AvatarDescriptor,
    pub color: String,
}

impl AvatarRecord {
    pub fn new(avatar: AvatarDescriptor, color: &str) -> Self {
        Self {
            avatar,
            color: color.to_owned(),
        }
    }
}
