use std::path::{Path, PathBuf};

use data_avatar::{Catalog, Params, ServiceConfig};
use data_avatar::AvatarService;
use fs_storage::{FileAvatarStore, FolderImageStore, AVATAR_FOLDER, PROFILES_FILE, UPLOADS_FOLDER};
use home::home_dir;
use serde::Serialize;

use crate::error::{AppError, InlineParamsParseError};

/// The data folder: the given path, or `~/.avatar`.
pub fn provide_root(root_dir: &Option<PathBuf>) -> Result<PathBuf, AppError> {
    if let Some(path) = root_dir {
        return Ok(path.clone());
    }
    home_dir()
        .map(|home| home.join(AVATAR_FOLDER))
        .ok_or(AppError::HomeDirNotFound)
}

pub fn provide_service(config: &Option<PathBuf>) -> Result<AvatarService, AppError> {
    let config = match config.clone().or_else(ServiceConfig::default_path) {
        Some(path) => ServiceConfig::load(&path)
            .map_err(|e| AppError::ConfigLoadError(e.to_string()))?,
        None => ServiceConfig::default(),
    };
    AvatarService::new(Catalog::builtin(), config)
        .map_err(|e| AppError::ConfigLoadError(e.to_string()))
}

pub fn open_profiles(root: &Path) -> Result<FileAvatarStore, AppError> {
    FileAvatarStore::open("profiles".to_owned(), &root.join(PROFILES_FILE))
        .map_err(|e| AppError::StorageOpenError(e.to_string()))
}

pub fn open_uploads(root: &Path) -> Result<FolderImageStore, AppError> {
    FolderImageStore::new("uploads".to_owned(), &root.join(UPLOADS_FOLDER))
        .map_err(|e| AppError::StorageOpenError(e.to_string()))
}

/// Parses `name=value` pairs, typing each value by the parameter's
/// declared kind. Parameters the style does not declare stay text.
pub fn parse_params(
    catalog: &Catalog,
    style: &str,
    raw: &[String],
) -> Result<Params, InlineParamsParseError> {
    let mut params = Params::new();
    for pair in raw {
        let (name, value) = pair
            .split_once('=')
            .map(|(n, v)| (n.trim(), v.trim()))
            .filter(|(n, _)| !n.is_empty())
            .ok_or_else(|| InlineParamsParseError::InvalidKeyValPair(pair.clone()))?;

        match catalog.parameter(style, name) {
            Some(domain) => params.insert(name, domain.parse_value(value)),
            None => {
                log::warn!("Parameter {} is not declared for style {}", name, style);
                params.insert(name, value);
            }
        }
    }
    Ok(params)
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
