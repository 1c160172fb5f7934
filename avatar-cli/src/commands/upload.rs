use std::fs;
use std::path::PathBuf;

use data_avatar::{random_color, AvatarDescriptor};
use fs_storage::{AvatarRecord, AvatarStore, ImageStore, DEFAULT_EXTENSION};

use crate::{
    error::AppError,
    util::{open_profiles, open_uploads, provide_root},
};

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "upload", about = "Upload an image and use it as avatar")]
pub struct Upload {
    #[clap(help = "User id")]
    user_id: String,
    #[clap(help = "Image file")]
    file: PathBuf,
    #[clap(long, help = "Data folder, defaults to ~/.avatar")]
    root: Option<PathBuf>,
    #[clap(long, short, help = "Profile accent color, random when omitted")]
    color: Option<String>,
}

impl Upload {
    pub fn run(&self) -> Result<(), AppError> {
        let root = provide_root(&self.root)?;
        let bytes = fs::read(&self.file).map_err(|e| {
            AppError::ImageReadError(format!("{}: {}", self.file.display(), e))
        })?;
        let extension = self
            .file
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or(DEFAULT_EXTENSION);

        let url = open_uploads(&root)?.put(&self.user_id, &bytes, extension)?;
        let avatar = AvatarDescriptor::image(url.as_str())?;
        let color = self
            .color
            .clone()
            .unwrap_or_else(|| random_color().to_owned());

        let mut profiles = open_profiles(&root)?;
        profiles.save(&self.user_id, &AvatarRecord::new(avatar, &color))?;
        println!("{}", url);
        Ok(())
    }
}
