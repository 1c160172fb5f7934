use std::path::PathBuf;

use data_avatar::AvatarService;
use fs_storage::{AvatarRecord, AvatarStore};

use crate::{
    error::AppError,
    util::{open_profiles, print_json, provide_root},
};

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "show", about = "Show the saved avatar of a user")]
pub struct Show {
    #[clap(help = "User id")]
    user_id: String,
    #[clap(long, help = "Data folder, defaults to ~/.avatar")]
    root: Option<PathBuf>,
    #[clap(long, action, help = "Print as JSON")]
    json: bool,
}

impl Show {
    pub fn run(&self, service: &AvatarService) -> Result<(), AppError> {
        let root = provide_root(&self.root)?;
        let profiles = open_profiles(&root)?;
        let record = profiles
            .load(&self.user_id)?
            .ok_or_else(|| AppError::AvatarNotFound(self.user_id.clone()))?;

        // Stored generated URLs may predate the current endpoint.
        let record = AvatarRecord::new(service.refresh(record.avatar), &record.color);
        if self.json {
            return print_json(&record);
        }

        println!("user:   {}", self.user_id);
        println!("kind:   {}", record.avatar.kind());
        println!("color:  #{}", record.color.trim_start_matches('#'));
        match record.avatar.display_url() {
            Some(url) => println!("image:  {}", url),
            None => println!("text:   {}", record.avatar.value()),
        }
        Ok(())
    }
}
