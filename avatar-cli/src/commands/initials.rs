use data_avatar::AvatarDescriptor;

use crate::{error::AppError, util::print_json};

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "initials", about = "Make an initials avatar from a display name")]
pub struct Initials {
    #[clap(help = "Display name")]
    name: String,
    #[clap(long, short, help = "Tile color as hex, random when omitted")]
    color: Option<String>,
}

impl Initials {
    pub fn run(&self) -> Result<(), AppError> {
        let avatar = match &self.color {
            Some(color) => AvatarDescriptor::initial(&self.name, color),
            None => AvatarDescriptor::initial_random(&self.name),
        };
        print_json(&avatar)
    }
}
