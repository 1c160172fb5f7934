use data_avatar::AvatarService;

use crate::{error::AppError, util::print_json};

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "random", about = "Generate an avatar with random parameters")]
pub struct Random {
    #[clap(help = "Style id, see `styles`")]
    style: String,
    #[clap(help = "Seed selecting the variant")]
    seed: String,
}

impl Random {
    pub fn run(&self, service: &AvatarService) -> Result<(), AppError> {
        let avatar = service.random_dicebear(&self.seed, &self.style);
        print_json(&avatar)
    }
}
