use std::path::PathBuf;

use data_avatar::{AvatarDescriptor, AvatarService};
use fs_storage::{AvatarRecord, AvatarStore};

use crate::{
    error::AppError,
    util::{open_profiles, parse_params, provide_root},
};

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "save", about = "Save the avatar of a user")]
pub struct Save {
    #[clap(help = "User id")]
    user_id: String,
    #[clap(long, help = "Data folder, defaults to ~/.avatar")]
    root: Option<PathBuf>,
    #[clap(long, short, help = "Profile accent color, random when omitted")]
    color: Option<String>,
    #[clap(subcommand)]
    avatar: AvatarArgs,
}

#[derive(Clone, Debug, clap::Subcommand)]
pub enum AvatarArgs {
    #[command(about = "Initials on a colored tile")]
    Initial {
        #[clap(help = "Display name")]
        name: String,
        #[clap(long, help = "Tile color as hex, random when omitted")]
        tile: Option<String>,
    },
    #[command(about = "Generated avatar")]
    Dicebear {
        #[clap(help = "Seed selecting the variant")]
        seed: String,
        #[clap(long, short, help = "Style id, defaults to the configured style")]
        style: Option<String>,
        #[clap(long = "param", short, help = "Parameter as name=value, repeatable")]
        params: Vec<String>,
        #[clap(long, short, action, help = "Pick random parameters instead")]
        random: bool,
    },
    #[command(about = "Linked Bitmoji image")]
    Bitmoji {
        #[clap(help = "Image URL")]
        url: String,
    },
    #[command(about = "Already uploaded image")]
    Image {
        #[clap(help = "Image URL")]
        url: String,
    },
}

impl AvatarArgs {
    pub fn descriptor(
        &self,
        service: &AvatarService,
    ) -> Result<AvatarDescriptor, AppError> {
        let avatar = match self {
            AvatarArgs::Initial { name, tile } => match tile {
                Some(tile) => AvatarDescriptor::initial(name, tile),
                None => AvatarDescriptor::initial_random(name),
            },
            AvatarArgs::Dicebear {
                seed,
                style,
                params,
                random,
            } => {
                let style = style
                    .as_deref()
                    .unwrap_or(service.config().default_style.as_str());
                if *random {
                    service.random_dicebear(seed, style)
                } else {
                    let params = parse_params(service.catalog(), style, params)?;
                    service.dicebear(seed, style, params)
                }
            }
            AvatarArgs::Bitmoji { url } => AvatarDescriptor::bitmoji(url)?,
            AvatarArgs::Image { url } => AvatarDescriptor::image(url)?,
        };
        Ok(avatar)
    }
}

impl Save {
    pub fn run(&self, service: &AvatarService) -> Result<(), AppError> {
        let root = provide_root(&self.root)?;
        let avatar = self.avatar.descriptor(service)?;
        let color = self
            .color
            .clone()
            .unwrap_or_else(|| service.random_color().to_owned());

        let kind = avatar.kind();

        let mut profiles = open_profiles(&root)?;
        profiles.save(&self.user_id, &AvatarRecord::new(avatar, &color))?;
        log::info!("Saved avatar of {} to {}", self.user_id, profiles.path().display());
        println!("Saved {} avatar for {}", kind, self.user_id);
        Ok(())
    }
}
