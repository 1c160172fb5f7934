use data_avatar::AvatarService;

use crate::{error::AppError, util::parse_params};

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "url", about = "Build the image URL of an avatar")]
pub struct BuildUrl {
    #[clap(help = "Seed selecting the variant")]
    seed: String,
    #[clap(long, short, help = "Style id, defaults to the configured style")]
    style: Option<String>,
    #[clap(long, help = "Size in pixels")]
    size: Option<u32>,
    #[clap(long = "param", short, help = "Parameter as name=value, repeatable")]
    params: Vec<String>,
    #[clap(long, short, action, help = "Pick random parameters instead")]
    random: bool,
}

impl BuildUrl {
    pub fn run(&self, service: &AvatarService) -> Result<(), AppError> {
        let config = service.config();
        let style = self
            .style
            .as_deref()
            .unwrap_or(config.default_style.as_str());
        let size = self.size.unwrap_or(config.default_size);

        let params = if self.random {
            service.random_params(style)
        } else {
            parse_params(service.catalog(), style, &self.params)?
        };

        let outcome = service.build_url(&self.seed, style, size, &params);
        if let Some(reason) = outcome.degradation() {
            eprintln!("warning: {}, built a substitute URL", reason);
        }
        println!("{}", outcome.url());
        Ok(())
    }
}
