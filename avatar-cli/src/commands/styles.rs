use data_avatar::AvatarService;

use crate::{error::AppError, util::print_json};

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "styles", about = "List the available avatar styles")]
pub struct Styles {
    #[clap(long, action, help = "Print as JSON")]
    json: bool,
}

impl Styles {
    pub fn run(&self, service: &AvatarService) -> Result<(), AppError> {
        let styles = service.catalog().list_styles();
        if self.json {
            return print_json(&styles);
        }

        for style in styles {
            let count = service.catalog().parameters_for(&style.id).len();
            println!(
                "{:<12} {:<12} {} ({} parameters)",
                style.id, style.display_name, style.description, count
            );
        }
        Ok(())
    }
}
