use data_avatar::{AvatarService, ParamKind};

use crate::{error::AppError, util::print_json};

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "params", about = "List the customizable parameters of a style")]
pub struct Params {
    #[clap(help = "Style id, see `styles`")]
    style: String,
    #[clap(long, action, help = "Print as JSON")]
    json: bool,
}

impl Params {
    pub fn run(&self, service: &AvatarService) -> Result<(), AppError> {
        let domains = service.catalog().parameters_for(&self.style);
        if self.json {
            return print_json(&domains);
        }

        if domains.is_empty() {
            println!("Style {} has no customizable parameters", self.style);
            return Ok(());
        }

        for domain in domains {
            let control = match domain.kind {
                ParamKind::Color => "swatch",
                ParamKind::Enum => "chip",
                ParamKind::Numeric => "number",
            };
            let values: Vec<String> =
                domain.values.iter().map(|v| v.to_string()).collect();
            println!("{} [{}]: {}", domain.name, control, values.join(", "));
        }
        Ok(())
    }
}
