use clap::Subcommand;

mod initials;
mod params;
mod random;
mod save;
mod show;
mod styles;
mod upload;
mod url;

#[derive(Debug, Subcommand)]
pub enum Commands {
    Styles(styles::Styles),
    Params(params::Params),
    Url(url::BuildUrl),
    Random(random::Random),
    Initials(initials::Initials),
    #[command(about = "Save a user's avatar")]
    Save(save::Save),
    Show(show::Show),
    Upload(upload::Upload),
}
