use clap::Parser;

mod commands;
mod error;
mod util;

use commands::Commands;
use error::AppError;
use util::provide_service;

#[derive(Parser, Debug)]
#[clap(name = "avatar-cli")]
#[clap(about = "Pick, preview and store profile avatars", long_about = None)]
struct Cli {
    #[clap(long, global = true, help = "Path to config.toml")]
    config: Option<std::path::PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

fn run(cli: Cli) -> Result<(), AppError> {
    // Only commands that build URLs need a valid config.
    let service = || provide_service(&cli.config);

    match &cli.command {
        Commands::Styles(styles) => styles.run(&service()?),
        Commands::Params(params) => params.run(&service()?),
        Commands::Url(url) => url.run(&service()?),
        Commands::Random(random) => random.run(&service()?),
        Commands::Initials(initials) => initials.run(),
        Commands::Save(save) => save.run(&service()?),
        Commands::Show(show) => show.run(&service()?),
        Commands::Upload(upload) => upload.run(),
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempdir::TempDir;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn nested_save_arguments_parse() {
        let cli = Cli::try_parse_from([
            "avatar-cli",
            "save",
            "jane",
            "--color",
            "663399",
            "dicebear",
            "vibes-42",
            "--style",
            "bottts",
            "-p",
            "primaryColor=663399",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Save(_)));
    }

    #[test]
    fn broken_config_does_not_block_initials() {
        let temp_dir = TempDir::new("tmp").expect("Failed to create temporary directory");
        let config = temp_dir.path().join("config.toml");
        std::fs::write(&config, "default_style = \"missing\"").unwrap();
        let config = config.to_str().unwrap();

        let initials =
            Cli::try_parse_from(["avatar-cli", "--config", config, "initials", "Jane Doe"])
                .unwrap();
        assert!(run(initials).is_ok());

        let styles = Cli::try_parse_from(["avatar-cli", "--config", config, "styles"]).unwrap();
        assert!(matches!(run(styles), Err(AppError::ConfigLoadError(_))));
    }
}
