use clap::Parser;
use pointsmith::cli::commands::{entity::EntityCommand, init::InitCommand, CommandHandler};
use pointsmith::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.to_filter_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Init { project_dir, yes } => InitCommand::new(project_dir, yes).execute(),
        Commands::Entity {
            project_dir,
            name,
            regenerate,
        } => EntityCommand::new(project_dir, name, regenerate).execute(),
    };

    if let Err(e) = result {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}
