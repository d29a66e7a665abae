use clap::Parser;
use color_eyre::Result;
use std::path::Path;
use todo_tree::{Config, Profile, TaskStore, cli::{self, Cli, Commands}};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    let cli = Cli::parse();

    // --dev switches to the separate dev config and data file
    let profile = if cli.dev {
        Profile::Dev
    } else {
        Profile::Prod
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(Path::new(path))?,
        None => Config::load_with_profile(profile)?,
    };

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let store = TaskStore::new(config.get_data_file());
    tracing::debug!(path = %store.path().display(), "Using task file");

    match cli.command {
        Commands::Add {
            description,
            due,
            tags,
            important,
            urgent,
            estimate,
        } => {
            cli::handle_add(description, due, tags, important, urgent, estimate, &store)?;
        }
        Commands::List => {
            cli::handle_list(&store)?;
        }
        Commands::Done { description } => {
            cli::handle_done(description, &store)?;
        }
        Commands::Progress {
            description,
            percent,
        } => {
            cli::handle_progress(description, percent, &store)?;
        }
        Commands::Remove { description } => {
            cli::handle_remove(description, &store)?;
        }
    }

    Ok(())
}
