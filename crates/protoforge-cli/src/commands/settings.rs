use std::path::PathBuf;

use anyhow::Context;
use clap::Subcommand;
use protoforge_env::SettingsStore;
use protoforge_schema::is_game_repository;
use tracing::warn;

#[derive(clap::Args)]
pub struct Args {
    #[command(subcommand)]
    command: SettingsCommand,
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Print the settings file path and contents
    Show,
    /// Store the game repository root
    SetRoot {
        /// Path to the repository checkout
        path: PathBuf,
    },
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let store = SettingsStore::open_default()?;
    match args.command {
        SettingsCommand::Show => {
            let settings = store
                .load()
                .with_context(|| format!("Failed to load {}", store.path().display()))?;
            println!("# {}", store.path().display());
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        SettingsCommand::SetRoot { path } => {
            let path = std::path::absolute(&path)
                .with_context(|| format!("Invalid path {}", path.display()))?;
            if !is_game_repository(&path) {
                warn!(root = %path.display(), "does not look like a game repository");
            }
            let mut settings = store
                .load()
                .with_context(|| format!("Failed to load {}", store.path().display()))?;
            settings.repo_root = Some(path);
            store
                .save(&settings)
                .with_context(|| format!("Failed to write {}", store.path().display()))?;
            println!("Saved {}", store.path().display());
        }
    }
    Ok(())
}
