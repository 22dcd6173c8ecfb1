// src/cli/mod.rs
use crate::application::BookmarkManager;
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;
use termcolor::StandardStream;
use tokio::runtime::Runtime;
use tracing::debug;

pub mod args;
pub mod bookmark_commands;
pub mod display;
pub mod error;

/// Run the parsed command line against `settings`.
///
/// Human readable listings go to `stderr`; JSON and confirmations go to stdout.
pub fn execute_command(mut stderr: StandardStream, cli: Cli, mut settings: Settings) -> CliResult<()> {
    if cli.generate_config {
        println!("{}", crate::config::generate_default_config());
        return Ok(());
    }

    let command = match cli.command {
        Some(command) => command,
        None => return Ok(()),
    };

    if let Commands::CreateStore { path } = &command {
        return bookmark_commands::create_store(path);
    }

    if let Some(store) = cli.store {
        debug!("Using store from command line: {}", store);
        settings.store_path = shellexpand::tilde(&store).to_string();
    }

    let services = ServiceContainer::new(&settings)?;
    let mut manager = services.manager;

    let rt = Runtime::new()
        .map_err(|e| CliError::CommandFailed(format!("Failed to create async runtime: {}", e)))?;

    rt.block_on(run(&mut stderr, &mut manager, command))
}

async fn run(
    stderr: &mut StandardStream,
    manager: &mut BookmarkManager,
    command: Commands,
) -> CliResult<()> {
    match command {
        Commands::List {
            search,
            sort,
            folder,
            date,
            is_json,
        } => {
            let patch = bookmark_commands::build_patch(search, sort, folder, date)?;
            bookmark_commands::list(stderr, manager, patch, is_json).await
        }
        Commands::Recent { is_json } => bookmark_commands::recent(stderr, manager, is_json).await,
        Commands::Folders => bookmark_commands::folders(stderr, manager).await,
        Commands::Stats { is_json } => bookmark_commands::stats(manager, is_json).await,
        Commands::Add { url, title, parent } => {
            bookmark_commands::add(manager, &url, title.as_deref(), parent.as_deref()).await
        }
        Commands::Edit { id, title } => bookmark_commands::edit(manager, &id, &title).await,
        Commands::Delete { id } => bookmark_commands::delete(manager, &id).await,
        Commands::CreateStore { path } => bookmark_commands::create_store(&path),
    }
}
