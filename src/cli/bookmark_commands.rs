// src/cli/bookmark_commands.rs
use crate::application::BookmarkManager;
use crate::cli::display::{show_bookmarks, show_folders, show_stats};
use crate::cli::error::{CliError, CliResult};
use crate::domain::view_state::{DateFilter, SortKey, ViewStatePatch};
use crate::infrastructure::repositories::snapshot_store::SnapshotStore;
use crate::util::validation::suggest_title;
use crossterm::style::Stylize;
use serde::Serialize;
use std::path::Path;
use termcolor::WriteColor;
use tracing::instrument;

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::CommandFailed(format!("Cannot render JSON: {}", e)))?;
    println!("{}", json);
    Ok(())
}

/// Build a filter patch from command line values; unknown sort or date values are rejected
pub fn build_patch(
    search: Option<String>,
    sort: Option<String>,
    folder: Option<String>,
    date: Option<String>,
) -> CliResult<ViewStatePatch> {
    let mut patch = ViewStatePatch::new();
    if let Some(term) = search {
        patch = patch.search(term);
    }
    if let Some(sort) = sort {
        let key: SortKey = sort
            .parse()
            .map_err(|_| CliError::InvalidInput(format!("Unknown sort order '{}'", sort)))?;
        patch = patch.sort(key);
    }
    if let Some(path) = folder {
        patch = patch.folder(path);
    }
    if let Some(date) = date {
        let filter: DateFilter = date
            .parse()
            .map_err(|_| CliError::InvalidInput(format!("Unknown date range '{}'", date)))?;
        patch = patch.date(filter);
    }
    Ok(patch)
}

#[instrument(skip(out, manager, patch), level = "debug")]
pub async fn list<W: WriteColor>(
    out: &mut W,
    manager: &mut BookmarkManager,
    patch: ViewStatePatch,
    is_json: bool,
) -> CliResult<()> {
    manager.refresh().await?;
    let visible = manager.set_filter(patch);

    if is_json {
        return print_json(visible);
    }

    show_bookmarks(out, &visible.items)?;
    if visible.is_filtered {
        writeln!(
            out,
            "Showing {} of {} bookmarks",
            visible.filtered_count, visible.total_count
        )?;
    }
    Ok(())
}

pub async fn recent<W: WriteColor>(
    out: &mut W,
    manager: &mut BookmarkManager,
    is_json: bool,
) -> CliResult<()> {
    manager.refresh().await?;
    let recent = manager.engine().recent();

    if is_json {
        return print_json(&recent);
    }
    show_bookmarks(out, &recent)?;
    Ok(())
}

pub async fn folders<W: WriteColor>(out: &mut W, manager: &mut BookmarkManager) -> CliResult<()> {
    manager.refresh().await?;
    show_folders(out, &manager.engine().folders())?;
    Ok(())
}

pub async fn stats(manager: &mut BookmarkManager, is_json: bool) -> CliResult<()> {
    manager.refresh().await?;
    let stats = manager.engine().stats();

    if is_json {
        return print_json(&stats);
    }
    show_stats(&mut std::io::stdout(), &stats)?;
    Ok(())
}

#[instrument(skip(manager), level = "debug")]
pub async fn add(
    manager: &mut BookmarkManager,
    url: &str,
    title: Option<&str>,
    parent: Option<&str>,
) -> CliResult<()> {
    let title = match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => title.to_string(),
        None => suggest_title(url).unwrap_or_default(),
    };

    let record = manager.create_bookmark(&title, url, parent).await?;
    println!("Added bookmark {}: {} ({})", record.id, record.title, record.url);
    Ok(())
}

#[instrument(skip(manager), level = "debug")]
pub async fn edit(manager: &mut BookmarkManager, id: &str, title: &str) -> CliResult<()> {
    manager.refresh().await?;
    if manager.update_bookmark_title(id, title).await? {
        println!("Updated bookmark {}", id);
    } else {
        println!("Title of bookmark {} unchanged", id);
    }
    Ok(())
}

#[instrument(skip(manager), level = "debug")]
pub async fn delete(manager: &mut BookmarkManager, id: &str) -> CliResult<()> {
    manager.delete_bookmark(id).await?;
    println!("Deleted bookmark {}", id);
    Ok(())
}

pub fn create_store(path: &str) -> CliResult<()> {
    let expanded = shellexpand::tilde(path).to_string();
    let path = Path::new(&expanded);
    if path.exists() {
        return Err(CliError::InvalidInput(format!(
            "Store already exists at: {}. Please choose a different path or delete the existing file.",
            path.display()
        )));
    }

    SnapshotStore::create(path)?;
    println!("Created bookmark store at: {}", path.display());
    eprintln!(
        "{}",
        format!("Set BOOKMARKX_STORE_PATH={} to use it by default", path.display()).green()
    );
    Ok(())
}
