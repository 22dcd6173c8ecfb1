// src/cli/display.rs

use crate::application::services::view_engine::TreeStats;
use crate::domain::bookmark::FlatBookmark;
use crate::domain::folder::FolderList;
use chrono::DateTime;
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// `YYYY-MM-DD` of a milliseconds timestamp, empty if out of range
pub fn format_date(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn set_fg<W: WriteColor>(out: &mut W, color: Color) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)))
}

/// Display bookmarks with color formatting
///
/// ```text
/// 1. Rust Book [20]
///    https://doc.rust-lang.org/book/
///    Work > Reviews  2024-01-02
/// ```
pub fn show_bookmarks<W: WriteColor>(out: &mut W, bookmarks: &[FlatBookmark]) -> io::Result<()> {
    if bookmarks.is_empty() {
        writeln!(out, "No bookmarks to display")?;
        return Ok(());
    }

    let first_col_width = bookmarks.len().to_string().len();

    for (i, bm) in bookmarks.iter().enumerate() {
        set_fg(out, Color::Green)?;
        write!(out, "{:first_col_width$}. {}", i + 1, bm.title)?;
        set_fg(out, Color::White)?;
        writeln!(out, " [{}]", bm.id)?;

        set_fg(out, Color::Yellow)?;
        writeln!(out, "{:first_col_width$}  {}", "", bm.url)?;

        set_fg(out, Color::Cyan)?;
        let folder = if bm.folder_path.is_empty() {
            "-"
        } else {
            bm.folder_path.as_str()
        };
        writeln!(
            out,
            "{:first_col_width$}  {}  {}",
            "",
            folder,
            format_date(bm.date_added)
        )?;
    }
    out.reset()?;
    Ok(())
}

/// Folders indented by level, each with its bookmark count
pub fn show_folders<W: WriteColor>(out: &mut W, folders: &FolderList) -> io::Result<()> {
    if folders.is_empty() {
        writeln!(out, "No folders")?;
        return Ok(());
    }

    for folder in &folders.entries {
        set_fg(out, Color::Blue)?;
        write!(out, "{:indent$}{}", "", folder.path, indent = folder.level * 2)?;
        out.reset()?;
        writeln!(out, " ({})", folder.count)?;
    }
    Ok(())
}

pub fn show_stats<W: Write>(out: &mut W, stats: &TreeStats) -> io::Result<()> {
    writeln!(out, "Bookmarks: {}", stats.bookmark_count)?;
    writeln!(out, "Folders:   {}", stats.folder_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bookmark::FlatBookmarkBuilder;
    use crate::domain::folder::{FolderMap, FolderMeta};
    use termcolor::{Buffer, NoColor};

    fn bookmark(id: &str, title: &str, folder_path: &str) -> FlatBookmark {
        FlatBookmarkBuilder::default()
            .id(id)
            .title(title)
            .url(format!("https://{}.example.com", id))
            .date_added(0)
            .folder_path(folder_path)
            .build()
            .unwrap()
    }

    #[test]
    fn given_bookmarks_when_show_then_writes_title_url_and_folder() {
        let mut out = NoColor::new(Vec::new());

        show_bookmarks(&mut out, &[bookmark("7", "Seven", "Work")]).unwrap();

        let text = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(
            text,
            "1. Seven [7]\n   https://7.example.com\n   Work  1970-01-01\n"
        );
    }

    #[test]
    fn given_no_bookmarks_when_show_then_writes_placeholder() {
        let mut out = Buffer::no_color();

        show_bookmarks(&mut out, &[]).unwrap();

        assert_eq!(String::from_utf8_lossy(out.as_slice()), "No bookmarks to display\n");
    }

    #[test]
    fn given_nested_folders_when_show_folders_then_indents_by_level() {
        let mut map = FolderMap::new();
        let mut work = FolderMeta::new("Work", "Work", 0);
        work.count = 2;
        map.insert("Work".to_string(), work);
        map.insert(
            "Work > Reviews".to_string(),
            FolderMeta::new("Reviews", "Work > Reviews", 1),
        );
        let mut out = NoColor::new(Vec::new());

        show_folders(&mut out, &FolderList::from_map(&map)).unwrap();

        let text = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(text, "Work (2)\n  Work > Reviews (0)\n");
    }

    #[test]
    fn given_millis_when_format_date_then_iso_day() {
        assert_eq!(format_date(86_400_000), "1970-01-02");
    }
}
