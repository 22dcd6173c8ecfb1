// src/domain/folder.rs
use crate::domain::repositories::query::locale_cmp;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata of a non-root folder, keyed by its full path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderMeta {
    pub name: String,
    pub path: String,
    pub level: usize,
    /// Bookmarks sitting directly in this folder
    pub count: usize,
}

impl FolderMeta {
    pub fn new<S: Into<String>>(name: S, path: S, level: usize) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            level,
            count: 0,
        }
    }
}

/// Folder path -> metadata
pub type FolderMap = HashMap<String, FolderMeta>;

/// Folders ordered for navigation: shallow first, then by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FolderList {
    pub entries: Vec<FolderMeta>,
}

impl FolderList {
    pub fn from_map(folders: &FolderMap) -> Self {
        let entries = folders
            .values()
            .sorted_by(|a, b| {
                a.level
                    .cmp(&b.level)
                    .then_with(|| locale_cmp(&a.name, &b.name))
                    .then_with(|| a.path.cmp(&b.path))
            })
            .cloned()
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_folders_when_list_then_sorted_by_level_then_name() {
        let mut folders = FolderMap::new();
        for meta in [
            FolderMeta::new("zeta", "zeta", 0),
            FolderMeta::new("Rust", "Work > Rust", 1),
            FolderMeta::new("Alpha", "Alpha", 0),
            FolderMeta::new("Async", "Work > Async", 1),
            FolderMeta::new("Work", "Work", 0),
        ] {
            folders.insert(meta.path.clone(), meta);
        }

        let paths: Vec<_> = FolderList::from_map(&folders)
            .entries
            .into_iter()
            .map(|f| f.path)
            .collect();

        assert_eq!(
            paths,
            vec!["Alpha", "Work", "zeta", "Work > Async", "Work > Rust"]
        );
    }

    #[test]
    fn given_same_name_at_same_level_when_list_then_ordered_by_path() {
        let mut folders = FolderMap::new();
        for meta in [
            FolderMeta::new("Docs", "Work > Docs", 1),
            FolderMeta::new("Docs", "Home > Docs", 1),
        ] {
            folders.insert(meta.path.clone(), meta);
        }

        let list = FolderList::from_map(&folders);
        assert_eq!(list.len(), 2);
        assert_eq!(list.entries[0].path, "Home > Docs");
    }
}
