// src/domain/flatten.rs
use crate::domain::bookmark::FlatBookmark;
use crate::domain::folder::{FolderMap, FolderMeta};
use crate::domain::tree::TreeNode;
use tracing::{instrument, trace};

/// Titles of the browser's default top-level containers
pub const DEFAULT_ROOT_FOLDERS: [&str; 2] = ["Bookmarks Bar", "Other Bookmarks"];

/// Separator between folder titles in a folder path
pub const DEFAULT_PATH_SEPARATOR: &str = " > ";

/// Result of one flatten pass: bookmarks in traversal order and the folders they live in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flattened {
    pub bookmarks: Vec<FlatBookmark>,
    pub folders: FolderMap,
}

/// Walks a bookmark forest into a flat list.
///
/// Root folders (and the untitled synthetic top node) are transparent: they add neither a
/// path segment nor a level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeFlattener {
    root_folders: Vec<String>,
    separator: String,
}

impl Default for TreeFlattener {
    fn default() -> Self {
        Self {
            root_folders: DEFAULT_ROOT_FOLDERS.iter().map(ToString::to_string).collect(),
            separator: DEFAULT_PATH_SEPARATOR.to_string(),
        }
    }
}

impl TreeFlattener {
    pub fn new<S: Into<String>>(root_folders: Vec<String>, separator: S) -> Self {
        Self {
            root_folders,
            separator: separator.into(),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    fn is_transparent(&self, title: &str) -> bool {
        title.is_empty() || self.root_folders.iter().any(|root| root == title)
    }

    #[instrument(skip_all, level = "debug", fields(roots = roots.len()))]
    pub fn flatten(&self, roots: &[TreeNode]) -> Flattened {
        let mut out = Flattened::default();
        for node in roots {
            self.visit(node, "", 0, &mut out);
        }

        for bookmark in &out.bookmarks {
            if bookmark.folder_path.is_empty() {
                continue;
            }
            if let Some(folder) = out.folders.get_mut(&bookmark.folder_path) {
                folder.count += 1;
            }
        }

        trace!(
            "Flattened {} bookmarks in {} folders",
            out.bookmarks.len(),
            out.folders.len()
        );
        out
    }

    fn visit(&self, node: &TreeNode, folder_path: &str, level: usize, out: &mut Flattened) {
        match node {
            TreeNode::Leaf(leaf) => out
                .bookmarks
                .push(FlatBookmark::from_leaf(leaf, folder_path, level)),
            TreeNode::Folder(folder) if self.is_transparent(&folder.title) => {
                for child in &folder.children {
                    self.visit(child, folder_path, level, out);
                }
            }
            TreeNode::Folder(folder) => {
                let child_path = if folder_path.is_empty() {
                    folder.title.clone()
                } else {
                    format!("{}{}{}", folder_path, self.separator, folder.title)
                };
                out.folders.insert(
                    child_path.clone(),
                    FolderMeta::new(folder.title.clone(), child_path.clone(), level),
                );
                for child in &folder.children {
                    self.visit(child, &child_path, level + 1, out);
                }
            }
        }
    }
}

/// Flatten with the default root folders and separator
pub fn flatten(roots: &[TreeNode]) -> Flattened {
    TreeFlattener::default().flatten(roots)
}
