// src/infrastructure/repositories/snapshot_store.rs
use crate::domain::bookmark::BookmarkRecord;
use crate::domain::clock::Clock;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::repositories::store::{
    BookmarkChange, BookmarkStore, ChangeKind, DEFAULT_PARENT_ID,
};
use crate::domain::tree::{parse_snapshot, render_snapshot, BookmarkFolder, TreeNode};
use crate::infrastructure::error::InfrastructureError;
use async_trait::async_trait;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, instrument, trace};

#[derive(Debug)]
struct StoreInner {
    roots: Vec<TreeNode>,
    next_id: u64,
}

/// A bookmark store holding the forest in memory, optionally mirrored to a JSON snapshot file.
///
/// Ids are numeric strings. Every accepted mutation is written back (if file backed) and then
/// announced to all subscribers.
#[derive(Debug)]
pub struct SnapshotStore {
    inner: Mutex<StoreInner>,
    path: Option<PathBuf>,
    clock: Arc<dyn Clock>,
    subscribers: Mutex<Vec<UnboundedSender<BookmarkChange>>>,
}

impl SnapshotStore {
    pub fn in_memory(roots: Vec<TreeNode>, clock: Arc<dyn Clock>) -> Self {
        Self::build(roots, None, clock)
    }

    /// Load the snapshot file at `path`
    #[instrument(skip(clock), level = "debug")]
    pub fn open(path: &Path, clock: Arc<dyn Clock>) -> DomainResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            InfrastructureError::FileSystem(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let roots = parse_snapshot(&content)
            .map_err(|e| e.context(format!("parsing {}", path.display())))?;
        debug!("Loaded bookmark snapshot from {}", path.display());
        Ok(Self::build(roots, Some(path.to_path_buf()), clock))
    }

    /// Write a fresh snapshot with only the default root folders to `path`
    pub fn create(path: &Path) -> DomainResult<()> {
        if path.exists() {
            return Err(DomainError::StoreError(format!(
                "Store already exists: {}",
                path.display()
            )));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(InfrastructureError::from)?;
        }
        write_snapshot(path, &default_tree())
    }

    fn build(roots: Vec<TreeNode>, path: Option<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        let next_id = max_id(&roots) + 1;
        Self {
            inner: Mutex::new(StoreInner { roots, next_id }),
            path,
            clock,
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock(&self) -> DomainResult<MutexGuard<'_, StoreInner>> {
        self.inner
            .lock()
            .map_err(|e| InfrastructureError::Store(format!("Store lock poisoned: {}", e)).into())
    }

    /// Write `roots` (if file backed) and only then make them the current forest
    fn commit(&self, inner: &mut StoreInner, roots: Vec<TreeNode>) -> DomainResult<()> {
        if let Some(path) = &self.path {
            write_snapshot(path, &roots)?;
        }
        inner.roots = roots;
        Ok(())
    }

    fn notify(&self, change: BookmarkChange) {
        trace!("Notifying subscribers: {:?}", change);
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.retain(|tx| tx.send(change.clone()).is_ok());
        }
    }
}

#[async_trait]
impl BookmarkStore for SnapshotStore {
    async fn fetch_tree(&self) -> DomainResult<Vec<TreeNode>> {
        Ok(self.lock()?.roots.clone())
    }

    #[instrument(skip(self), level = "debug")]
    async fn create_bookmark(
        &self,
        title: &str,
        url: &str,
        parent_id: Option<&str>,
    ) -> DomainResult<BookmarkRecord> {
        let record = {
            let mut inner = self.lock()?;
            let parent_id = parent_id.unwrap_or(DEFAULT_PARENT_ID).to_string();
            let id = inner.next_id.to_string();
            let date_added = self.clock.now_millis();

            let mut roots = inner.roots.clone();
            let parent = find_folder_mut(&mut roots, &parent_id)
                .ok_or_else(|| DomainError::FolderNotFound(parent_id.clone()))?;
            parent
                .children
                .push(TreeNode::leaf(id.as_str(), title, url, date_added));

            self.commit(&mut inner, roots)?;
            inner.next_id += 1;

            BookmarkRecord {
                id,
                parent_id,
                title: title.to_string(),
                url: url.to_string(),
                date_added,
            }
        };

        self.notify(BookmarkChange::new(
            ChangeKind::Created,
            record.id.clone(),
            json!(record),
        ));
        Ok(record)
    }

    #[instrument(skip(self), level = "debug")]
    async fn update_bookmark_title(&self, id: &str, title: &str) -> DomainResult<()> {
        {
            let mut inner = self.lock()?;
            let mut roots = inner.roots.clone();
            if !rename_leaf(&mut roots, id, title) {
                return Err(DomainError::BookmarkNotFound(id.to_string()));
            }
            self.commit(&mut inner, roots)?;
        }

        self.notify(BookmarkChange::new(
            ChangeKind::Changed,
            id,
            json!({ "title": title }),
        ));
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete_bookmark(&self, id: &str) -> DomainResult<()> {
        let parent_id = {
            let mut inner = self.lock()?;
            let mut roots = inner.roots.clone();
            let parent_id = roots
                .iter_mut()
                .find_map(|node| match node {
                    TreeNode::Folder(folder) => {
                        remove_leaf(&mut folder.children, &folder.id, id)
                    }
                    TreeNode::Leaf(_) => None,
                })
                .ok_or_else(|| DomainError::BookmarkNotFound(id.to_string()))?;
            self.commit(&mut inner, roots)?;
            parent_id
        };

        self.notify(BookmarkChange::new(
            ChangeKind::Removed,
            id,
            json!({ "parentId": parent_id }),
        ));
        Ok(())
    }

    fn subscribe(&self) -> UnboundedReceiver<BookmarkChange> {
        let (tx, rx) = mpsc::unbounded_channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(tx);
        }
        rx
    }
}

/// Forest of a fresh browser profile: an untitled top node holding the two root folders
pub fn default_tree() -> Vec<TreeNode> {
    vec![TreeNode::folder(
        "0",
        "",
        vec![
            TreeNode::folder("1", "Bookmarks Bar", vec![]),
            TreeNode::folder("2", "Other Bookmarks", vec![]),
        ],
    )]
}

fn write_snapshot(path: &Path, roots: &[TreeNode]) -> DomainResult<()> {
    let json = render_snapshot(roots)?;
    fs::write(path, json).map_err(|e| {
        InfrastructureError::FileSystem(format!("Cannot write {}: {}", path.display(), e))
    })?;
    trace!("Wrote bookmark snapshot to {}", path.display());
    Ok(())
}

fn max_id(nodes: &[TreeNode]) -> u64 {
    nodes
        .iter()
        .map(|node| {
            let own = node.id().parse::<u64>().unwrap_or(0);
            match node {
                TreeNode::Folder(folder) => own.max(max_id(&folder.children)),
                TreeNode::Leaf(_) => own,
            }
        })
        .max()
        .unwrap_or(0)
}

fn find_folder_mut<'a>(nodes: &'a mut [TreeNode], id: &str) -> Option<&'a mut BookmarkFolder> {
    for node in nodes.iter_mut() {
        if let TreeNode::Folder(folder) = node {
            if folder.id == id {
                return Some(folder);
            }
            if let Some(found) = find_folder_mut(&mut folder.children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn rename_leaf(nodes: &mut [TreeNode], id: &str, title: &str) -> bool {
    for node in nodes.iter_mut() {
        match node {
            TreeNode::Leaf(leaf) if leaf.id == id => {
                leaf.title = title.to_string();
                return true;
            }
            TreeNode::Folder(folder) => {
                if rename_leaf(&mut folder.children, id, title) {
                    return true;
                }
            }
            TreeNode::Leaf(_) => {}
        }
    }
    false
}

/// Remove the bookmark `id` below `children`; returns the id of the folder it was removed from.
/// Folders are never removed.
fn remove_leaf(children: &mut Vec<TreeNode>, parent_id: &str, id: &str) -> Option<String> {
    let pos = children
        .iter()
        .position(|node| matches!(node, TreeNode::Leaf(leaf) if leaf.id == id));
    if let Some(pos) = pos {
        children.remove(pos);
        return Some(parent_id.to_string());
    }
    children.iter_mut().find_map(|node| match node {
        TreeNode::Folder(folder) => remove_leaf(&mut folder.children, &folder.id, id),
        TreeNode::Leaf(_) => None,
    })
}
