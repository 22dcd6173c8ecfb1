// src/domain/repositories/store.rs
use crate::domain::bookmark::BookmarkRecord;
use crate::domain::error::DomainResult;
use crate::domain::tree::TreeNode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc::UnboundedReceiver;

/// Folder id of the Bookmarks Bar, where new bookmarks go without an explicit parent
pub const DEFAULT_PARENT_ID: &str = "1";

/// What happened to a node in the external store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Removed,
    Changed,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeKind::Created => "created",
            ChangeKind::Removed => "removed",
            ChangeKind::Changed => "changed",
        };
        f.write_str(s)
    }
}

/// Mutation notification. The payload is the store's delta and is not interpreted by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkChange {
    pub kind: ChangeKind,
    pub id: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl BookmarkChange {
    pub fn new<S: Into<String>>(kind: ChangeKind, id: S, payload: serde_json::Value) -> Self {
        Self {
            kind,
            id: id.into(),
            payload,
        }
    }
}

/*
   The bookmark store is owned by someone else (the browser, a sync service, a file).
   The core only ever asks for a full snapshot and forwards single mutations; it never
   patches its own copy from a notification.
*/
/// Port to the external bookmark store
#[async_trait]
pub trait BookmarkStore: Send + Sync + fmt::Debug {
    /// Full forest as of now
    async fn fetch_tree(&self) -> DomainResult<Vec<TreeNode>>;

    /// Create a bookmark below `parent_id`, or below the store's default folder
    async fn create_bookmark(
        &self,
        title: &str,
        url: &str,
        parent_id: Option<&str>,
    ) -> DomainResult<BookmarkRecord>;

    async fn update_bookmark_title(&self, id: &str, title: &str) -> DomainResult<()>;

    async fn delete_bookmark(&self, id: &str) -> DomainResult<()>;

    /// Receive every change made to the store from now on, in whatever order the store emits them
    fn subscribe(&self) -> UnboundedReceiver<BookmarkChange>;
}
