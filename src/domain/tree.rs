// src/domain/tree.rs
use crate::domain::error::DomainResult;
use serde::{Deserialize, Serialize};

/// A node of a bookmark tree snapshot, owned by the external store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Leaf(BookmarkLeaf),
    Folder(BookmarkFolder),
}

/// A URL-bearing bookmark entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkLeaf {
    pub id: String,
    pub title: String,
    pub url: String,
    /// Creation timestamp in epoch milliseconds
    pub date_added: i64,
}

/// A container of further nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkFolder {
    pub id: String,
    pub title: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf<S: Into<String>>(id: S, title: S, url: S, date_added: i64) -> Self {
        TreeNode::Leaf(BookmarkLeaf {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            date_added,
        })
    }

    pub fn folder<S: Into<String>>(id: S, title: S, children: Vec<TreeNode>) -> Self {
        TreeNode::Folder(BookmarkFolder {
            id: id.into(),
            title: title.into(),
            children,
        })
    }

    pub fn id(&self) -> &str {
        match self {
            TreeNode::Leaf(leaf) => &leaf.id,
            TreeNode::Folder(folder) => &folder.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            TreeNode::Leaf(leaf) => &leaf.title,
            TreeNode::Folder(folder) => &folder.title,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf(_))
    }

    /// Number of leaves below (and including) this node
    pub fn leaf_count(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 1,
            TreeNode::Folder(folder) => folder.children.iter().map(TreeNode::leaf_count).sum(),
        }
    }
}

/// Number of leaves in a forest, at any depth
pub fn count_leaves(roots: &[TreeNode]) -> usize {
    roots.iter().map(TreeNode::leaf_count).sum()
}

/// Wire shape of a snapshot node: leaf and folder are told apart by the presence of `url`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTreeNode {
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RawTreeNode>>,
}

impl From<RawTreeNode> for TreeNode {
    fn from(raw: RawTreeNode) -> Self {
        match raw.url {
            Some(url) if !url.is_empty() => TreeNode::Leaf(BookmarkLeaf {
                id: raw.id,
                title: raw.title,
                url,
                date_added: raw.date_added.unwrap_or_default(),
            }),
            _ => TreeNode::Folder(BookmarkFolder {
                id: raw.id,
                title: raw.title,
                children: raw
                    .children
                    .unwrap_or_default()
                    .into_iter()
                    .map(TreeNode::from)
                    .collect(),
            }),
        }
    }
}

impl From<&TreeNode> for RawTreeNode {
    fn from(node: &TreeNode) -> Self {
        match node {
            TreeNode::Leaf(leaf) => RawTreeNode {
                id: leaf.id.clone(),
                title: leaf.title.clone(),
                url: Some(leaf.url.clone()),
                date_added: Some(leaf.date_added),
                children: None,
            },
            TreeNode::Folder(folder) => RawTreeNode {
                id: folder.id.clone(),
                title: folder.title.clone(),
                url: None,
                date_added: None,
                children: Some(folder.children.iter().map(RawTreeNode::from).collect()),
            },
        }
    }
}

/// Parse a JSON snapshot (an array of nodes) into a forest
pub fn parse_snapshot(json: &str) -> DomainResult<Vec<TreeNode>> {
    let raw: Vec<RawTreeNode> = serde_json::from_str(json)?;
    Ok(raw.into_iter().map(TreeNode::from).collect())
}

/// Render a forest as a pretty-printed JSON snapshot
pub fn render_snapshot(roots: &[TreeNode]) -> DomainResult<String> {
    let raw: Vec<RawTreeNode> = roots.iter().map(RawTreeNode::from).collect();
    Ok(serde_json::to_string_pretty(&raw)?)
}
