//! Display node types and record normalization

use crate::tree::record::RemoteRecord;
use crate::types::{NodeID, FOLDER_KIND_HINT};
use serde::{Deserialize, Serialize};

const FOLDER_LINK_BASE: &str = "https://drive.google.com/drive/folders";
const FILE_LINK_BASE: &str = "https://drive.google.com/file/d";

/// Node kind classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    #[serde(rename = "file")]
    Leaf,
}

impl NodeKind {
    /// Classify a provider kind hint. Only the exact folder marker is a folder.
    pub fn from_hint(kind_hint: &str) -> Self {
        if kind_hint == FOLDER_KIND_HINT {
            NodeKind::Folder
        } else {
            NodeKind::Leaf
        }
    }

    pub fn is_folder(self) -> bool {
        self == NodeKind::Folder
    }
}

/// One appearance of a record in a forest.
///
/// Children are owned exclusively. A record that fans out under several
/// parents is represented by several independent `Node` values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeID,
    pub name: String,
    pub kind: NodeKind,
    pub link: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(id: impl Into<NodeID>, name: impl Into<String>, kind: NodeKind) -> Self {
        let id = id.into();
        let link = link_for(&id, kind);
        Self {
            id,
            name: name.into(),
            kind,
            link,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Copy of this node without its children.
    pub fn detached(&self) -> Node {
        Node {
            id: self.id.clone(),
            name: self.name.clone(),
            kind: self.kind,
            link: self.link.clone(),
            children: Vec::new(),
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }
}

/// Canonical browser link for a node. Pure function of id and kind.
pub fn link_for(id: &str, kind: NodeKind) -> String {
    match kind {
        NodeKind::Folder => format!("{}/{}", FOLDER_LINK_BASE, id),
        NodeKind::Leaf => format!("{}/{}/view", FILE_LINK_BASE, id),
    }
}

/// Map a remote record to a childless node.
pub fn normalize(record: &RemoteRecord) -> Node {
    Node::new(
        record.id.clone(),
        record.name.clone(),
        NodeKind::from_hint(&record.kind_hint),
    )
}
