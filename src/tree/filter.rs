//! Structural name filter over a forest.
//!
//! Ancestors of a match survive so the path to every result stays visible.
//! A node whose own name matches is kept with its full original subtree.

use crate::tree::node::Node;

/// Case-insensitive substring query against node names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameQuery {
    needle: String,
}

impl NameQuery {
    /// Returns `None` for an empty or whitespace-only query.
    pub fn parse(query: &str) -> Option<Self> {
        if query.trim().is_empty() {
            return None;
        }
        Some(Self {
            needle: query.to_lowercase(),
        })
    }

    /// Lowercased search text.
    pub fn needle(&self) -> &str {
        &self.needle
    }

    pub fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.needle)
    }

    pub fn apply(&self, forest: &[Node]) -> Vec<Node> {
        forest.iter().filter_map(|node| self.retain(node)).collect()
    }

    fn retain(&self, node: &Node) -> Option<Node> {
        if self.matches(&node.name) {
            return Some(node.clone());
        }
        let children = self.apply(&node.children);
        if children.is_empty() {
            return None;
        }
        let mut kept = node.detached();
        kept.children = children;
        Some(kept)
    }
}

/// Filter `forest` by `query`. A blank query returns the forest unchanged.
pub fn filter(forest: &[Node], query: &str) -> Vec<Node> {
    match NameQuery::parse(query) {
        Some(q) => q.apply(forest),
        None => forest.to_vec(),
    }
}
