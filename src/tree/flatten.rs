//! Pre-order enumeration of a forest.

use crate::tree::node::Node;

/// Pre-order iterator over every node of a forest.
pub struct Preorder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Preorder<'a> {
    pub fn new(forest: &'a [Node]) -> Self {
        Self {
            stack: forest.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Every node of the forest, parents before children, siblings in order.
pub fn flatten(forest: &[Node]) -> Vec<&Node> {
    Preorder::new(forest).collect()
}

/// Number of nodes `flatten` would return.
pub fn count(forest: &[Node]) -> usize {
    forest.iter().map(|node| 1 + count(&node.children)).sum()
}
