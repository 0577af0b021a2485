//! Forest reconstruction from flat, parent-referencing records.
//!
//! Records name zero or more parent folders. The builder indexes every record,
//! groups them under their effective parents and then walks down from the
//! designated root, copying each node into every slot it occupies.

use crate::tree::node::{normalize, Node};
use crate::tree::record::RemoteRecord;
use std::collections::{HashMap, HashSet};

/// Counters describing what a build dropped or merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Records whose id repeated an earlier record in the batch.
    pub duplicate_ids: usize,
    /// Indexed records that no path from the root reaches.
    pub unreachable: usize,
    /// Parent links dropped because they pointed back into the current path.
    pub back_edges: usize,
}

impl BuildReport {
    /// Nothing was dropped or merged.
    pub fn is_clean(&self) -> bool {
        self.duplicate_ids == 0 && self.unreachable == 0 && self.back_edges == 0
    }
}

/// Builds a forest relative to one root identifier.
#[derive(Debug, Clone)]
pub struct ForestBuilder {
    root_id: String,
}

impl ForestBuilder {
    pub fn new(root_id: impl Into<String>) -> Self {
        Self {
            root_id: root_id.into(),
        }
    }

    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    pub fn build(&self, records: &[RemoteRecord]) -> Vec<Node> {
        self.build_with_report(records).0
    }

    pub fn build_with_report(&self, records: &[RemoteRecord]) -> (Vec<Node>, BuildReport) {
        let mut report = BuildReport::default();

        // Last write wins for repeated ids.
        let mut index: HashMap<&str, Node> = HashMap::with_capacity(records.len());
        for record in records {
            if index.insert(record.id.as_str(), normalize(record)).is_some() {
                report.duplicate_ids += 1;
            }
        }

        // parent id -> child ids in input order, each child listed once per parent
        let mut pending: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut seen_links: HashSet<(&str, &str)> = HashSet::new();
        for record in records {
            let parents: Vec<&str> = if record.parent_ids.is_empty() {
                vec![self.root_id.as_str()]
            } else {
                record.parent_ids.iter().map(String::as_str).collect()
            };
            for parent in parents {
                if seen_links.insert((parent, record.id.as_str())) {
                    pending.entry(parent).or_default().push(record.id.as_str());
                }
            }
        }

        let mut walk = Walk {
            index: &index,
            pending: &pending,
            path: vec![self.root_id.as_str()],
            visited: HashSet::new(),
            back_edges: 0,
        };
        let roots = walk.children_of(self.root_id.as_str());

        report.back_edges = walk.back_edges;
        report.unreachable = index
            .keys()
            .filter(|id| !walk.visited.contains(*id))
            .count();

        if !report.is_clean() {
            tracing::debug!(
                root = %self.root_id,
                records = records.len(),
                duplicate_ids = report.duplicate_ids,
                unreachable = report.unreachable,
                back_edges = report.back_edges,
                "Forest built with dropped records"
            );
        }

        (roots, report)
    }
}

struct Walk<'a> {
    index: &'a HashMap<&'a str, Node>,
    pending: &'a HashMap<&'a str, Vec<&'a str>>,
    /// Ancestor chain of the node currently being expanded.
    path: Vec<&'a str>,
    visited: HashSet<&'a str>,
    back_edges: usize,
}

impl<'a> Walk<'a> {
    fn children_of(&mut self, parent: &'a str) -> Vec<Node> {
        let (index, pending) = (self.index, self.pending);
        let Some(child_ids) = pending.get(parent) else {
            return Vec::new();
        };

        let mut children = Vec::with_capacity(child_ids.len());
        for &child_id in child_ids {
            if self.path.contains(&child_id) {
                self.back_edges += 1;
                continue;
            }
            // Parent ids that are not records never resolve here.
            let Some(template) = index.get(child_id) else {
                continue;
            };
            self.visited.insert(child_id);

            self.path.push(child_id);
            let grandchildren = self.children_of(child_id);
            self.path.pop();

            let mut node = template.clone();
            node.children = grandchildren;
            children.push(node);
        }
        children
    }
}

/// Build the forest of records reachable from `root_id`.
pub fn build(records: &[RemoteRecord], root_id: &str) -> Vec<Node> {
    ForestBuilder::new(root_id).build(records)
}
