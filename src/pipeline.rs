//! Recompute pipeline: normalize, build, filter, count.
//!
//! Runs from scratch on every change to the records, the selected root or the
//! query. Nothing here blocks or fails.

use crate::tree::{self, BuildReport, ForestBuilder, Node, RemoteRecord};
use serde::Serialize;

/// Output handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recomputed {
    /// Full forest relative to the selected root.
    pub forest: Vec<Node>,
    /// Forest after the name filter.
    pub filtered: Vec<Node>,
    /// Number of nodes in `filtered`, counted in pre-order.
    pub count: usize,
    /// Number of nodes in `forest`.
    pub total: usize,
    #[serde(skip)]
    pub report: BuildReport,
}

impl Recomputed {
    pub fn is_filtered(&self) -> bool {
        self.count != self.total || self.filtered != self.forest
    }
}

pub fn recompute(records: &[RemoteRecord], root_id: &str, query: &str) -> Recomputed {
    let (forest, report) = ForestBuilder::new(root_id).build_with_report(records);
    let filtered = tree::filter(&forest, query);
    let count = tree::flatten(&filtered).len();
    let total = tree::count(&forest);
    Recomputed {
        forest,
        filtered,
        count,
        total,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<RemoteRecord> {
        vec![
            RemoteRecord::folder("d1", "Docs"),
            RemoteRecord::file("f1", "Report.pdf").with_parents(["d1"]),
            RemoteRecord::folder("d2", "Engineering"),
            RemoteRecord::file("f2", "main.go").with_parents(["d2"]),
        ]
    }

    #[test]
    fn empty_query_counts_whole_forest() {
        let out = recompute(&records(), "root", "");
        assert_eq!(out.count, 4);
        assert_eq!(out.total, 4);
        assert_eq!(out.filtered, out.forest);
        assert!(!out.is_filtered());
    }

    #[test]
    fn query_narrows_count() {
        let out = recompute(&records(), "root", "report");
        assert_eq!(out.count, 2);
        assert_eq!(out.total, 4);
        assert!(out.is_filtered());
    }

    #[test]
    fn parentless_records_follow_the_designated_root() {
        let out = recompute(&records(), "shared-9", "");
        assert_eq!(out.count, 4);
        assert_eq!(out.forest[0].id, "d1");
    }

    #[test]
    fn records_under_another_root_are_not_shown() {
        let records = vec![
            RemoteRecord::folder("d1", "Docs").with_parents(["root"]),
            RemoteRecord::file("f1", "Report.pdf").with_parents(["d1"]),
        ];
        let out = recompute(&records, "shared-9", "");
        assert!(out.forest.is_empty());
        assert_eq!(out.count, 0);
        assert_eq!(out.total, 0);
    }
}
