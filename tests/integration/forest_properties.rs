use docstree::pipeline::recompute;
use docstree::tree::{build, count, filter, flatten, Node, RemoteRecord};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

const ROOT: &str = "root";
const NAMES: &[&str] = &["Docs", "report", "Notes", "DRAFT", "archive", "Report v2", "ünï"];

fn record_strategy(max_records: usize) -> impl Strategy<Value = Vec<RemoteRecord>> {
    (1..=max_records).prop_flat_map(|n| {
        let ids: Vec<String> = (0..n).map(|i| format!("n{}", i)).collect();
        let mut parent_pool = ids.clone();
        parent_pool.push(ROOT.to_string());
        parent_pool.push("missing".to_string());

        let one = (
            prop::sample::select(NAMES.to_vec()),
            any::<bool>(),
            prop::collection::vec(prop::sample::select(parent_pool), 0..3),
        );
        prop::collection::vec(one, n).prop_map(move |specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (name, folder, parents))| {
                    let id = format!("n{}", i);
                    let record = if folder {
                        RemoteRecord::folder(id, name)
                    } else {
                        RemoteRecord::file(id, name)
                    };
                    record.with_parents(parents)
                })
                .collect()
        })
    })
}

fn query_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["", "  ", "rep", "REP", "o", "draft", "zzz", "Ü", "v2"])
        .prop_map(str::to_string)
}

fn parents_of(records: &[RemoteRecord]) -> HashMap<&str, HashSet<&str>> {
    let mut parents: HashMap<&str, HashSet<&str>> = HashMap::new();
    for record in records {
        let entry = parents.entry(record.id.as_str()).or_default();
        if record.parent_ids.is_empty() {
            entry.insert(ROOT);
        }
        entry.extend(record.parent_ids.iter().map(String::as_str));
    }
    parents
}

fn check_edges(
    nodes: &[Node],
    parent: &str,
    ancestors: &mut Vec<String>,
    parents: &HashMap<&str, HashSet<&str>>,
) -> Result<(), TestCaseError> {
    for node in nodes {
        prop_assert!(!ancestors.contains(&node.id), "{} repeats on its own path", node.id);
        let declared = parents.get(node.id.as_str());
        prop_assert!(
            declared.map(|p| p.contains(parent)).unwrap_or(false),
            "{} placed under undeclared parent {}",
            node.id,
            parent
        );
        ancestors.push(node.id.clone());
        check_edges(&node.children, &node.id, ancestors, parents)?;
        ancestors.pop();
    }
    Ok(())
}

fn matches_or_has_matching_descendant(node: &Node, needle: &str) -> bool {
    node.name.to_lowercase().contains(needle)
        || node
            .children
            .iter()
            .any(|child| matches_or_has_matching_descendant(child, needle))
}

/// Every kept node matches, leads to a match, or sits under a matching ancestor.
fn check_relevance(nodes: &[Node], needle: &str, under_match: bool) -> Result<(), TestCaseError> {
    for node in nodes {
        let matched = node.name.to_lowercase().contains(needle);
        prop_assert!(
            under_match || matches_or_has_matching_descendant(node, needle),
            "{} kept without a related match",
            node.id
        );
        check_relevance(&node.children, needle, under_match || matched)?;
    }
    Ok(())
}

proptest! {
    #[test]
    fn every_edge_is_declared_and_paths_are_acyclic(records in record_strategy(12)) {
        let forest = build(&records, ROOT);
        let parents = parents_of(&records);
        let mut ancestors = vec![ROOT.to_string()];
        check_edges(&forest, ROOT, &mut ancestors, &parents)?;
    }

    #[test]
    fn build_is_deterministic(records in record_strategy(12)) {
        prop_assert_eq!(build(&records, ROOT), build(&records, ROOT));
    }

    #[test]
    fn flatten_length_matches_count(records in record_strategy(12)) {
        let forest = build(&records, ROOT);
        prop_assert_eq!(flatten(&forest).len(), count(&forest));
    }

    #[test]
    fn blank_query_is_identity(records in record_strategy(10)) {
        let forest = build(&records, ROOT);
        prop_assert_eq!(filter(&forest, ""), forest.clone());
        prop_assert_eq!(filter(&forest, "   "), forest);
    }

    #[test]
    fn filter_never_grows_and_only_keeps_relevant_nodes(
        records in record_strategy(12),
        query in query_strategy(),
    ) {
        let forest = build(&records, ROOT);
        let filtered = filter(&forest, &query);
        prop_assert!(count(&filtered) <= count(&forest));
        if !query.trim().is_empty() {
            check_relevance(&filtered, &query.to_lowercase(), false)?;
        }
    }

    #[test]
    fn filter_is_case_insensitive(records in record_strategy(12), query in query_strategy()) {
        let forest = build(&records, ROOT);
        prop_assert_eq!(
            filter(&forest, &query.to_uppercase()),
            filter(&forest, &query.to_lowercase())
        );
    }

    #[test]
    fn recompute_counts_agree(records in record_strategy(12), query in query_strategy()) {
        let out = recompute(&records, ROOT, &query);
        prop_assert_eq!(out.count, count(&out.filtered));
        prop_assert_eq!(out.total, count(&out.forest));
        prop_assert!(out.count <= out.total);
    }
}

#[test]
fn matching_folder_keeps_unmatched_children() {
    let records = vec![
        RemoteRecord::folder("n0", "DRAFT"),
        RemoteRecord::file("n1", "Notes").with_parents(["n0"]),
    ];
    let filtered = filter(&build(&records, ROOT), "draft");
    assert_eq!(count(&filtered), 2);
    assert_eq!(filtered[0].children[0].name, "Notes");
}

#[test]
fn fan_out_copies_are_independent() {
    let records = vec![
        RemoteRecord::folder("a", "A"),
        RemoteRecord::folder("b", "B"),
        RemoteRecord::folder("s", "Shared").with_parents(["a", "b"]),
        RemoteRecord::file("x", "inner.txt").with_parents(["s"]),
    ];
    let mut forest = build(&records, ROOT);
    assert_eq!(count(&forest), 6);

    forest[0].children[0].children.clear();
    assert_eq!(forest[1].children[0].children.len(), 1);
}
