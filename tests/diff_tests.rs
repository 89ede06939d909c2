//! Integration tests for the structural diff engine.

use codegraph_tools::{
    compute_diff, DiffMeta, Edge, EdgeKind, Graph, GraphDiffError, JsonReporter, Node, NodeKind,
};
use serde_json::json;

/// Helper to create a diff-visible file node.
fn make_file(id: &str, name: &str) -> Node {
    Node::new(id, NodeKind::File, name)
        .with_level(1)
        .with_file_path(id.trim_start_matches("file:"))
        .with_lines_of_code(100)
        .with_export_count(5)
}

/// Helper to build a graph from nodes and edges.
fn make_graph(nodes: Vec<Node>, edges: Vec<Edge>) -> Graph {
    let mut graph = Graph::new();
    for node in nodes {
        graph.add_node(node);
    }
    for edge in edges {
        graph.add_edge(edge);
    }
    graph
}

fn commits_meta() -> DiffMeta {
    DiffMeta::commits("main", "dev")
}

#[test]
fn test_self_diff_is_all_empty() {
    let graph = make_graph(
        vec![
            make_file("file:a.py", "a.py"),
            make_file("file:b.py", "b.py"),
        ],
        vec![Edge::new("file:a.py", "file:b.py", EdgeKind::Imports)],
    );
    let report = compute_diff(&graph, &graph, commits_meta()).expect("diff succeeds");
    assert!(!report.has_changes());
    assert_eq!(report.summary.added_nodes, 0);
    assert_eq!(report.summary.removed_nodes, 0);
    assert_eq!(report.summary.moved_nodes, 0);
    assert_eq!(report.summary.modified_nodes, 0);
    assert_eq!(report.summary.added_edges, 0);
    assert_eq!(report.summary.removed_edges, 0);
}

#[test]
fn test_added_and_removed_nodes() {
    let graph_a = make_graph(vec![make_file("file:a.py", "a.py")], vec![]);
    let graph_b = make_graph(vec![make_file("file:b.py", "b.py")], vec![]);
    let report = compute_diff(&graph_a, &graph_b, commits_meta()).expect("diff succeeds");
    assert_eq!(report.summary.added_nodes, 1);
    assert_eq!(report.summary.removed_nodes, 1);
    assert_eq!(report.added_nodes[0].id.value(), "file:b.py");
    assert_eq!(report.removed_nodes[0].id.value(), "file:a.py");
}

#[test]
fn test_modified_node_reports_only_differing_fields() {
    let graph_a = make_graph(
        vec![make_file("file:x.py", "x.py").with_lines_of_code(50)],
        vec![],
    );
    let graph_b = make_graph(
        vec![make_file("file:x.py", "x.py").with_lines_of_code(80)],
        vec![],
    );
    let report = compute_diff(&graph_a, &graph_b, commits_meta()).expect("diff succeeds");
    assert_eq!(report.summary.modified_nodes, 1);
    let modified = &report.modified_nodes[0];
    assert_eq!(modified.node.id.value(), "file:x.py");
    assert_eq!(
        serde_json::to_value(&modified.changes).expect("serialize changes"),
        json!({"lines_of_code": [50, 80]})
    );
}

#[test]
fn test_missing_metric_on_one_side_is_unchanged() {
    let mut sparse = make_file("file:x.py", "x.py");
    sparse.lines_of_code = None;
    let graph_a = make_graph(vec![sparse], vec![]);
    let graph_b = make_graph(
        vec![make_file("file:x.py", "x.py").with_lines_of_code(80)],
        vec![],
    );
    let report = compute_diff(&graph_a, &graph_b, commits_meta()).expect("diff succeeds");
    // export_count matches and lines_of_code is absent on one side, so the
    // node is not reported at all.
    assert_eq!(report.summary.modified_nodes, 0);
}

#[test]
fn test_rename_is_a_move_not_add_remove() {
    let graph_a = make_graph(
        vec![make_file("file:old/foo.py", "foo.py").with_file_path("old/foo.py")],
        vec![],
    );
    let graph_b = make_graph(
        vec![make_file("file:new/foo.py", "foo.py").with_file_path("new/foo.py")],
        vec![],
    );
    let report = compute_diff(&graph_a, &graph_b, commits_meta()).expect("diff succeeds");
    assert_eq!(report.summary.moved_nodes, 1);
    assert_eq!(report.summary.added_nodes, 0);
    assert_eq!(report.summary.removed_nodes, 0);

    let moved = &report.moved_nodes[0];
    assert_eq!(moved.id.value(), "file:new/foo.py");
    assert_eq!(moved.old_id.value(), "file:old/foo.py");
    assert_eq!(moved.old_file_path.as_deref(), Some("old/foo.py"));
    assert_eq!(moved.new_file_path.as_deref(), Some("new/foo.py"));
}

#[test]
fn test_ambiguous_rename_degrades_to_add_remove() {
    let graph_a = make_graph(
        vec![
            make_file("file:a/index.ts", "index.ts"),
            make_file("file:b/index.ts", "index.ts"),
        ],
        vec![],
    );
    let graph_b = make_graph(
        vec![
            make_file("file:c/index.ts", "index.ts"),
            make_file("file:d/index.ts", "index.ts"),
        ],
        vec![],
    );
    let report = compute_diff(&graph_a, &graph_b, commits_meta()).expect("diff succeeds");
    assert_eq!(report.summary.moved_nodes, 0);
    assert_eq!(report.summary.added_nodes, 2);
    assert_eq!(report.summary.removed_nodes, 2);
}

#[test]
fn test_code_level_nodes_never_appear() {
    let func = Node::new("func:a.py:handler", NodeKind::Function, "handler").with_level(0);
    let graph_a = make_graph(vec![make_file("file:a.py", "a.py")], vec![]);
    let graph_b = make_graph(vec![make_file("file:a.py", "a.py"), func], vec![]);
    let report = compute_diff(&graph_a, &graph_b, commits_meta()).expect("diff succeeds");
    assert_eq!(report.summary.added_nodes, 0);
}

#[test]
fn test_edges_between_code_level_nodes_never_appear() {
    let caller = Node::new("func:a.py:f", NodeKind::Function, "f").with_level(0);
    let callee = Node::new("func:b.py:g", NodeKind::Function, "g").with_level(0);
    let shared = vec![
        make_file("file:a.py", "a.py"),
        caller.clone(),
        callee.clone(),
    ];
    let graph_a = make_graph(shared.clone(), vec![]);
    let graph_b = make_graph(
        shared,
        vec![Edge::new("func:a.py:f", "func:b.py:g", EdgeKind::Calls)],
    );
    let report = compute_diff(&graph_a, &graph_b, commits_meta()).expect("diff succeeds");
    assert_eq!(report.summary.added_edges, 0);
}

#[test]
fn test_visible_edge_changes_are_reported() {
    let nodes = vec![
        make_file("file:a.py", "a.py"),
        make_file("file:b.py", "b.py"),
    ];
    let graph_a = make_graph(nodes.clone(), vec![]);
    let graph_b = make_graph(
        nodes,
        vec![Edge::new("file:a.py", "file:b.py", EdgeKind::Imports)],
    );
    let report = compute_diff(&graph_a, &graph_b, commits_meta()).expect("diff succeeds");
    assert_eq!(report.summary.added_edges, 1);
    assert_eq!(report.added_edges[0].from.value(), "file:a.py");
    assert_eq!(report.added_edges[0].kind, EdgeKind::Imports);
    // Both endpoints gained an adjacency entry, so both show as modified.
    assert_eq!(report.summary.modified_nodes, 2);
}

#[test]
fn test_dangling_edge_reference_is_skipped_not_fatal() {
    let graph_a = make_graph(vec![make_file("file:a.py", "a.py")], vec![]);
    let graph_b = make_graph(
        vec![make_file("file:a.py", "a.py")],
        vec![Edge::new("file:a.py", "file:ghost.py", EdgeKind::Imports)],
    );
    let report = compute_diff(&graph_a, &graph_b, commits_meta()).expect("diff succeeds");
    assert_eq!(report.summary.added_edges, 0);
    assert_eq!(report.summary.modified_nodes, 0);
}

#[test]
fn test_malformed_graph_is_rejected_up_front() {
    let mut graph_a = Graph::new();
    graph_a.add_node(Node::new("", NodeKind::File, "anon.py").with_level(1));
    let graph_b = Graph::new();
    let err = compute_diff(&graph_a, &graph_b, commits_meta()).expect_err("must fail");
    assert!(matches!(err, GraphDiffError::MalformedGraph { .. }));
    assert!(err.to_string().contains("graph_a"));
}

#[test]
fn test_repeated_calls_are_byte_identical() {
    let graph_a = make_graph(
        vec![
            make_file("file:b.py", "b.py"),
            make_file("file:a.py", "a.py").with_lines_of_code(10),
            make_file("file:old/foo.py", "foo.py"),
        ],
        vec![Edge::new("file:a.py", "file:b.py", EdgeKind::Imports)],
    );
    let graph_b = make_graph(
        vec![
            make_file("file:a.py", "a.py").with_lines_of_code(20),
            make_file("file:new/foo.py", "foo.py"),
            make_file("file:c.py", "c.py"),
        ],
        vec![Edge::new("file:a.py", "file:c.py", EdgeKind::Imports)],
    );

    let reporter = JsonReporter::compact();
    let first = reporter
        .render(&compute_diff(&graph_a, &graph_b, commits_meta()).expect("diff succeeds"))
        .expect("render");
    let second = reporter
        .render(&compute_diff(&graph_a, &graph_b, commits_meta()).expect("diff succeeds"))
        .expect("render");
    assert_eq!(first, second);
}

#[test]
fn test_summary_always_matches_collections() {
    let graph_a = make_graph(
        vec![
            make_file("file:a.py", "a.py"),
            make_file("file:old/m.py", "m.py"),
            make_file("file:gone.py", "gone.py"),
        ],
        vec![Edge::new("file:a.py", "file:gone.py", EdgeKind::Imports)],
    );
    let graph_b = make_graph(
        vec![
            make_file("file:a.py", "a.py").with_lines_of_code(1),
            make_file("file:new/m.py", "m.py"),
            make_file("file:fresh.py", "fresh.py"),
        ],
        vec![Edge::new("file:a.py", "file:fresh.py", EdgeKind::Imports)],
    );
    let report = compute_diff(&graph_a, &graph_b, commits_meta()).expect("diff succeeds");
    assert_eq!(report.summary.added_nodes, report.added_nodes.len());
    assert_eq!(report.summary.removed_nodes, report.removed_nodes.len());
    assert_eq!(report.summary.moved_nodes, report.moved_nodes.len());
    assert_eq!(report.summary.modified_nodes, report.modified_nodes.len());
    assert_eq!(report.summary.added_edges, report.added_edges.len());
    assert_eq!(report.summary.removed_edges, report.removed_edges.len());
}

#[test]
fn test_report_wire_format() {
    let graph_a = make_graph(
        vec![make_file("file:x.py", "x.py").with_lines_of_code(50)],
        vec![],
    );
    let graph_b = make_graph(
        vec![make_file("file:x.py", "x.py").with_lines_of_code(80)],
        vec![],
    );
    let report = compute_diff(&graph_a, &graph_b, commits_meta()).expect("diff succeeds");
    let value = serde_json::to_value(&report).expect("serialize report");

    assert_eq!(value["meta"], json!({"source": "commits", "ref_a": "main", "ref_b": "dev"}));
    assert_eq!(value["summary"]["modified_nodes"], 1);
    assert_eq!(
        value["modified_nodes"][0]["changes"]["lines_of_code"],
        json!([50, 80])
    );
    assert_eq!(value["modified_nodes"][0]["type"], "file");
    assert_eq!(value["added_nodes"], json!([]));
}
