//! Tests for TreeBuilder and the arena-backed forest

use questree::domain::{QuestionForest, QuestionNode, QuestionRecord, TreeBuilder};

fn record(id: &str, parent: Option<&str>, order: i32) -> QuestionRecord {
    QuestionRecord {
        id: id.to_string(),
        label_primary: format!("Question {id}"),
        label_secondary: String::new(),
        content: "Text".to_string(),
        order,
        parent_id: parent.map(str::to_string),
        unit: None,
        enum_options_primary: None,
        enum_options_secondary: None,
    }
}

fn root_ids(forest: &QuestionForest) -> Vec<String> {
    forest
        .roots()
        .iter()
        .filter_map(|&idx| forest.node(idx))
        .map(|node| node.record.id.clone())
        .collect()
}

fn nested_len(nodes: &[QuestionNode]) -> usize {
    nodes.iter().map(QuestionNode::subtree_len).sum()
}

#[test]
fn given_parent_links_when_building_then_children_sorted_by_order() {
    // Arrange: root "1" with children declared out of order
    let records = vec![
        record("1", None, 2),
        record("2", Some("1"), 1),
        record("3", Some("1"), 0),
    ];

    // Act
    let forest = TreeBuilder::new().build(&records);

    // Assert
    assert_eq!(root_ids(&forest), ["1"]);
    let nodes = forest.to_nodes();
    let children: Vec<&str> = nodes[0]
        .children
        .iter()
        .map(|c| c.record.id.as_str())
        .collect();
    assert_eq!(children, ["3", "2"]);
}

#[test]
fn given_equal_orders_when_building_then_ties_keep_input_order() {
    let records = vec![
        record("1", None, 1),
        record("b", Some("1"), 5),
        record("a", Some("1"), 5),
        record("c", Some("1"), 5),
    ];

    let forest = TreeBuilder::new().build(&records);

    let nodes = forest.to_nodes();
    let children: Vec<&str> = nodes[0]
        .children
        .iter()
        .map(|c| c.record.id.as_str())
        .collect();
    assert_eq!(children, ["b", "a", "c"]);
}

#[test]
fn given_root_records_when_building_then_root_list_sorted_by_order() {
    let records = vec![record("x", None, 3), record("y", None, 1), record("z", None, 2)];

    let forest = TreeBuilder::new().build(&records);

    assert_eq!(root_ids(&forest), ["y", "z", "x"]);
}

#[test]
fn given_unknown_parent_when_building_then_node_promoted_to_root() {
    // Unvalidated data: parent "99" does not exist
    let records = vec![record("1", None, 1), record("2", Some("99"), 1)];

    let forest = TreeBuilder::new().build(&records);

    assert_eq!(forest.roots().len(), 2);
    assert!(root_ids(&forest).contains(&"2".to_string()));
    assert_eq!(forest.orphans(), ["2".to_string()]);
}

#[test]
fn given_any_input_when_building_then_every_record_appears_once() {
    // Conservation: node count equals record count, orphans and duplicates included
    let records = vec![
        record("1", None, 1),
        record("1", None, 2),
        record("2", Some("1"), 1),
        record("3", Some("99"), 1),
    ];

    let forest = TreeBuilder::new().build(&records);

    assert_eq!(forest.len(), records.len());
    assert_eq!(forest.iter().count(), records.len());
    assert_eq!(nested_len(&forest.to_nodes()), records.len());
}

#[test]
fn given_same_records_when_building_twice_then_identical_forests() {
    let records = vec![
        record("1", None, 2),
        record("2", Some("1"), 1),
        record("3", Some("1"), 1),
        record("4", None, 1),
        record("5", Some("4"), 0),
    ];

    let builder = TreeBuilder::new();
    let first = builder.build(&records).to_nodes();
    let second = builder.build(&records).to_nodes();

    assert_eq!(first, second);
}

#[test]
fn given_records_when_building_then_input_left_untouched() {
    let records = vec![record("1", None, 2), record("2", Some("1"), 1)];
    let before = records.clone();

    let _ = TreeBuilder::new().build(&records);

    assert_eq!(records, before);
}

#[test]
fn given_empty_input_when_building_then_empty_forest() {
    let forest = TreeBuilder::new().build(&[]);

    assert!(forest.is_empty());
    assert!(forest.roots().is_empty());
    assert!(forest.to_nodes().is_empty());
    assert_eq!(forest.depth(), 0);
}

#[test]
fn given_deep_chain_when_building_then_depth_matches() {
    let records = vec![
        record("1", None, 1),
        record("2", Some("1"), 1),
        record("3", Some("2"), 1),
        record("4", Some("3"), 1),
    ];

    let forest = TreeBuilder::new().build(&records);

    assert_eq!(forest.depth(), 4);
}

#[test]
fn given_preorder_iteration_when_walking_then_parents_before_children() {
    let records = vec![
        record("1", None, 1),
        record("1.1", Some("1"), 1),
        record("1.1.1", Some("1.1"), 1),
        record("2", None, 2),
    ];

    let forest = TreeBuilder::new().build(&records);

    let ids: Vec<&str> = forest.iter().map(|(_, n)| n.record.id.as_str()).collect();
    assert_eq!(ids, ["1", "1.1", "1.1.1", "2"]);
}

#[test]
fn given_mutual_parent_cycle_when_building_then_no_loop_and_nodes_kept() {
    // a -> b -> a: attachment is by direct reference only, so both nodes are
    // attached once and the island is disconnected from any root.
    let records = vec![record("a", Some("b"), 1), record("b", Some("a"), 1)];

    let forest = TreeBuilder::new().build(&records);

    assert_eq!(forest.len(), 2);
    assert!(forest.roots().is_empty());
    assert!(forest.orphans().is_empty());
    assert!(forest.to_nodes().is_empty());
}

#[test]
fn given_children_of_all_nodes_when_built_then_order_is_monotone() {
    // Ordering invariant: children[i].order <= children[i+1].order everywhere
    let records = vec![
        record("r", None, 0),
        record("c3", Some("r"), 3),
        record("c1", Some("r"), 1),
        record("c2", Some("r"), 2),
        record("g2", Some("c1"), 9),
        record("g1", Some("c1"), -1),
    ];

    let forest = TreeBuilder::new().build(&records);

    for (_, node) in forest.iter() {
        let orders: Vec<i32> = node
            .children
            .iter()
            .filter_map(|&c| forest.node(c))
            .map(|n| n.record.order)
            .collect();
        assert!(orders.windows(2).all(|w| w[0] <= w[1]));
    }
}
