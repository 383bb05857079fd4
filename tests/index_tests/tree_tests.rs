//! Tree Index Tests
//!
//! Tests verify:
//! - Point operations and overwrite semantics
//! - Deletion of leaves, one-child and two-children nodes, and the root
//! - In-order traversal stays sorted after every deletion
//! - Range queries
//! - Degenerate (list-shaped) trees

use onetable::index::{Index, TreeIndex, ValueMetadata};

fn meta(offset: u64) -> ValueMetadata {
    ValueMetadata::new(offset, 1)
}

fn tree_of(keys: &[&str]) -> TreeIndex {
    let mut tree = TreeIndex::new();
    for (i, key) in keys.iter().enumerate() {
        tree.insert(key, meta(i as u64)).unwrap();
    }
    tree
}

const SCENARIO: [&str; 9] = ["d", "b", "a", "c1", "c0", "c2", "f", "e", "g"];

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_get_empty_tree() {
    let tree = TreeIndex::new();
    assert_eq!(tree.get("key"), None);
    assert_eq!(tree.height(), 0);
    assert!(tree.keys().is_empty());
}

#[test]
fn test_insert_and_get() {
    let tree = tree_of(&["d", "a", "b", "f"]);

    for (i, key) in ["d", "a", "b", "f"].iter().enumerate() {
        assert_eq!(tree.get(key), Some(meta(i as u64)), "key {}", key);
    }
    assert_eq!(tree.get("c"), None);
    assert_eq!(tree.len(), 4);
}

#[test]
fn test_insert_overwrites_existing() {
    let mut tree = tree_of(&["d", "a", "f"]);

    tree.insert("f", meta(123)).unwrap();

    assert_eq!(tree.get("f"), Some(meta(123)));
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.height(), 2);
}

#[test]
fn test_keys_in_order() {
    let tree = tree_of(&SCENARIO);
    assert_eq!(tree.keys(), vec!["a", "b", "c0", "c1", "c2", "d", "e", "f", "g"]);
}

// =============================================================================
// Deletion Tests
// =============================================================================

#[test]
fn test_delete_leaf() {
    let mut tree = tree_of(&SCENARIO);

    tree.delete("g").unwrap();

    assert_eq!(tree.get("g"), None);
    assert_eq!(tree.keys(), vec!["a", "b", "c0", "c1", "c2", "d", "e", "f"]);
    // Sibling subtree untouched.
    assert_eq!(tree.get("e"), Some(meta(7)));
}

#[test]
fn test_delete_node_with_one_child() {
    let mut tree = tree_of(&["d", "b", "a", "f"]);

    tree.delete("b").unwrap();

    assert_eq!(tree.keys(), vec!["a", "d", "f"]);
    assert_eq!(tree.get("a"), Some(meta(2)));
}

#[test]
fn test_delete_node_with_two_children() {
    let mut tree = tree_of(&SCENARIO);

    // "c1" has children "c0" and "c2".
    tree.delete("c1").unwrap();
    assert_eq!(tree.keys(), vec!["a", "b", "c0", "c2", "d", "e", "f", "g"]);

    // "b" has children "a" and "c2".
    tree.delete("b").unwrap();
    assert_eq!(tree.keys(), vec!["a", "c0", "c2", "d", "e", "f", "g"]);

    for key in ["a", "c0", "c2", "d", "e", "f", "g"] {
        assert!(tree.get(key).is_some(), "key {} lost", key);
    }
}

#[test]
fn test_delete_root_with_two_children() {
    let mut tree = tree_of(&SCENARIO);

    tree.delete("d").unwrap();

    assert_eq!(tree.get("d"), None);
    assert_eq!(tree.keys(), vec!["a", "b", "c0", "c1", "c2", "e", "f", "g"]);
    assert_eq!(tree.len(), 8);
}

#[test]
fn test_delete_root_keeps_remaining_subtree() {
    let mut tree = tree_of(&["d", "b", "a"]);

    tree.delete("d").unwrap();

    assert_eq!(tree.keys(), vec!["a", "b"]);
    assert_eq!(tree.get("b"), Some(meta(1)));
}

#[test]
fn test_delete_single_node_empties_tree() {
    let mut tree = tree_of(&["d"]);

    tree.delete("d").unwrap();

    assert!(tree.is_empty());
    assert_eq!(tree.get("d"), None);
    assert_eq!(tree.height(), 0);
}

#[test]
fn test_delete_absent_key_is_noop() {
    let mut tree = tree_of(&SCENARIO);

    tree.delete("zzz").unwrap();
    tree.delete("c").unwrap();

    assert_eq!(tree.len(), SCENARIO.len());
}

#[test]
fn test_delete_everything_in_every_order_position() {
    for victim in SCENARIO {
        let mut tree = tree_of(&SCENARIO);
        tree.delete(victim).unwrap();

        let mut expected: Vec<&str> = SCENARIO.iter().copied().filter(|k| *k != victim).collect();
        expected.sort_unstable();

        assert_eq!(tree.keys(), expected, "after deleting {}", victim);
        assert_eq!(tree.len(), SCENARIO.len() - 1);
    }
}

#[test]
fn test_delete_until_empty() {
    let mut tree = tree_of(&SCENARIO);

    for key in ["d", "c1", "a", "f", "b", "g", "c0", "e", "c2"] {
        tree.delete(key).unwrap();
        let keys = tree.keys();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    assert!(tree.is_empty());
}

// =============================================================================
// Range Query Tests
// =============================================================================

#[test]
fn test_between_scenario() {
    let tree = tree_of(&["a", "b", "c1", "c0", "c2", "c", "d", "e"]);

    let keys: Vec<String> = tree.between("c", "d").unwrap().into_iter().map(|i| i.key).collect();

    assert_eq!(keys, vec!["c", "c0", "c1", "c2", "d"]);
}

#[test]
fn test_between_bounds_not_present() {
    let tree = tree_of(&SCENARIO);

    let keys: Vec<String> = tree.between("bb", "c9").unwrap().into_iter().map(|i| i.key).collect();

    assert_eq!(keys, vec!["c0", "c1", "c2"]);
}

#[test]
fn test_between_carries_metadata() {
    let tree = tree_of(&SCENARIO);

    let items = tree.between("e", "e").unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].value, meta(7));
}

#[test]
fn test_between_empty_results() {
    let tree = tree_of(&SCENARIO);

    assert!(tree.between("h", "z").unwrap().is_empty());
    assert!(tree.between("f", "a").unwrap().is_empty());
    assert!(TreeIndex::new().between("a", "z").unwrap().is_empty());
}

// =============================================================================
// Degenerate Tree Tests
// =============================================================================

#[test]
fn test_sorted_inserts_build_a_list() {
    let mut tree = TreeIndex::new();
    for i in 0..5_000u64 {
        tree.insert(&format!("key{:06}", i), meta(i)).unwrap();
    }

    assert_eq!(tree.height(), 5_000);
    assert_eq!(tree.get("key004999"), Some(meta(4_999)));
    assert_eq!(tree.between("key000010", "key000012").unwrap().len(), 3);

    tree.delete("key000000").unwrap();
    assert_eq!(tree.len(), 4_999);
    // Dropping a deep tree must not overflow the stack.
    drop(tree);
}
