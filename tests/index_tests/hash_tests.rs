//! Hash Index Tests
//!
//! Tests verify:
//! - Point operations and overwrite semantics
//! - Deletion of present and absent keys
//! - Range queries: inclusive bounds, ascending order, empty results

use onetable::index::{HashIndex, Index, ValueMetadata};

fn meta(offset: u64) -> ValueMetadata {
    ValueMetadata::new(offset, 8)
}

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_index_is_empty() {
    let index = HashIndex::new();
    assert_eq!(index.len(), 0);
    assert!(index.is_empty());
    assert_eq!(index.get("key"), None);
}

#[test]
fn test_insert_and_get() {
    let mut index = HashIndex::new();

    index.insert("key1", meta(0)).unwrap();
    index.insert("key2", meta(8)).unwrap();

    assert_eq!(index.get("key1"), Some(meta(0)));
    assert_eq!(index.get("key2"), Some(meta(8)));
    assert_eq!(index.len(), 2);
}

#[test]
fn test_insert_overwrites_existing() {
    let mut index = HashIndex::new();

    index.insert("key", meta(0)).unwrap();
    index.insert("key", meta(123)).unwrap();

    assert_eq!(index.get("key"), Some(meta(123)));
    assert_eq!(index.len(), 1);
}

#[test]
fn test_delete() {
    let mut index = HashIndex::new();

    index.insert("key", meta(0)).unwrap();
    index.delete("key").unwrap();

    assert_eq!(index.get("key"), None);
    assert!(index.is_empty());
}

#[test]
fn test_delete_absent_key_is_noop() {
    let mut index = HashIndex::new();
    index.insert("other", meta(0)).unwrap();

    index.delete("missing").unwrap();

    assert_eq!(index.len(), 1);
    assert_eq!(index.get("other"), Some(meta(0)));
}

// =============================================================================
// Range Query Tests
// =============================================================================

#[test]
fn test_between_sorted_and_inclusive() {
    let mut index = HashIndex::new();
    for (i, key) in ["a", "b", "c1", "c0", "c2", "c", "d", "e"].iter().enumerate() {
        index.insert(key, meta(i as u64)).unwrap();
    }

    let items = index.between("c", "d").unwrap();
    let keys: Vec<&str> = items.iter().map(|item| item.key.as_str()).collect();

    assert_eq!(keys, vec!["c", "c0", "c1", "c2", "d"]);
    assert_eq!(items[0].value, meta(5));
    assert_eq!(items[4].value, meta(6));
}

#[test]
fn test_between_no_matches() {
    let mut index = HashIndex::new();
    index.insert("a", meta(0)).unwrap();
    index.insert("z", meta(1)).unwrap();

    assert!(index.between("b", "y").unwrap().is_empty());
    assert!(index.between("z", "a").unwrap().is_empty());
}

#[test]
fn test_between_single_key_range() {
    let mut index = HashIndex::new();
    index.insert("a", meta(0)).unwrap();
    index.insert("b", meta(1)).unwrap();

    let items = index.between("b", "b").unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].key, "b");
}
