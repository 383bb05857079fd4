//! Tree index
//!
//! Unbalanced binary search tree ordered by key. Each node is owned by the
//! link above it, and every mutation works on that link (`&mut Link`), so
//! deletion splices the replacement into the exact slot the removed node
//! occupied.
//!
//! No rebalancing is performed: depth depends on insertion order and a
//! sorted insertion sequence degrades the tree into a list. All walks are
//! iterative for that reason.

use crate::error::Result;

use super::{Index, Item, ValueMetadata};

type Link = Option<Box<Node>>;

#[derive(Debug)]
struct Node {
    key: String,
    value: ValueMetadata,
    left: Link,
    right: Link,
}

impl Node {
    fn new(key: &str, value: ValueMetadata) -> Self {
        Self {
            key: key.to_string(),
            value,
            left: None,
            right: None,
        }
    }
}

/// Ordered index from key to value location
#[derive(Debug, Default)]
pub struct TreeIndex {
    root: Link,
    len: usize,
}

impl TreeIndex {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Every key in ascending order
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(self.len);
        self.walk(None, None, |node| keys.push(node.key.clone()));
        keys
    }

    /// Number of nodes on the longest root-to-leaf path (0 for an empty tree)
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node, usize)> = Vec::new();
        stack.extend(self.root.as_deref().map(|n| (n, 1)));

        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }

        height
    }

    /// The link holding `key`, or the empty link where it would be attached
    fn slot_mut<'a>(mut link: &'a mut Link, key: &str) -> &'a mut Link {
        while link.as_ref().is_some_and(|node| node.key != key) {
            if let Some(node) = link {
                link = if key < node.key.as_str() {
                    &mut node.left
                } else {
                    &mut node.right
                };
            }
        }
        link
    }

    /// Detach the leftmost node of a subtree, closing the gap with its right child
    fn detach_min(mut link: &mut Link) -> Link {
        while link.as_ref().is_some_and(|node| node.left.is_some()) {
            if let Some(node) = link {
                link = &mut node.left;
            }
        }

        let mut min = link.take()?;
        *link = min.right.take();
        Some(min)
    }

    /// In-order walk visiting nodes with `from <= key <= to`.
    ///
    /// Subtrees that cannot hold a key inside the bounds are never entered.
    fn walk<'a>(&'a self, from: Option<&str>, to: Option<&str>, mut visit: impl FnMut(&'a Node)) {
        let mut stack: Vec<&'a Node> = Vec::new();
        let mut current = self.root.as_deref();

        loop {
            while let Some(node) = current {
                stack.push(node);
                current = match from {
                    Some(from) if node.key.as_str() <= from => None,
                    _ => node.left.as_deref(),
                };
            }

            let Some(node) = stack.pop() else {
                break;
            };

            let above_from = from.map_or(true, |from| node.key.as_str() >= from);
            let below_to = to.map_or(true, |to| node.key.as_str() <= to);
            if above_from && below_to {
                visit(node);
            }

            current = match to {
                Some(to) if node.key.as_str() >= to => None,
                _ => node.right.as_deref(),
            };
        }
    }
}

impl Index for TreeIndex {
    fn get(&self, key: &str) -> Option<ValueMetadata> {
        let mut current = self.root.as_deref();

        while let Some(node) = current {
            if node.key == key {
                return Some(node.value);
            }
            current = if key < node.key.as_str() {
                node.left.as_deref()
            } else {
                node.right.as_deref()
            };
        }

        None
    }

    fn insert(&mut self, key: &str, value: ValueMetadata) -> Result<()> {
        let slot = Self::slot_mut(&mut self.root, key);

        if let Some(node) = slot.as_mut() {
            node.value = value;
            return Ok(());
        }

        *slot = Some(Box::new(Node::new(key, value)));
        self.len += 1;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        let slot = Self::slot_mut(&mut self.root, key);

        let Some(mut node) = slot.take() else {
            return Ok(());
        };

        *slot = match (node.left.take(), node.right.take()) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            (Some(left), Some(right)) => {
                // The in-order successor takes the removed node's place and
                // inherits both of its subtrees.
                let mut right = Some(right);
                let successor = Self::detach_min(&mut right);
                successor.map(|mut successor| {
                    successor.left = Some(left);
                    successor.right = right;
                    successor
                })
            }
        };

        self.len -= 1;
        Ok(())
    }

    fn between(&self, from: &str, to: &str) -> Result<Vec<Item>> {
        let mut items = Vec::new();
        self.walk(Some(from), Some(to), |node| {
            items.push(Item {
                key: node.key.clone(),
                value: node.value,
            })
        });
        Ok(items)
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl Drop for TreeIndex {
    // Iterative so a list-shaped tree does not overflow the stack.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();

        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}
