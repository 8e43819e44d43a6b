//! Arena-backed question forest.
//!
//! The forest owns every node; parent/child links are arena indices, so a
//! node never owns its parent and there are no ownership cycles. Roots are an
//! ordered index list (a forest, not a single tree).

use generational_arena::{Arena, Index};
use std::fmt;

use crate::domain::entities::{QuestionNode, QuestionRecord};

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct ForestNode {
    /// The flat record this node was built from
    pub record: QuestionRecord,
    /// Index of the parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes, ordered
    pub children: Vec<Index>,
}

/// Arena-based forest of question nodes.
#[derive(Debug, Default)]
pub struct QuestionForest {
    arena: Arena<ForestNode>,
    roots: Vec<Index>,
    orphans: Vec<String>,
}

impl QuestionForest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a detached node (no parent, no children).
    pub fn insert(&mut self, record: QuestionRecord) -> Index {
        self.arena.insert(ForestNode {
            record,
            parent: None,
            children: Vec::new(),
        })
    }

    /// Link `child` under `parent`, appending to the child list.
    pub fn attach(&mut self, parent: Index, child: Index) {
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.arena.get_mut(parent) {
            node.children.push(child);
        }
    }

    /// Append a node to the ordered root list.
    pub fn add_root(&mut self, idx: Index) {
        self.roots.push(idx);
    }

    /// Note a node whose declared parent did not resolve.
    pub(crate) fn record_orphan(&mut self, id: &str) {
        self.orphans.push(id.to_string());
    }

    pub fn node(&self, idx: Index) -> Option<&ForestNode> {
        self.arena.get(idx)
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    /// Ids of nodes promoted to root because their parent was unknown.
    pub fn orphans(&self) -> &[String] {
        &self.orphans
    }

    /// Total node count, orphan-promoted nodes included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order traversal across all roots, left to right.
    pub fn iter(&self) -> ForestIterator {
        ForestIterator::new(self)
    }

    /// Maximum depth over all trees in the forest, 0 when empty.
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.node_depth(root))
            .max()
            .unwrap_or(0)
    }

    fn node_depth(&self, idx: Index) -> usize {
        if let Some(node) = self.node(idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.node_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Stable-sort the root list and every child list by `order` ascending.
    ///
    /// Child lists were filled in record order, so ties keep the original
    /// input order. Sorting walks the arena directly, covering even subtrees
    /// disconnected from the roots.
    pub fn sort_by_order(&mut self) {
        let mut roots = std::mem::take(&mut self.roots);
        self.sort_indices(&mut roots);
        self.roots = roots;

        let indices: Vec<Index> = self.arena.iter().map(|(idx, _)| idx).collect();
        for idx in indices {
            let mut children = std::mem::take(&mut self.arena[idx].children);
            self.sort_indices(&mut children);
            self.arena[idx].children = children;
        }
    }

    fn sort_indices(&self, indices: &mut [Index]) {
        // sort_by_key is stable, preserving insertion order on equal keys
        indices.sort_by_key(|&idx| self.node(idx).map(|n| n.record.order).unwrap_or(0));
    }

    /// Clone the forest into nested [`QuestionNode`]s for serialization.
    /// Subtrees disconnected from any root (indirect parent cycles) are not
    /// reachable and do not appear.
    pub fn to_nodes(&self) -> Vec<QuestionNode> {
        self.roots
            .iter()
            .filter_map(|&root| self.to_node(root))
            .collect()
    }

    fn to_node(&self, idx: Index) -> Option<QuestionNode> {
        let node = self.node(idx)?;
        Some(QuestionNode {
            record: node.record.clone(),
            children: node
                .children
                .iter()
                .filter_map(|&child| self.to_node(child))
                .collect(),
        })
    }

    fn to_termtree(&self, idx: Index) -> Option<termtree::Tree<String>> {
        let node = self.node(idx)?;
        let label = format!("{}: {}", node.record.id, node.record.display_label());
        let mut tree = termtree::Tree::new(label);
        for &child in &node.children {
            if let Some(subtree) = self.to_termtree(child) {
                tree.push(subtree);
            }
        }
        Some(tree)
    }
}

impl fmt::Display for QuestionForest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &root in &self.roots {
            if let Some(tree) = self.to_termtree(root) {
                write!(f, "{}", tree)?;
            }
        }
        Ok(())
    }
}

pub struct ForestIterator<'a> {
    forest: &'a QuestionForest,
    stack: Vec<Index>,
}

impl<'a> ForestIterator<'a> {
    fn new(forest: &'a QuestionForest) -> Self {
        let stack = forest.roots.iter().rev().copied().collect();
        Self { forest, stack }
    }
}

impl<'a> Iterator for ForestIterator<'a> {
    type Item = (Index, &'a ForestNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.forest.node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
