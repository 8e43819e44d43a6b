//! Tree builder: flat question records to an ordered forest.

use std::collections::HashMap;

use generational_arena::Index;
use tracing::{instrument, warn};

use crate::domain::arena::QuestionForest;
use crate::domain::entities::QuestionRecord;

/// Constructs a [`QuestionForest`] from flat records.
///
/// Expects, but does not require, input that already passed validation: an
/// unresolved parent reference is a warning and the node is promoted to root,
/// never dropped. Attachment is by direct reference only; indirect parent
/// cycles are not detected and leave a subtree disconnected from any root.
pub struct TreeBuilder;

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the forest. Never fails; the input is not mutated, and every
    /// record appears in the forest exactly once.
    #[instrument(level = "debug", skip_all, fields(records = records.len()))]
    pub fn build(&self, records: &[QuestionRecord]) -> QuestionForest {
        let mut forest = QuestionForest::new();

        // First pass: one node per record; first occurrence wins the id slot,
        // so duplicate-id records (unvalidated input) still get their own node.
        let mut by_id: HashMap<&str, Index> = HashMap::with_capacity(records.len());
        let mut indices = Vec::with_capacity(records.len());
        for record in records {
            let idx = forest.insert(record.clone());
            indices.push(idx);
            by_id.entry(record.id.as_str()).or_insert(idx);
        }

        // Second pass, in original order: link to the parent or become a root.
        for (record, &idx) in records.iter().zip(&indices) {
            match &record.parent_id {
                None => forest.add_root(idx),
                Some(parent_id) => match by_id.get(parent_id.as_str()) {
                    Some(&parent_idx) => forest.attach(parent_idx, idx),
                    None => {
                        warn!(
                            question = %record.id,
                            parent = %parent_id,
                            "parent not found, treating question as root"
                        );
                        forest.record_orphan(&record.id);
                        forest.add_root(idx);
                    }
                },
            }
        }

        forest.sort_by_order();
        forest
    }
}
