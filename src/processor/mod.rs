//! Functional core: folds extracted records into the name tree.

pub mod digest;
pub mod trie;

use crate::model::InsnRecord;
use trie::TrieNode;

/// Builds the prefix tree over every record, preserving input order.
pub fn run(records: Vec<InsnRecord>) -> TrieNode {
    let mut root = TrieNode::root();
    for record in records {
        root.insert(record);
    }
    tracing::debug!(
        "name tree: {} top-level groups, digest {}",
        root.children.len(),
        digest::structural_digest(&root)
    );
    root
}
