//! Prefix tree of dotted instruction names.
//!
//! Name segments walk the tree: `fcvt_w_s` lives as method `s` on the node
//! whose path is `fcvt_w` (reached through `fcvt`). The node owning a record
//! is always the one addressed by every segment but the last.

use crate::model::InsnRecord;
use indexmap::IndexMap;

/// One level of the dotted-name hierarchy.
///
/// Children are exclusively owned by their parent and iterate in insertion
/// order, which keeps the rendered text stable from run to run.
#[derive(Debug)]
pub struct TrieNode {
    /// Underscore-joined path from the root; empty on the root itself.
    pub name: String,
    /// One child per next path segment.
    pub children: IndexMap<String, TrieNode>,
    /// Records whose path ends here; their last segment is the method name.
    pub methods: Vec<InsnRecord>,
}

impl TrieNode {
    pub fn root() -> Self {
        Self::named(String::new())
    }

    fn named(name: String) -> Self {
        Self {
            name,
            children: IndexMap::new(),
            methods: Vec::new(),
        }
    }

    /// File `record` under the node addressed by all but its last segment,
    /// creating intermediate nodes on first use.
    pub fn insert(&mut self, record: InsnRecord) {
        self.insert_from(0, record);
    }

    fn insert_from(&mut self, depth: usize, record: InsnRecord) {
        let rest = &record.name[depth..];
        if rest.len() <= 1 {
            self.methods.push(record);
            return;
        }

        let segment = rest[0].clone();
        let path = if self.name.is_empty() {
            segment.clone()
        } else {
            format!("{}_{}", self.name, segment)
        };
        self.children
            .entry(segment)
            .or_insert_with(|| TrieNode::named(path))
            .insert_from(depth + 1, record);
    }
}
