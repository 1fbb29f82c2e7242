//! Structural fingerprint of a name tree.
//!
//! The digest folds every child edge and forwarding method into a short hex
//! tag identifying the node's shape regardless of declaration order. It only
//! feeds diagnostics today; the emitted text never contains it.

use crate::model::InsnRecord;
use crate::processor::trie::TrieNode;
use sha2::{Digest, Sha256};

/// Digest of `node` and everything below it, as four hex characters.
///
/// Entries are one of `c:{segment}=>[{child digest}]` or
/// `m:{method}({types})->{insn}`, sorted so sibling order cannot leak in,
/// then joined with `|` and hashed with SHA-256.
pub fn structural_digest(node: &TrieNode) -> String {
    let mut entries: Vec<String> = Vec::with_capacity(node.children.len() + node.methods.len());
    for (segment, child) in &node.children {
        entries.push(format!("c:{}=>[{}]", segment, structural_digest(child)));
    }
    for method in &node.methods {
        entries.push(method_entry(method));
    }
    entries.sort();

    let mut hasher = Sha256::new();
    hasher.update(entries.join("|"));
    let hash = hasher.finalize();
    format!("{:02x}{:02x}", hash[0], hash[1])
}

fn method_entry(record: &InsnRecord) -> String {
    let method = record
        .name
        .last()
        .map(String::as_str)
        .unwrap_or(&record.insn);
    let types: Vec<&str> = record.args.iter().map(|p| p.ty.as_str()).collect();
    format!("m:{}({})->{}", method, types.join(", "), record.insn)
}
