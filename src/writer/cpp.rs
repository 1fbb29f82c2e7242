//! Emit the nested C++ wrapper classes without using external crates.
//!
//! The listing is meant to be `#include`d inside the instruction container
//! class body, so it leans on two names from that scope: `self_t` (the
//! container type) and the flat instruction methods the wrappers forward to.
//! Layout quirks of the text, down to blank lines and the trailing space on
//! the constructor line, are part of the fixed output contract.

use crate::model::InsnRecord;
use crate::processor::trie::TrieNode;

/// Prefix of every generated wrapper class, followed by the node path.
const CLASS_PREFIX: &str = "DotImpl_";

/// Signature line of the container constructor the root listing ends with.
const CONTAINER_CTOR: &str = "CodeGenerator(std::size_t size = 4096) :";

/// Base initializers the container constructor always starts with.
const BASE_INITS: [&str; 2] = ["Registers()", "st(size)"];

/// Full listing: two fixed comment lines, then the rendered tree.
pub fn emit(root: &TrieNode) -> String {
    let mut out = String::new();
    out.push_str("// Nested call wrappers for instructions with dotted mnemonics\n");
    out.push_str("// Auto-generated – DO NOT EDIT\n");
    out.push_str(&render(root));
    out
}

/// Class text for `node` and everything below it.
///
/// Children render first so their class definitions precede the member
/// declarations that use them. The root renders as the container's
/// `private:`/`public:` tail instead of a class of its own.
pub fn render(node: &TrieNode) -> String {
    let children: String = node.children.values().map(render).collect();

    if node.name.is_empty() {
        let members: String = node
            .children
            .values()
            .map(|c| format!("  {} {};\n", class_name(&c.name), c.name))
            .collect();
        let mut inits: Vec<String> = BASE_INITS.iter().map(|s| s.to_string()).collect();
        inits.extend(node.children.keys().map(|seg| format!("{seg}(this)")));
        let inits = inits.join(", ");
        let ctor = CONTAINER_CTOR;
        return format!(
            concat!(
                "private:\n",
                "{children}\n",
                "public:\n",
                "{members}\n",
                "{ctor}\n",
                "    {inits}{{}}\n",
            ),
            children = children,
            members = members,
            ctor = ctor,
            inits = inits,
        );
    }

    let cls = class_name(&node.name);
    let members: String = node
        .children
        .values()
        .map(|c| format!("  {} {};\n", class_name(&c.name), short_name(&c.name)))
        .collect();
    let methods = node
        .methods
        .iter()
        .map(forward_method)
        .collect::<Vec<_>>()
        .join("\n");
    let mut inits = vec!["parent(p)".to_string()];
    inits.extend(node.children.keys().map(|seg| format!("{seg}(p)")));
    let inits = inits.join(", ");
    format!(
        concat!(
            "{children}\n",
            "class {cls} {{\n",
            "  friend self_t;\n",
            "  self_t *parent;\n",
            "public:\n",
            "{members}\n",
            "{methods}\n",
            "  {cls}(self_t *p) : \n",
            "    {inits}{{}}\n",
            "}};\n",
        ),
        children = children,
        cls = cls,
        members = members,
        methods = methods,
        inits = inits,
    )
}

/// One forwarding method: verbatim declarations in the signature, bare
/// identifiers in the call.
fn forward_method(record: &InsnRecord) -> String {
    let method = record
        .name
        .last()
        .map(String::as_str)
        .unwrap_or(&record.insn);
    let decls: Vec<&str> = record.args.iter().map(|p| p.decl.as_str()).collect();
    let idents: Vec<&str> = record.args.iter().map(|p| p.ident.as_str()).collect();
    format!(
        "  constexpr inline void {}({}) const {{ parent->{}({}); }}",
        method,
        decls.join(", "),
        record.insn,
        idents.join(", ")
    )
}

fn class_name(path: &str) -> String {
    format!("{CLASS_PREFIX}{path}")
}

/// Member name inside a parent class: the last path segment only.
fn short_name(path: &str) -> &str {
    path.rsplit('_').next().unwrap_or(path)
}
