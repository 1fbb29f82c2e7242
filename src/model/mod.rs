//! Data model shared by the extractor, the tree builder and the writer.
//!
//! Everything here is created once during the scan and never mutated
//! afterwards; records are moved into the trie node they end up filed under.

/// One parameter of an extracted instruction definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Verbatim declaration text (`const IntReg& rd`,
    /// `RoundingMode rm = RoundingMode::dyn`); reused unchanged in the
    /// generated wrapper signature, default value included.
    pub decl: String,
    /// Declared type: default stripped, identifier dropped, remaining
    /// tokens joined by single spaces.
    pub ty: String,
    /// Binding name; the only thing the wrapper forwards in the call.
    pub ident: String,
}

/// One instruction definition whose name carries underscore segments.
#[derive(Debug, Clone, PartialEq)]
pub struct InsnRecord {
    /// Original flat name, e.g. `fcvt_w_s`; the forwarding call target.
    pub insn: String,
    /// `insn` split into its non-empty underscore segments; the path in
    /// the trie, with the last segment doubling as the method name.
    pub name: Vec<String>,
    /// Parameters in declaration order.
    pub args: Vec<Param>,
}

/// An `impl` marker comment, e.g. `// +impl RV32::I::LUI ++RV64I`.
///
/// Recognized and logged, but inert: a directive never produces a record
/// and suppresses nothing. Reserved for future directive handling.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    /// One-character type marker (`+` throughout the current headers).
    pub tag: char,
    /// Instruction name token following the marker.
    pub insn: String,
    /// Free-form trailing text, if any.
    pub info: Option<String>,
}

/// Everything one scan pulled out of a header, in input line order.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub records: Vec<InsnRecord>,
    pub directives: Vec<Directive>,
}
