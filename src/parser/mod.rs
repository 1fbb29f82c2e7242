//! Extractor: best-effort line scanner over an instruction header.
//!
//! Only two line shapes mean anything; every other line is ignored:
//!
//! ```text
//! directive  ::= … "//" WS* TAG "impl" WS+ INSN [WS+ INFO]
//! definition ::= … "void " NAME "(" PARAMS ")" WS* "{" …
//! ```
//!
//! TAG is a single non-whitespace character, INSN a whitespace-free token,
//! INFO free text to end of line. NAME must not contain "(", PARAMS is a
//! comma-separated list of `type tokens… ident [= default]` entries. This
//! is a deliberate scan over a known header layout, not a C++ parser;
//! malformed lines simply fail to match and are skipped.

use std::borrow::Cow;

use crate::model::{Directive, Extraction, InsnRecord, Param};

/// Scan `header` line by line and collect instruction records and `impl`
/// directives, both in input order.
///
/// When `name_macro` is given, the first `MACRO(inner)` occurrence on each
/// line is unwrapped to `inner` before any pattern test, so reserved-word
/// mnemonics hidden behind an identity macro scan like plain definitions.
///
/// Directives take priority: a line that carries one is never treated as a
/// definition. Definitions whose name does not split into at least two
/// non-empty underscore segments are flat instructions and are skipped;
/// they are addressed directly and need no wrapper.
pub fn scan(header: &str, name_macro: Option<&str>) -> Extraction {
    let mut records = Vec::new();
    let mut directives = Vec::new();

    for raw in header.lines() {
        let line: Cow<'_, str> = match name_macro {
            Some(name) => unwrap_name_macro(raw, name),
            None => Cow::Borrowed(raw),
        };

        if let Some(directive) = match_directive(&line) {
            tracing::debug!(
                "impl directive: {}{} {:?}",
                directive.tag,
                directive.insn,
                directive.info
            );
            directives.push(directive);
        } else if let Some((name, params)) = match_definition(&line) {
            let segments: Vec<String> = name
                .split('_')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            if segments.len() < 2 {
                continue;
            }
            records.push(InsnRecord {
                insn: name.to_string(),
                name: segments,
                args: parse_params(params),
            });
        }
    }

    tracing::debug!(
        "scanned {} instruction records and {} directives",
        records.len(),
        directives.len()
    );

    Extraction {
        records,
        directives,
    }
}

/// Replace the first `MACRO(inner)` occurrence with `inner`.
///
/// Headers wrap reserved-word mnemonics (`and`, `or`, `xor`) in an identity
/// macro; left in place, the macro identifier itself would be scanned as the
/// instruction name.
fn unwrap_name_macro<'a>(line: &'a str, name: &str) -> Cow<'a, str> {
    let mut from = 0;
    while let Some(pos) = line[from..].find(name) {
        let at = from + pos;
        let after = &line[at + name.len()..];
        let trimmed = after.trim_start();
        if let Some(rest) = trimmed.strip_prefix('(') {
            if let Some(close) = rest.find(')') {
                if close > 0 {
                    return Cow::Owned(format!(
                        "{}{}{}",
                        &line[..at],
                        &rest[..close],
                        &rest[close + 1..]
                    ));
                }
            }
        }
        from = at + name.len();
    }
    Cow::Borrowed(line)
}

/// `// +impl RV32::I::LUI ++RV64I` → tag `+`, insn `RV32::I::LUI`,
/// info `++RV64I`.
///
/// Tried before the definition shape, so an annotated definition line counts
/// as a directive and produces no record.
fn match_directive(line: &str) -> Option<Directive> {
    for (idx, _) in line.match_indices("//") {
        let rest = line[idx + 2..].trim_start();
        let mut chars = rest.chars();
        let Some(tag) = chars.next() else { continue };
        let Some(after) = chars.as_str().strip_prefix("impl") else {
            continue;
        };
        // whitespace between "impl" and the name token is mandatory
        if !after.starts_with(char::is_whitespace) {
            continue;
        }
        let after = after.trim_start();
        let (insn, info) = match after.find(char::is_whitespace) {
            Some(i) => (&after[..i], Some(after[i..].trim_start())),
            None => (after, None),
        };
        return Some(Directive {
            tag,
            insn: insn.to_string(),
            info: info.map(str::to_string),
        });
    }
    None
}

/// `void fcvt_w_s(const IntReg& rd, const FpReg& rs1) {` →
/// `("fcvt_w_s", "const IntReg& rd, const FpReg& rs1")`.
///
/// The closing paren is the rightmost one still followed by `{`, so
/// one-line bodies (`void jal(...) { jal(...); }`) do not confuse the
/// match.
fn match_definition(line: &str) -> Option<(&str, &str)> {
    let start = line.find("void ")?;
    let rest = &line[start + 5..];
    let open = rest.find('(')?;
    let name = rest[..open].trim();
    if name.is_empty() {
        return None;
    }
    let params = &rest[open + 1..];
    for (close, _) in params.rmatch_indices(')') {
        if params[close + 1..].trim_start().starts_with('{') {
            return Some((name, &params[..close]));
        }
    }
    None
}

/// Split a raw parameter list into descriptors.
///
/// Each entry is `type tokens… ident [= default]`: the declared type is
/// every whitespace token before the identifier, and a default belongs to
/// the signature but never to the forwarded call. Deliberately narrow:
/// commas inside default expressions or template arguments are not
/// understood, matching the headers this runs against.
fn parse_params(raw: &str) -> Vec<Param> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',')
        .map(|piece| parse_param(piece.trim_start()))
        .collect()
}

fn parse_param(decl: &str) -> Param {
    let bare = match decl.find('=') {
        Some(i) => decl[..i].trim_end(),
        None => decl,
    };
    let mut tokens: Vec<&str> = bare.split_whitespace().collect();
    let ident = tokens.pop().unwrap_or_default().to_string();
    Param {
        decl: decl.to_string(),
        ty: tokens.join(" "),
        ident,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_definition() {
        let test_cases = vec![
            (
                "  void lui(const IntReg& rd, uint32 imm20) {",
                Some(("lui", "const IntReg& rd, uint32 imm20")),
            ),
            (
                "void jal(const IntReg& rd, addr_t addr) { jal(rd, addr2label(addr)); }",
                Some(("jal", "const IntReg& rd, addr_t addr")),
            ),
            ("  void fence_i() {", Some(("fence_i", ""))),
            // not a void definition
            ("  uint32 encode(const IntReg& rd) {", None),
            // no closing paren before the brace
            ("  void broken(const IntReg& rd", None),
            ("  st << [=](Strage& s) { s.word(op); };", None),
        ];

        for (line, expected) in test_cases {
            assert_eq!(match_definition(line), expected, "line: {line}");
        }
    }

    #[test]
    fn test_match_directive() {
        let test_cases = vec![
            (
                "  // +impl RV32::I::LUI",
                Some(Directive {
                    tag: '+',
                    insn: "RV32::I::LUI".into(),
                    info: None,
                }),
            ),
            (
                "  // +impl pseudo::jal offset (jal x1, offset) Jump and link",
                Some(Directive {
                    tag: '+',
                    insn: "pseudo::jal".into(),
                    info: Some("offset (jal x1, offset) Jump and link".into()),
                }),
            ),
            (
                "// -impl fence.tso emitted by hand",
                Some(Directive {
                    tag: '-',
                    insn: "fence.tso".into(),
                    info: Some("emitted by hand".into()),
                }),
            ),
            // plain comments that merely start with "impl…"
            ("  // implementation note", None),
            ("  // +implement foo", None),
            // the marker needs a name token after it
            ("  // +impl", None),
            ("  int x = 1; // no marker here", None),
        ];

        for (line, expected) in test_cases {
            assert_eq!(match_directive(line), expected, "line: {line}");
        }
    }

    #[test]
    fn test_unwrap_name_macro() {
        let test_cases = vec![
            (
                "  void INSN_NAME(or)(const IntReg& rd) { or_(rd); }",
                "  void or(const IntReg& rd) { or_(rd); }",
            ),
            (
                "  void INSN_NAME (xor)(const IntReg& rd) {",
                "  void xor(const IntReg& rd) {",
            ),
            ("  void lui(const IntReg& rd) {", "  void lui(const IntReg& rd) {"),
            // empty inner name is left alone
            ("INSN_NAME()", "INSN_NAME()"),
        ];

        for (line, expected) in test_cases {
            assert_eq!(unwrap_name_macro(line, "INSN_NAME"), expected, "line: {line}");
        }
    }

    #[test]
    fn test_parse_params() {
        let test_cases = vec![
            ("", vec![]),
            (
                "const IntReg& rd, uint32 imm20",
                vec![
                    Param {
                        decl: "const IntReg& rd".into(),
                        ty: "const IntReg&".into(),
                        ident: "rd".into(),
                    },
                    Param {
                        decl: "uint32 imm20".into(),
                        ty: "uint32".into(),
                        ident: "imm20".into(),
                    },
                ],
            ),
            (
                "RoundingMode rm = RoundingMode::dyn",
                vec![Param {
                    decl: "RoundingMode rm = RoundingMode::dyn".into(),
                    ty: "RoundingMode".into(),
                    ident: "rm".into(),
                }],
            ),
        ];

        for (raw, expected) in test_cases {
            assert_eq!(parse_params(raw), expected, "raw: {raw}");
        }
    }

    #[test]
    fn test_scan_keeps_input_order_and_skips_flat_names() {
        let header = "\
void nop() {
void sc_w(const IntReg& rd, const IntReg& rs2, const IntOffsetReg& rs1) {
void xor_(const IntReg& rd, const IntReg& rs1, const IntReg& rs2) {
void lr_w(const IntReg& rd, const IntOffsetReg& rs1) {
";
        let extraction = scan(header, None);

        let names: Vec<&str> = extraction.records.iter().map(|r| r.insn.as_str()).collect();
        assert_eq!(names, vec!["sc_w", "lr_w"]);
        assert_eq!(extraction.records[0].name, vec!["sc", "w"]);
    }

    #[test]
    fn test_directive_lines_never_yield_records() {
        let header = "\
  // +impl RV32::A::LR.W
  void lr_w(const IntReg& rd, const IntOffsetReg& rs1) {
  void sc_w(const IntReg& rd, const IntReg& rs2, const IntOffsetReg& rs1) { // +impl RV32::A::SC.W
";
        let extraction = scan(header, None);

        // the annotated sc_w line counts as a directive, not a definition;
        // the plain lr_w definition still yields its own record
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].insn, "lr_w");
        assert_eq!(extraction.directives.len(), 2);
        assert_eq!(extraction.directives[0].insn, "RV32::A::LR.W");
        assert_eq!(extraction.directives[1].insn, "RV32::A::SC.W");
    }

    #[test]
    fn test_scan_unwraps_name_macro() {
        let header = "\
void INSN_NAME(or)(const IntReg& rd, const IntReg& rs1, const IntReg& rs2) { or_(rd, rs1, rs2); }
void fcvt_w_s(const IntReg& rd, const FpReg& rs1) {
";
        // without unwrapping, the macro identifier is mistaken for a
        // dotted instruction name
        let poisoned = scan(header, None);
        assert!(poisoned.records.iter().any(|r| r.insn == "INSN_NAME"));

        let clean = scan(header, Some("INSN_NAME"));
        let names: Vec<&str> = clean.records.iter().map(|r| r.insn.as_str()).collect();
        assert_eq!(names, vec!["fcvt_w_s"]);
    }
}
