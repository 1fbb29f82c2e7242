use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Instruction header to scan
    pub input: PathBuf,

    /// Macro name to unwrap before matching, e.g. `XKON_INSN_NAME`
    #[arg(long)]
    pub name_macro: Option<String>,
}
