//! Text renderers for the generated artifacts.

pub mod cpp;
