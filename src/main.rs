use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr; stdout carries only the generated listing.
fn setup_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("dotgen=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    setup_tracing();
    dotgen::run()
}
