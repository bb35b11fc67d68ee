//! `j2render`: render every `*.j2` template below the working directory.
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use j2render::ctx::Ctx;

/// Paths and the template extension are fixed; there are no options.
#[derive(Parser)]
#[command(
    name = "j2render",
    version,
    about = "Render ./**/*.j2 against the contents of ./elk and ./openshift"
)]
struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let ctx = Ctx::new();
    let rendered = j2render::run(&ctx).context("j2render failed")?;
    tracing::info!(rendered, "done");
    Ok(())
}
