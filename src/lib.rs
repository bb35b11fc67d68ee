//! `j2render`: render every `*.j2` template in a tree against the text of
//! the `elk/` and `openshift/` directories.

pub mod ctx;
pub mod render;
pub mod util;
pub mod vars;

use anyhow::{Context, Result};
use ctx::Ctx;

/// Load the variable buckets, then render every template under the root.
pub fn run(ctx: &Ctx) -> Result<usize> {
    let vars = vars::load_variables(ctx).context("load variables")?;
    render::render_all(ctx, &vars).context("render templates")
}
