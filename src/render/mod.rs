//! Template rendering facade.

pub mod engine;
pub mod filters;

use crate::{ctx::Ctx, vars::VariableSet};
use anyhow::Result;
use tracing::info;

/// Render every template under `ctx.root`, stopping at the first failure.
///
/// Returns the number of templates rendered.
pub fn render_all(ctx: &Ctx, vars: &VariableSet) -> Result<usize> {
    let env = engine::environment(&ctx.root);
    let templates = engine::discover_templates(&ctx.root, &ctx.template_ext)?;
    info!(count = templates.len(), root = %ctx.root.display(), "discovered templates");

    for name in &templates {
        engine::render_one(&env, &ctx.root, name, vars)?;
    }

    Ok(templates.len())
}
