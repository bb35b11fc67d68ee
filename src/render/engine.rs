//! Template environment, discovery and the per-template render step.

use super::filters;
use crate::{util, vars::VariableSet};
use anyhow::{Context, Result};
use minijinja::{AutoEscape, Environment, Error, ErrorKind};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Build the rendering environment for templates stored under `root`.
///
/// Templates are looked up by their `/`-separated name relative to `root`,
/// so they can include or extend one another.
pub fn environment(root: &Path) -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);

    let root = root.to_path_buf();
    env.set_loader(move |name| load_template(&root, name));

    env.add_filter("json", filters::json);
    env
}

fn load_template(root: &Path, name: &str) -> Result<Option<String>, Error> {
    let Some(path) = safe_join(root, name) else {
        return Ok(None);
    };

    match fs::read_to_string(&path) {
        Ok(src) => Ok(Some(util::normalize_newlines(src))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("could not read template {}", path.display()),
        )
        .with_source(e)),
    }
}

/// Resolve a template name below `root`, refusing anything that would
/// escape it.
fn safe_join(root: &Path, name: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    for segment in name.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            s if s.contains('\\') => return None,
            s => path.push(s),
        }
    }
    Some(path)
}

/// Every file under `root` whose final extension is `ext`, as sorted
/// `/`-separated names relative to `root`.
pub fn discover_templates(root: &Path, ext: &str) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.with_context(|| format!("walk {}", root.display()))?;
        if !util::is_file_entry(&entry) {
            continue;
        }
        if entry.path().extension().and_then(|x| x.to_str()) != Some(ext) {
            continue;
        }

        let rel = entry.path().strip_prefix(root)?;
        names.push(template_name(rel)?);
    }

    names.sort();
    Ok(names)
}

fn template_name(rel: &Path) -> Result<String> {
    let parts = rel
        .components()
        .map(|c| {
            c.as_os_str()
                .to_str()
                .with_context(|| format!("template path is not UTF-8: {}", rel.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join("/"))
}

/// `root/<name>` with the final extension removed (`a/x.yaml.j2` → `a/x.yaml`).
pub fn output_path(root: &Path, name: &str) -> PathBuf {
    let mut out = root.join(name);
    out.set_extension("");
    out
}

/// Render one template and write the result next to it.
///
/// Nothing is written unless rendering succeeds.
pub fn render_one(
    env: &Environment<'_>,
    root: &Path,
    name: &str,
    vars: &VariableSet,
) -> Result<PathBuf> {
    println!("Rendering template {name}");

    let rendered = env
        .get_template(name)
        .and_then(|tpl| tpl.render(vars))
        .map_err(|err| {
            debug!("{}", err.display_debug_info());
            err
        })
        .with_context(|| format!("render template {name}"))?;

    let out = output_path(root, name);
    util::write_text(&out, &rendered)?;
    info!(template = name, output = %out.display(), "wrote output");
    Ok(out)
}
