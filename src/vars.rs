//! Directory loading and the typed variable set handed to templates.

use crate::{ctx::Ctx, util};
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::{collections::BTreeMap, path::Path};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Path → text content for every file under one directory.
pub type FileContentMap = BTreeMap<String, String>;

/// A value that can cross into the template layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    Seq(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl From<FileContentMap> for Value {
    fn from(files: FileContentMap) -> Self {
        Value::Map(files.into_iter().map(|(k, v)| (k, Value::Str(v))).collect())
    }
}

/// Top-level template variables, keyed by name. Read-only once built.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VariableSet(BTreeMap<String, Value>);

impl VariableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }
}

#[cfg(test)]
impl VariableSet {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Load every bucket named in `ctx` into a fresh variable set.
pub fn load_variables(ctx: &Ctx) -> Result<VariableSet> {
    let mut vars = VariableSet::new();
    for bucket in &ctx.buckets {
        let files = load_dir(&bucket.dir)
            .with_context(|| format!("load bucket '{}'", bucket.name))?;
        info!(bucket = %bucket.name, files = files.len(), "loaded bucket");
        vars.insert(bucket.name.clone(), files);
    }
    Ok(vars)
}

/// Recursively read every file under `dir` as text.
///
/// Keys are the walked paths as produced from `dir` (so `./elk` yields
/// `./elk/sub/file.txt`). Every non-directory entry is read, so a dangling
/// symlink or an unreadable file aborts the load.
pub fn load_dir(dir: &Path) -> Result<FileContentMap> {
    if !dir.is_dir() {
        bail!("bucket directory not found: {}", dir.display());
    }

    let mut files = FileContentMap::new();

    for entry in WalkDir::new(dir) {
        let entry = entry.with_context(|| format!("walk {}", dir.display()))?;
        if util::is_dir_entry(&entry) {
            continue;
        }

        let path = entry.path();
        let content = util::read_text(path)?;
        debug!(path = %path.display(), bytes = content.len(), "loaded file");
        files.insert(path.to_string_lossy().into_owned(), content);
    }

    Ok(files)
}
