use std::path::{Path, PathBuf};

/// Extension (without the dot) that marks a file as a template.
pub const TEMPLATE_EXT: &str = "j2";

/// Variable buckets and the directory each one is loaded from, relative to
/// the root.
pub const BUCKETS: [&str; 2] = ["elk", "openshift"];

/// A named directory whose files become one top-level template variable.
#[derive(Clone, Debug)]
pub struct Bucket {
    pub name: String,
    pub dir: PathBuf,
}

/// Immutable bag of paths and constants for one run.
/// Constructed once at startup; never mutated after that.
#[derive(Clone, Debug)]
pub struct Ctx {
    pub root: PathBuf,
    pub buckets: Vec<Bucket>,
    pub template_ext: String,
}

impl Ctx {
    /// Context rooted at the process working directory (`.`).
    pub fn new() -> Self {
        Self::with_root(".")
    }

    /// Context rooted at `root`; bucket directories live directly below it.
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let buckets = BUCKETS
            .iter()
            .map(|name| Bucket {
                name: (*name).to_owned(),
                dir: root.join(name),
            })
            .collect();

        Self {
            root,
            buckets,
            template_ext: TEMPLATE_EXT.to_owned(),
        }
    }
}
