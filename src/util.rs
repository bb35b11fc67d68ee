//! Filesystem utility functions used across the crate.

use anyhow::{Context, Result};
use std::{fs, path::Path};
use walkdir::DirEntry;

/// Read a file as UTF-8 text with `\r\n` and lone `\r` folded to `\n`.
pub fn read_text(path: &Path) -> Result<String> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(normalize_newlines(raw))
}

/// Write `contents` to `path`, replacing whatever is there.
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}

pub fn normalize_newlines(s: String) -> String {
    if !s.contains('\r') {
        return s;
    }
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// True for regular files and for symlinks that resolve to one.
pub fn is_file_entry(entry: &DirEntry) -> bool {
    let ft = entry.file_type();
    ft.is_file() || (ft.is_symlink() && entry.path().is_file())
}

/// True for directories and symlinks that resolve to one. Symlinked
/// directories are listed but never descended into.
pub fn is_dir_entry(entry: &DirEntry) -> bool {
    let ft = entry.file_type();
    ft.is_dir() || (ft.is_symlink() && entry.path().is_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use walkdir::WalkDir;

    #[test]
    fn newlines_are_normalized() {
        assert_eq!(normalize_newlines("a\r\nb\rc\n".into()), "a\nb\nc\n");
        assert_eq!(normalize_newlines("plain\n".into()), "plain\n");
    }

    #[test]
    fn read_text_rejects_binary() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("blob.bin");
        fs::write(&p, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let err = read_text(&p).unwrap_err();
        assert!(format!("{err:#}").contains("blob.bin"));
    }

    #[test]
    fn write_text_overwrites() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("out");
        write_text(&p, "first").unwrap();
        write_text(&p, "second").unwrap();
        assert_eq!(fs::read_to_string(&p).unwrap(), "second");
    }

    #[cfg(unix)]
    #[test]
    fn entry_kinds_follow_symlinks() {
        use std::os::unix::fs::symlink;

        let tmp = TempDir::new().unwrap();
        let real = tmp.path().join("real.txt");
        fs::write(&real, "x").unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        symlink(&real, tmp.path().join("file-link")).unwrap();
        symlink(tmp.path().join("sub"), tmp.path().join("dir-link")).unwrap();
        symlink(tmp.path().join("missing"), tmp.path().join("dangling")).unwrap();

        let kinds: std::collections::BTreeMap<String, (bool, bool)> = WalkDir::new(tmp.path())
            .min_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| {
                let name = e.file_name().to_string_lossy().into_owned();
                (name, (is_file_entry(&e), is_dir_entry(&e)))
            })
            .collect();

        assert_eq!(kinds["real.txt"], (true, false));
        assert_eq!(kinds["file-link"], (true, false));
        assert_eq!(kinds["sub"], (false, true));
        assert_eq!(kinds["dir-link"], (false, true));
        assert_eq!(kinds["dangling"], (false, false));
    }
}
