use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use glob::Pattern;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// One child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Lists the direct children of a directory. Recursion is done by the caller.
pub trait DirectoryWalker: Send + Sync {
    fn list_entries(&self, dir: &Path) -> Result<Vec<WalkEntry>>;
}

/// [`DirectoryWalker`] over the real filesystem, children sorted by name.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWalker;

impl DirectoryWalker for FsWalker {
    fn list_entries(&self, dir: &Path) -> Result<Vec<WalkEntry>> {
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| {
                let entry = entry.map_err(|e| {
                    let path = e.path().unwrap_or(dir).to_path_buf();
                    Error::io(path, e.into())
                })?;
                Ok(WalkEntry {
                    is_dir: entry.file_type().is_dir(),
                    path: entry.into_path(),
                })
            })
            .collect()
    }
}

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are matched as plain path fragments.
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Paths left out of a run.
#[derive(Debug, Default)]
pub struct Excludes {
    fragments: Vec<String>,
    patterns: Vec<Pattern>,
}

impl Excludes {
    pub fn new(excludes: &[String]) -> Result<Self> {
        let mut fragments = Vec::new();
        let mut patterns = Vec::new();
        for exclude in excludes {
            if is_glob_pattern(exclude) {
                let pattern = Pattern::new(exclude).map_err(|e| {
                    Error::config(format!("invalid exclude pattern \"{}\": {}", exclude, e))
                })?;
                patterns.push(pattern);
            } else if !exclude.is_empty() {
                fragments.push(exclude.clone());
            }
        }
        Ok(Self {
            fragments,
            patterns,
        })
    }

    /// `relative` is the path below the project root, when there is one.
    pub fn matches(&self, path: &Path, relative: Option<&Path>) -> bool {
        let full = path.to_string_lossy();
        if self.fragments.iter().any(|f| full.contains(f.as_str())) {
            return true;
        }
        self.patterns.iter().any(|pattern| {
            pattern.matches_path(path) || relative.is_some_and(|rel| pattern.matches_path(rel))
        })
    }
}

/// Files the engine can process: `.ts`, `.tsx`, `.js`, `.jsx`, but not
/// declaration files.
pub fn is_source_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.ends_with(".d.ts") {
        return false;
    }
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tsx" | "ts" | "jsx" | "js")
    )
}

/// Resolve `entries` against `root` and collect every source file below them.
///
/// A missing entry is a configuration error. Files reached through more than
/// one entry are listed once, in the order they were first found.
pub fn collect_files(
    root: &Path,
    entries: &[PathBuf],
    excludes: &Excludes,
    walker: &dyn DirectoryWalker,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut seen = HashSet::new();

    for entry in entries {
        let path = root.join(entry);
        let metadata = fs::metadata(&path).map_err(|_| {
            Error::config(format!("entry path does not exist: {}", path.display()))
        })?;

        let mut pending = vec![WalkEntry {
            is_dir: metadata.is_dir(),
            path,
        }];
        while let Some(current) = pending.pop() {
            let relative = current.path.strip_prefix(root).ok();
            if excludes.matches(&current.path, relative) {
                tracing::debug!(path = %current.path.display(), "excluded");
                continue;
            }
            if current.is_dir {
                let mut children = walker.list_entries(&current.path)?;
                // Popped from the back, so reverse to keep name order.
                children.reverse();
                pending.extend(children);
                continue;
            }
            if !is_source_file(&current.path) {
                continue;
            }
            let identity = fs::canonicalize(&current.path).unwrap_or_else(|_| current.path.clone());
            if seen.insert(identity) {
                files.push(current.path);
            }
        }
    }

    Ok(files)
}
