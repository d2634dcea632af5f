//! Counting pattern matches across files

use crate::error::{EditorError, PatternError, Result};
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMatches {
    pub path: PathBuf,
    pub count: usize,
}

/// Count matches of `pattern` in every file under `paths`
///
/// Directories are walked recursively in sorted order, each at most once
/// so symlink loops end. Files that cannot be read as UTF-8 text and
/// directories that cannot be listed below the named paths are skipped.
/// Files without matches are included with a count of zero.
pub fn scan_paths<P: AsRef<Path>>(pattern: &str, paths: &[P]) -> Result<Vec<FileMatches>> {
    if pattern.is_empty() {
        return Err(PatternError::Invalid("empty pattern".to_string()).into());
    }
    let regex = Regex::new(pattern).map_err(PatternError::from)?;

    let mut walker = Walker::default();
    for path in paths {
        let path = path.as_ref();
        let metadata = fs::metadata(path)
            .map_err(|err| EditorError::Io(format!("{}: {}", path.display(), err)))?;
        walker.visit(path, metadata.is_dir());
    }

    let mut results = Vec::with_capacity(walker.files.len());
    for path in walker.files {
        match fs::read_to_string(&path) {
            Ok(contents) => {
                let count = regex.find_iter(&contents).count();
                results.push(FileMatches { path, count });
            }
            Err(err) => tracing::debug!("skipping {}: {}", path.display(), err),
        }
    }
    Ok(results)
}

#[derive(Default)]
struct Walker {
    files: Vec<PathBuf>,
    seen_dirs: HashSet<PathBuf>,
}

impl Walker {
    fn visit(&mut self, path: &Path, is_dir: bool) {
        if !is_dir {
            self.files.push(path.to_path_buf());
            return;
        }

        let canonical = match fs::canonicalize(path) {
            Ok(canonical) => canonical,
            Err(err) => {
                tracing::debug!("skipping {}: {}", path.display(), err);
                return;
            }
        };
        if !self.seen_dirs.insert(canonical) {
            tracing::debug!("skipping {}: already visited", path.display());
            return;
        }

        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!("skipping {}: {}", path.display(), err);
                return;
            }
        };
        let mut entries = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect::<Vec<_>>();
        entries.sort();

        for entry in entries {
            match fs::metadata(&entry) {
                Ok(metadata) => self.visit(&entry, metadata.is_dir()),
                Err(err) => tracing::debug!("skipping {}: {}", entry.display(), err),
            }
        }
    }
}
