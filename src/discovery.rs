//! Finding agent definition files under a root directory.

use crate::config::DiscoveryConfig;
use crate::error::{CatalogError, Result};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// One discovery result. A walk failure is tied to the entry it happened
/// on, so it can be reported for that path while the walk carries on.
#[derive(Debug)]
pub enum Discovered {
    File(PathBuf),
    Failed { path: PathBuf, error: io::Error },
}

impl Discovered {
    pub fn path(&self) -> &Path {
        match self {
            Discovered::File(path) => path,
            Discovered::Failed { path, .. } => path,
        }
    }
}

/// All candidate files below `root`, sorted by path so that registry
/// construction does not depend on file system iteration order.
///
/// Only a missing root fails the call. Dangling links, link loops and
/// unreadable directories come back as [`Discovered::Failed`].
pub fn discover(root: &Path, config: &DiscoveryConfig) -> Result<Vec<Discovered>> {
    if !root.is_dir() {
        return Err(CatalogError::RootNotFound(root.to_path_buf()));
    }

    let mut found = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(config.follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && is_candidate(entry.path(), config) {
                    found.push(Discovered::File(entry.into_path()));
                }
            }
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                if !(path.is_dir() || is_candidate(&path, config)) {
                    tracing::debug!(path = %path.display(), error = %e, "skipping walk error");
                    continue;
                }
                tracing::debug!(path = %path.display(), error = %e, "walk error");
                found.push(Discovered::Failed {
                    path,
                    error: io::Error::from(e),
                });
            }
        }
    }

    found.sort_by(|a, b| a.path().cmp(b.path()));
    tracing::debug!(root = %root.display(), count = found.len(), "discovered agent files");
    Ok(found)
}

/// Read every discovered file. Each result is kept per path so one
/// unreadable file does not stop the others.
pub fn read_all(found: Vec<Discovered>) -> Vec<(PathBuf, io::Result<String>)> {
    found
        .into_iter()
        .map(|entry| match entry {
            Discovered::File(path) => {
                let contents = std::fs::read_to_string(&path);
                (path, contents)
            }
            Discovered::Failed { path, error } => (path, Err(error)),
        })
        .collect()
}

fn is_candidate(path: &Path, config: &DiscoveryConfig) -> bool {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if config.exclude().contains(&file_name) {
        return false;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| config.extensions().contains(&ext))
        .unwrap_or(false)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
