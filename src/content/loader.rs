//! Content loader - collects records from content directories

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use super::{CollectionDefaults, ContentRecord, FrontMatter};
use crate::error::FolioError;

/// Collect every eligible file in `dir` into date-sorted records
///
/// The glob is non-recursive over `*.<extension>` and skips the collection's
/// index file. A missing directory is an empty collection. Files that cannot
/// be read are logged and skipped.
///
/// Records are sorted newest first; equal dates keep glob (path) order.
pub fn collect(dir: &Path, defaults: &CollectionDefaults) -> Result<Vec<ContentRecord>> {
    if !dir.is_dir() {
        tracing::debug!("Collection directory {:?} not found, treating as empty", dir);
        return Ok(Vec::new());
    }

    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        defaults.extension
    );

    let mut records = Vec::new();

    for path in glob::glob(&pattern)?.filter_map(|e| e.ok()) {
        if !path.is_file() || is_index_file(&path, &defaults.index_file) {
            continue;
        }

        match load_record(&path, defaults) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!("Failed to load {:?}: {}", path, e);
            }
        }
    }

    // Stable sort: ties keep encounter order
    records.sort_by(|a, b| b.date.cmp(&a.date));

    tracing::debug!("Collected {} records from {:?}", records.len(), dir);
    Ok(records)
}

/// Load a single record from a file
pub fn load_record(path: &Path, defaults: &CollectionDefaults) -> Result<ContentRecord> {
    let content = fs::read_to_string(path).map_err(|e| FolioError::io(path, e))?;
    let (fm, body) = FrontMatter::parse(&content);
    Ok(ContentRecord::from_parts(path, fm, body, defaults))
}

/// A required standalone content file: (front_matter, body)
///
/// Missing files are fatal; the page cannot be built without them.
pub fn load_required(path: &Path) -> Result<(FrontMatter, String)> {
    if !path.is_file() {
        return Err(FolioError::MissingContent {
            path: path.to_path_buf(),
        }
        .into());
    }

    let content = fs::read_to_string(path).map_err(|e| FolioError::io(path, e))?;
    let (fm, body) = FrontMatter::parse(&content);
    Ok((fm, body.to_string()))
}

/// Paths a collection would collect, without parsing them
pub fn list_sources(dir: &Path, extension: &str, index_file: &str) -> Vec<PathBuf> {
    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        extension
    );

    match glob::glob(&pattern) {
        Ok(paths) => paths
            .filter_map(|e| e.ok())
            .filter(|p| p.is_file() && !is_index_file(p, index_file))
            .collect(),
        Err(e) => {
            tracing::warn!("Invalid glob pattern {:?}: {}", pattern, e);
            Vec::new()
        }
    }
}

fn is_index_file(path: &Path, index_file: &str) -> bool {
    path.file_name().and_then(|n| n.to_str()) == Some(index_file)
}
