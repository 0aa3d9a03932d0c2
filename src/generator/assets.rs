//! Static file copying

use anyhow::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::Folio;

/// Copy every static input into the output directory
///
/// Missing sources are skipped. Returns the number of files copied.
pub fn copy_static(folio: &Folio) -> Result<usize> {
    let config = &folio.config;
    let out = &folio.output_dir;
    let mut copied = 0;

    copied += copy_matching(&folio.path(&config.css_dir), &out.join("css"), |name| {
        name.ends_with(".css")
    })?;
    copied += copy_tree(&folio.path(&config.assets_dir), &out.join("assets"))?;

    for file in [&config.cname_file, &config.robots_file] {
        let source = folio.path(file);
        if let Some(name) = source.file_name() {
            if source.is_file() {
                fs::copy(&source, out.join(name))?;
                copied += 1;
            }
        }
    }

    // Generated social images sit next to the posts
    copied += copy_matching(&folio.blog_dir, &out.join("blog"), |name| {
        name.starts_with("og-") && (name.ends_with(".png") || name.ends_with(".svg"))
    })?;

    for collection in &config.collections {
        if let Some(asset_dir) = &collection.asset_dir {
            copied += copy_matching(
                &folio.collection_dir(&collection.name).join(asset_dir),
                &out.join(&collection.name).join(asset_dir),
                |_| true,
            )?;
        }
    }

    tracing::debug!("Copied {} static files", copied);
    Ok(copied)
}

/// Copy a directory tree, keeping relative paths
fn copy_tree(source_dir: &Path, dest_dir: &Path) -> Result<usize> {
    if !source_dir.is_dir() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(source_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(source_dir)?;
        let dest = dest_dir.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &dest)?;
        copied += 1;
    }

    Ok(copied)
}

/// Copy the top-level files of `source_dir` whose name passes `keep`
fn copy_matching(source_dir: &Path, dest_dir: &Path, keep: impl Fn(&str) -> bool) -> Result<usize> {
    if !source_dir.is_dir() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !path.is_file() || !keep(name) {
            continue;
        }

        fs::create_dir_all(dest_dir)?;
        fs::copy(path, dest_dir.join(name))?;
        copied += 1;
    }

    Ok(copied)
}
