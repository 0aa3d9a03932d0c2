//! Social preview (OG) images for blog posts
//!
//! For every post without an image, an SVG card is written next to the post
//! and rasterized to PNG with an external tool. Everything here is best
//! effort: problems are logged and the post is skipped.

mod svg;

pub use svg::{render_svg, theme_for, wrap_text, Theme, THEMES};

use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::OgConfig;
use crate::content::{loader, FrontMatter};
use crate::Folio;

/// Outcome of one generator run
#[derive(Debug, Default)]
pub struct OgReport {
    /// SVG files written
    pub generated: Vec<PathBuf>,
    /// PNG files produced from them
    pub rasterized: usize,
    /// Posts that already had an image
    pub skipped: usize,
    /// Posts without a usable title
    pub untitled: usize,
}

/// Image base name for a post: `og-` plus the first four words of the stem
pub fn image_name(stem: &str) -> String {
    let words: Vec<&str> = stem.split('-').take(4).collect();
    format!("og-{}", words.join("-"))
}

/// Card title: front-matter `title`, else the first `# ` heading
pub fn extract_title(content: &str) -> Option<String> {
    let (meta, body) = FrontMatter::parse(content);
    if let Some(title) = meta.first_of(&["title"]) {
        return Some(title.trim().to_string());
    }

    body.lines()
        .filter_map(|line| line.strip_prefix('#'))
        .find(|rest| rest.starts_with(char::is_whitespace))
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
}

/// Whether a post already has an image, under its own name or any `og-*`
/// file mentioning the start of its stem
fn has_image(dir: &Path, stem: &str) -> bool {
    let name = image_name(stem);
    if dir.join(format!("{}.png", name)).exists() || dir.join(format!("{}.svg", name)).exists() {
        return true;
    }

    let prefix: String = stem.chars().take(10).collect();
    let pattern = format!(
        "{}/og-*{}*",
        glob::Pattern::escape(&dir.to_string_lossy()),
        glob::Pattern::escape(&prefix)
    );
    glob::glob(&pattern)
        .map(|mut paths| paths.any(|p| p.is_ok()))
        .unwrap_or(false)
}

/// Footer line: configured text, else `<author> • <host>`
fn footer(folio: &Folio) -> String {
    let config = &folio.config;
    if !config.og.footer.is_empty() {
        return config.og.footer.clone();
    }
    let host = config
        .base_url()
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    format!("{} • {}", config.author, host)
}

/// Convert an SVG card to PNG with the configured rasterizer
fn rasterize(config: &OgConfig, svg: &Path, png: &Path) -> Result<()> {
    let output = Command::new(&config.rasterizer)
        .arg("-w")
        .arg(config.width.to_string())
        .arg("-h")
        .arg(config.height.to_string())
        .arg(svg)
        .arg("-o")
        .arg(png)
        .output();

    match output {
        Ok(out) if out.status.success() => Ok(()),
        Ok(out) => {
            let stderr = String::from_utf8_lossy(&out.stderr);
            Err(anyhow!("{} failed: {}", config.rasterizer, stderr.trim()))
        }
        Err(e) => Err(anyhow!("Failed to run {}: {}", config.rasterizer, e)),
    }
}

/// Generate images for every blog post that has none
pub fn generate_missing(folio: &Folio) -> OgReport {
    let mut report = OgReport::default();
    let dir = &folio.blog_dir;
    if !dir.is_dir() {
        tracing::debug!("Blog directory {:?} not found, no OG images to generate", dir);
        return report;
    }

    let config = &folio.config.og;
    let blog = &folio.config.blog;
    let footer = footer(folio);
    let font = config.font.as_ref().map(|f| folio.path(f));

    for source in loader::list_sources(dir, &blog.extension, &blog.index_file) {
        let Some(stem) = source.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        if has_image(dir, stem) {
            tracing::debug!("OG image exists for {:?}, skipping", source);
            report.skipped += 1;
            continue;
        }

        let title = match fs::read_to_string(&source) {
            Ok(content) => extract_title(&content),
            Err(e) => {
                tracing::warn!("Failed to read {:?}: {}", source, e);
                continue;
            }
        };
        let Some(title) = title else {
            tracing::warn!("No title found in {:?}, skipping OG image", source);
            report.untitled += 1;
            continue;
        };

        let name = image_name(stem);
        let svg_path = dir.join(format!("{}.svg", name));
        let svg = render_svg(&title, theme_for(&title), config, &footer, font.as_deref());
        if let Err(e) = fs::write(&svg_path, svg) {
            tracing::warn!("Failed to write {:?}: {}", svg_path, e);
            continue;
        }
        tracing::info!("Generated {}.svg", name);

        let png_path = dir.join(format!("{}.png", name));
        match rasterize(config, &svg_path, &png_path) {
            Ok(()) => {
                tracing::info!("Generated {}.png", name);
                report.rasterized += 1;
            }
            Err(e) => tracing::warn!("PNG conversion skipped for {}: {}", name, e),
        }

        report.generated.push(svg_path);
    }

    tracing::info!(
        "OG images: {} generated, {} skipped",
        report.generated.len(),
        report.skipped
    );
    report
}
