//! sitemap.xml

use anyhow::{anyhow, Result};
use std::fs;
use std::path::Path;

use crate::helpers::escape_xml;

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    /// Absolute, percent-encoded URL
    pub loc: String,
    pub priority: f32,
}

/// Sitemap entries in insertion order
#[derive(Debug, Default)]
pub struct Sitemap {
    entries: Vec<SitemapEntry>,
}

impl Sitemap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, loc: impl Into<String>, priority: f32) {
        self.entries.push(SitemapEntry {
            loc: loc.into(),
            priority,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn render(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
        );

        for entry in &self.entries {
            xml.push_str(&format!(
                "  <url>\n    <loc>{}</loc>\n    <priority>{}</priority>\n  </url>\n",
                escape_xml(&entry.loc),
                format_priority(entry.priority)
            ));
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write `sitemap.xml` into `dir`
    pub fn write(&self, dir: &Path) -> Result<()> {
        let output_path = dir.join("sitemap.xml");
        fs::write(&output_path, self.render())
            .map_err(|e| anyhow!("Failed to write {:?}: {}", output_path, e))?;
        tracing::info!("Generated sitemap.xml with {} URLs", self.len());
        Ok(())
    }
}

/// Priority as configured, with at least one decimal (`1.0`, `0.85`)
fn format_priority(priority: f32) -> String {
    let text = priority.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{:.1}", priority)
    }
}
