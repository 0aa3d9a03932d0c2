//! folio: a small static site generator for a personal site
//!
//! Markdown files with a flat front-matter block are turned into pages by
//! substituting `{{placeholders}}` in plain HTML templates. The site has a
//! blog, a few singleton pages (projects, resume, links), any number of
//! declarative "works" collections, a sitemap, a 404 page and generated
//! social-preview images.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod og;
pub mod server;
pub mod templates;

use anyhow::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub use error::FolioError;

/// Config file looked up in the base directory
pub const CONFIG_FILE: &str = "folio.yml";

/// The main folio application
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory (singleton pages and collections)
    pub content_dir: PathBuf,
    /// HTML templates directory
    pub templates_dir: PathBuf,
    /// Blog posts directory
    pub blog_dir: PathBuf,
    /// Output directory
    pub output_dir: PathBuf,
    /// Build day: fallback for missing or bad dates and the reference for
    /// relative dates. Fixed per instance so repeated builds match.
    pub today: NaiveDate,
}

impl Folio {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance from an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();

        Self {
            content_dir: base_dir.join(&config.content_dir),
            templates_dir: base_dir.join(&config.templates_dir),
            blog_dir: base_dir.join(&config.blog.dir),
            output_dir: base_dir.join(&config.output_dir),
            today: chrono::Local::now().date_naive(),
            config,
            base_dir,
        }
    }

    /// Fresh instance for the same base directory
    ///
    /// Re-reads `folio.yml` and moves the build day to the current date.
    pub fn reload(&self) -> Result<Self> {
        Self::new(&self.base_dir)
    }

    /// Resolve a config path against the base directory
    pub fn path(&self, relative: &str) -> PathBuf {
        self.base_dir.join(relative)
    }

    /// Directory of a works collection
    pub fn collection_dir(&self, name: &str) -> PathBuf {
        self.content_dir.join(name)
    }

    /// Build the static site
    pub fn build(&self) -> Result<generator::BuildReport> {
        commands::build::run(self)
    }

    /// Delete the output directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Generate missing OG images for blog posts
    pub fn og_images(&self) -> og::OgReport {
        og::generate_missing(self)
    }
}
