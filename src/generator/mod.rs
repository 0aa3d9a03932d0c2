//! Generator module - assembles the static site from content and templates
//!
//! A build always starts from an empty output directory, then writes the
//! home page, the blog, the singleton pages, every works collection, the
//! 404 page, the static files and finally `sitemap.xml`.

mod assets;
mod lists;
mod opengraph;
mod pages;
mod sitemap;

pub use assets::copy_static;
pub use lists::{post_list, works_list};
pub use opengraph::{OgDefaults, OpenGraph};
pub use sitemap::{Sitemap, SitemapEntry};

use anyhow::{anyhow, Result};
use std::fs;
use std::path::PathBuf;

use crate::content::{loader, ContentRecord, MarkdownRenderer};
use crate::helpers::{encode_path, full_url_for};
use crate::templates::Templates;
use crate::{Folio, FolioError};

/// Summary of one build
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// HTML pages written
    pub pages: usize,
    /// Blog posts built
    pub posts: usize,
    /// Record count per collection, in configuration order
    pub collections: Vec<(String, usize)>,
    /// URLs listed in sitemap.xml
    pub sitemap_urls: usize,
    /// Static files copied
    pub static_files: usize,
}

/// Static site generator
pub struct Generator {
    folio: Folio,
    templates: Templates,
    markdown: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Self {
        Self {
            folio: folio.clone(),
            templates: Templates::new(&folio.templates_dir),
            markdown: MarkdownRenderer::new(),
        }
    }

    /// Generate the entire site
    pub fn generate(&self) -> Result<BuildReport> {
        let config = &self.folio.config;
        let mut report = BuildReport::default();
        let mut sitemap = Sitemap::new();

        self.prepare_output()?;

        let posts = loader::collect(&self.folio.blog_dir, &pages::blog_defaults(&self.folio))?;
        tracing::info!("Loaded {} blog posts", posts.len());

        self.build_home(&posts)?;
        sitemap.push(self.page_url(""), config.home.priority);

        self.build_blog_index(&posts)?;
        sitemap.push(self.page_url("/blog"), config.blog.index_priority);

        for page in &config.pages {
            self.build_page(page)?;
            sitemap.push(self.page_url(&format!("/{}", page.name)), page.priority);
        }
        report.pages += 2 + config.pages.len();

        let mut built = Vec::new();
        for collection in &config.collections {
            let records = self.build_collection(collection)?;
            report.pages += records.len();
            report
                .collections
                .push((collection.name.clone(), records.len()));

            // An empty collection leaves no trace in the output
            if !records.is_empty() {
                self.build_works_index(collection, &records)?;
                report.pages += 1;
                sitemap.push(self.page_url(&collection.url()), collection.index_priority);
            }
            built.push((collection.page_priority, records));
        }

        self.build_blog_posts(&posts)?;
        report.pages += posts.len();
        report.posts = posts.len();
        for post in &posts {
            sitemap.push(self.page_url(&post.url), config.blog.post_priority);
        }
        for (priority, records) in &built {
            for record in records {
                sitemap.push(self.page_url(&record.url), *priority);
            }
        }

        self.build_not_found()?;
        report.pages += 1;

        report.static_files = copy_static(&self.folio)?;

        sitemap.write(&self.folio.output_dir)?;
        report.sitemap_urls = sitemap.len();

        Ok(report)
    }

    /// Delete and recreate the output directory
    ///
    /// The output directory must not be the base directory or hold any
    /// input directory.
    fn prepare_output(&self) -> Result<()> {
        let out = &self.folio.output_dir;
        let config = &self.folio.config;
        let inputs = [
            self.folio.base_dir.clone(),
            self.folio.content_dir.clone(),
            self.folio.templates_dir.clone(),
            self.folio.blog_dir.clone(),
            self.folio.path(&config.css_dir),
            self.folio.path(&config.assets_dir),
        ];
        if inputs.iter().any(|input| input.starts_with(out)) {
            return Err(FolioError::UnsafeOutput { path: out.clone() }.into());
        }

        if out.exists() {
            fs::remove_dir_all(out).map_err(|e| anyhow!("Failed to clear {:?}: {}", out, e))?;
        }
        fs::create_dir_all(out).map_err(|e| anyhow!("Failed to create {:?}: {}", out, e))?;
        Ok(())
    }

    /// Absolute, percent-encoded URL for a site path
    fn page_url(&self, path: &str) -> String {
        full_url_for(&self.folio.config, &encode_path(path))
    }

    /// Write a page below the output directory
    fn write_page(&self, relative: &str, html: &str) -> Result<PathBuf> {
        let output_path = self.folio.output_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow!("Failed to create directory {:?}: {}", parent, e))?;
        }
        fs::write(&output_path, html)
            .map_err(|e| anyhow!("Failed to write {:?}: {}", output_path, e))?;
        tracing::debug!("Generated {}", relative);
        Ok(output_path)
    }
}

/// Collection records loaded for the `list` command
pub fn load_collection(folio: &Folio, name: &str) -> Result<Vec<ContentRecord>> {
    if name == "blog" {
        return loader::collect(&folio.blog_dir, &pages::blog_defaults(folio));
    }
    let Some(collection) = folio.config.collection(name) else {
        return Err(anyhow!("Unknown collection: {}", name));
    };
    loader::collect(
        &folio.collection_dir(name),
        &pages::collection_defaults(collection, folio.today),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use chrono::NaiveDate;
    use std::path::Path;
    use walkdir::WalkDir;

    const BASE: &str = "<!DOCTYPE html><html><head><title>{{title}}</title>\
<meta name=\"description\" content=\"{{description}}\">\
<meta property=\"og:title\" content=\"{{og_title}}\">\
<meta property=\"og:image\" content=\"{{og_image}}\">\
<link rel=\"canonical\" href=\"{{canonical_url}}\"></head>\
<body>{{content}}</body></html>";

    fn write(base: &Path, relative: &str, content: &str) {
        let path = base.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn fixture() -> (tempfile::TempDir, Folio) {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();

        write(base, "src/templates/base.html", BASE);
        write(
            base,
            "src/templates/blog-post.html",
            "<h1>{{title}}</h1><time datetime=\"{{date}}\">{{date_formatted}}</time>{{content}}<meta content=\"{{og_image}}\">",
        );
        write(
            base,
            "src/templates/work.html",
            "<html lang=\"{{lang}}\"><h1>{{title}}</h1>{{date_formatted}}{{content}}<a href=\"{{back_url}}\">{{back_label}}</a></html>",
        );
        write(
            base,
            "src/templates/works-index.html",
            "<html lang=\"{{lang}}\"><h1>{{title_ethiopic}}</h1>{{subtitle}}{{content}}</html>",
        );
        write(base, "src/templates/geez.html", "<h1>{{title}}</h1>{{geez_text}}{{meaning_section}}");
        write(base, "src/templates/cs.html", "<h1>{{title}}</h1>{{content}}");

        write(base, "src/content/index.md", "---\ntitle: Home\n---\nWelcome *here*.");
        write(base, "src/content/projects.md", "---\ntitle: Projects\n---\n- one");
        write(base, "src/content/resume.md", "Resume body");
        write(base, "src/content/links.md", "Links body");

        write(base, "docs/blog/index.md", "not a post");
        write(
            base,
            "docs/blog/first-post.md",
            "---\ntitle: First <Post>\ndate: 2024-01-01\n---\n# Hi\n\nText",
        );
        write(
            base,
            "docs/blog/second-post.md",
            "---\ntitle: Second\ndate: 2025-06-01\nog:image: /img/second.png\n---\nBody",
        );
        write(base, "docs/blog/undated.md", "Just text");

        write(
            base,
            "src/content/wegoch/selam.md",
            "---\ntitle: ሰላም\ndate: 2025-03-01\n---\nአንድ ወግ",
        );
        write(
            base,
            "src/content/geez/qene.md",
            "---\ntitle: ቅኔ\ntitle_transliterated: Qene\n---\ngeez:\nline one\nline two\nmeaning:\nfirst meaning",
        );

        let folio = Folio {
            today: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            ..Folio::with_config(base, SiteConfig::default())
        };
        (dir, folio)
    }

    fn read(folio: &Folio, relative: &str) -> String {
        fs::read_to_string(folio.output_dir.join(relative)).unwrap()
    }

    #[test]
    fn test_full_build() {
        let (_dir, folio) = fixture();
        let report = Generator::new(&folio).generate().unwrap();

        assert_eq!(report.posts, 3);
        assert_eq!(
            report.collections,
            vec![
                ("wegoch".to_string(), 1),
                ("getem".to_string(), 0),
                ("geez".to_string(), 1),
                ("cs".to_string(), 0),
            ]
        );

        let home = read(&folio, "index.html");
        assert!(home.contains("<title>Home</title>"));
        assert!(home.contains("Welcome <em>here</em>."));
        assert!(home.contains("First &lt;Post&gt;"));

        let post = read(&folio, "blog/first-post/index.html");
        assert!(post.contains("<h1>First &lt;Post&gt;</h1>"));
        assert!(post.contains("<time datetime=\"2024-01-01\">January 01, 2024</time>"));
        assert!(post.contains("https://example.com/assets/og-blog.png"));

        let second = read(&folio, "blog/second-post/index.html");
        assert!(second.contains("https://example.com/img/second.png"));

        // Blog posts without a date use the configured default
        let undated = read(&folio, "blog/undated/index.html");
        assert!(undated.contains("<h1>Undated</h1>"));
        assert!(undated.contains("datetime=\"2025-01-01\""));

        assert!(!folio.output_dir.join("blog/index/index.html").exists());
        assert!(folio.output_dir.join("blog/index.html").is_file());
        assert!(folio.output_dir.join("projects/index.html").is_file());
        assert!(folio.output_dir.join("resume/index.html").is_file());
        assert!(folio.output_dir.join("links/index.html").is_file());
        assert!(folio.output_dir.join("404.html").is_file());

        let work = read(&folio, "wegoch/selam/index.html");
        assert!(work.contains("<html lang=\"am\">"));
        assert!(work.contains("March 1, 2025"));
        assert!(work.contains("<a href=\"/wegoch\">Back to Wegoch</a>"));

        let index = read(&folio, "wegoch/index.html");
        assert!(index.contains("<h1>ወጎች</h1>"));
        assert!(index.contains("1 ወጎች"));

        let qene = read(&folio, "geez/qene/index.html");
        assert!(qene.contains("<span class=\"line\">line one</span>"));
        assert!(qene.contains("<div class=\"geez-meaning\">"));
    }

    #[test]
    fn test_generated_og_image_is_post_default() {
        let (_dir, folio) = fixture();
        write(&folio.blog_dir, "og-first-post.png", "png");
        write(&folio.blog_dir, "og-second-post.png", "png");
        Generator::new(&folio).generate().unwrap();

        let first = read(&folio, "blog/first-post/index.html");
        assert!(first.contains("https://example.com/blog/og-first-post.png"));
        assert!(!first.contains("og-blog.png"));

        // Front matter still wins over a generated image
        let second = read(&folio, "blog/second-post/index.html");
        assert!(second.contains("https://example.com/img/second.png"));
        assert!(!second.contains("og-second-post.png"));

        assert!(folio.output_dir.join("blog/og-first-post.png").is_file());
    }

    #[test]
    fn test_empty_collection_is_omitted() {
        let (_dir, folio) = fixture();
        Generator::new(&folio).generate().unwrap();

        assert!(!folio.output_dir.join("getem").exists());
        assert!(!folio.output_dir.join("cs").exists());

        let sitemap = read(&folio, "sitemap.xml");
        assert!(!sitemap.contains("/getem"));
        assert!(!sitemap.contains("/cs<"));
        assert!(sitemap.contains("<loc>https://example.com/wegoch</loc>"));
    }

    #[test]
    fn test_sitemap_lists_every_page() {
        let (_dir, folio) = fixture();
        let report = Generator::new(&folio).generate().unwrap();
        let sitemap = read(&folio, "sitemap.xml");

        // home, blog, 3 pages, 2 collection indexes, 3 posts, 2 records
        assert_eq!(report.sitemap_urls, 12);
        assert_eq!(sitemap.matches("<url>").count(), 12);
        assert!(sitemap.contains("<loc>https://example.com</loc>\n    <priority>1.0</priority>"));
        assert!(sitemap.contains("<loc>https://example.com/blog/second-post</loc>\n    <priority>0.6</priority>"));
        assert!(sitemap.contains("<loc>https://example.com/geez/qene</loc>\n    <priority>0.8</priority>"));

        // Newest post first
        let second = sitemap.find("second-post").unwrap();
        let first = sitemap.find("first-post").unwrap();
        assert!(second < first);
    }

    #[test]
    fn test_build_is_idempotent() {
        let (_dir, folio) = fixture();
        let snapshot = |folio: &Folio| -> Vec<(PathBuf, Vec<u8>)> {
            WalkDir::new(&folio.output_dir)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_file())
                .map(|e| (e.path().to_path_buf(), fs::read(e.path()).unwrap()))
                .collect()
        };

        Generator::new(&folio).generate().unwrap();
        let first = snapshot(&folio);
        Generator::new(&folio).generate().unwrap();
        let second = snapshot(&folio);

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_stale_output_is_removed() {
        let (_dir, folio) = fixture();
        write(&folio.output_dir, "old/index.html", "stale");
        Generator::new(&folio).generate().unwrap();
        assert!(!folio.output_dir.join("old").exists());
    }

    #[test]
    fn test_missing_template_is_fatal() {
        let (_dir, folio) = fixture();
        fs::remove_file(folio.templates_dir.join("blog-post.html")).unwrap();
        let err = Generator::new(&folio).generate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::FolioError>(),
            Some(crate::FolioError::MissingTemplate { .. })
        ));
    }

    #[test]
    fn test_missing_required_content_is_fatal() {
        let (_dir, folio) = fixture();
        fs::remove_file(folio.content_dir.join("resume.md")).unwrap();
        let err = Generator::new(&folio).generate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::FolioError>(),
            Some(crate::FolioError::MissingContent { .. })
        ));
    }

    #[test]
    fn test_output_holding_inputs_is_refused() {
        for output_dir in [".", "src", "docs"] {
            let (dir, folio) = fixture();
            let mut config = folio.config.clone();
            config.output_dir = output_dir.to_string();
            let folio = Folio {
                today: folio.today,
                ..Folio::with_config(dir.path(), config)
            };

            let err = Generator::new(&folio).generate().unwrap_err();
            assert!(matches!(
                err.downcast_ref::<crate::FolioError>(),
                Some(crate::FolioError::UnsafeOutput { .. })
            ));
            assert!(folio.content_dir.join("index.md").is_file());
            assert!(folio.templates_dir.join("base.html").is_file());
        }
    }

    #[test]
    fn test_load_collection() {
        let (_dir, folio) = fixture();
        assert_eq!(load_collection(&folio, "blog").unwrap().len(), 3);
        assert_eq!(load_collection(&folio, "geez").unwrap().len(), 1);
        assert!(load_collection(&folio, "getem").unwrap().is_empty());
        assert!(load_collection(&folio, "nope").is_err());
    }
}
