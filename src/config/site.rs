//! Site configuration (folio.yml)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::FolioError;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub url: String,
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub author: String,
    pub tagline: String,
    /// Site-wide fallback for `og:image`
    pub og_image: String,

    // Directory
    pub content_dir: String,
    pub templates_dir: String,
    pub css_dir: String,
    pub assets_dir: String,
    pub output_dir: String,
    pub cname_file: String,
    pub robots_file: String,

    // Content
    pub home: HomeConfig,
    pub blog: BlogConfig,
    pub pages: Vec<PageConfig>,
    pub collections: Vec<CollectionConfig>,
    pub not_found: NotFoundConfig,

    // OG images
    pub og: OgConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: "https://example.com".to_string(),
            title: "Folio".to_string(),
            description: String::new(),
            keywords: String::new(),
            author: "John Doe".to_string(),
            tagline: String::new(),
            og_image: "/assets/og-image.png".to_string(),

            content_dir: "src/content".to_string(),
            templates_dir: "src/templates".to_string(),
            css_dir: "src/css".to_string(),
            assets_dir: "docs/assets".to_string(),
            output_dir: "dist".to_string(),
            cname_file: "CNAME".to_string(),
            robots_file: "docs/robots.txt".to_string(),

            home: HomeConfig::default(),
            blog: BlogConfig::default(),
            pages: PageConfig::defaults(),
            collections: CollectionConfig::defaults(),
            not_found: NotFoundConfig::default(),

            og: OgConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| FolioError::io(path, e))?;
        let config: SiteConfig =
            serde_yaml::from_str(&content).map_err(|source| FolioError::Config {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(config)
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Look up a collection descriptor by name
    pub fn collection(&self, name: &str) -> Option<&CollectionConfig> {
        self.collections.iter().find(|c| c.name == name)
    }
}

/// Home page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    pub file: String,
    pub template: String,
    pub latest_posts: usize,
    pub og_image: String,
    pub priority: f32,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            file: "index.md".to_string(),
            template: "base.html".to_string(),
            latest_posts: 10,
            og_image: "/assets/og-image.png".to_string(),
            priority: 1.0,
        }
    }
}

/// Blog configuration
///
/// Posts live outside the content directory (historically under `docs/blog`)
/// and carry a fixed fallback date instead of the build day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    pub dir: String,
    pub index_file: String,
    pub extension: String,
    pub template: String,
    pub index_template: String,
    pub default_date: Option<NaiveDate>,
    pub og_image: String,
    pub index_title: String,
    pub index_description: String,
    pub index_keywords: String,
    pub index_og_title: String,
    pub index_og_description: String,
    pub index_priority: f32,
    pub post_priority: f32,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            dir: "docs/blog".to_string(),
            index_file: "index.md".to_string(),
            extension: "md".to_string(),
            template: "blog-post.html".to_string(),
            index_template: "base.html".to_string(),
            default_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            og_image: "/assets/og-blog.png".to_string(),
            index_title: "Blog".to_string(),
            index_description:
                "Technical blog about Rust, Python, machine learning, and software engineering."
                    .to_string(),
            index_keywords: "software engineering blog, Rust, Python, machine learning".to_string(),
            index_og_title: "Blog".to_string(),
            index_og_description:
                "Thoughts on software engineering, machine learning, and computing.".to_string(),
            index_priority: 0.9,
            post_priority: 0.6,
        }
    }
}

/// A singleton page rendered from one required content file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub name: String,
    pub file: String,
    pub template: String,
    pub heading: String,
    pub section_class: String,
    pub content_class: String,
    pub og_type: String,
    pub og_image: String,
    pub priority: f32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            file: String::new(),
            template: "base.html".to_string(),
            heading: String::new(),
            section_class: String::new(),
            content_class: String::new(),
            og_type: "website".to_string(),
            og_image: "/assets/og-image.png".to_string(),
            priority: 0.5,
        }
    }
}

impl PageConfig {
    fn defaults() -> Vec<Self> {
        vec![
            Self {
                name: "projects".to_string(),
                file: "projects.md".to_string(),
                heading: "Projects".to_string(),
                content_class: "projects-content".to_string(),
                og_image: "/assets/og-projects.png".to_string(),
                priority: 0.8,
                ..Default::default()
            },
            Self {
                name: "resume".to_string(),
                file: "resume.md".to_string(),
                heading: "Resume".to_string(),
                section_class: "resume".to_string(),
                content_class: "resume-content".to_string(),
                og_type: "profile".to_string(),
                og_image: "/assets/og-resume.png".to_string(),
                priority: 0.7,
                ..Default::default()
            },
            Self {
                name: "links".to_string(),
                file: "links.md".to_string(),
                heading: "Links".to_string(),
                content_class: "links-content".to_string(),
                priority: 0.6,
                ..Default::default()
            },
        ]
    }
}

/// How a collection turns a record body into page fragments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CollectionLayout {
    /// Markdown body rendered into `{{content}}`
    #[default]
    Article,
    /// Body split into labeled sections (`geez:`, `meaning:`, ...)
    Sections,
}

/// Declarative descriptor for a works collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    pub name: String,
    pub template: String,
    pub index_template: String,
    pub layout: CollectionLayout,
    pub extension: String,
    pub index_file: String,
    /// Fallback date; the build day when unset
    pub default_date: Option<NaiveDate>,
    pub show_dates: bool,
    pub count_label: String,
    pub lang: String,
    pub title: String,
    pub title_native: String,
    pub subtitle: String,
    pub description: String,
    pub keywords: String,
    pub og_title: String,
    pub og_description: String,
    pub og_type: String,
    pub og_image: Option<String>,
    pub back_label: Option<String>,
    /// Sub-directory copied verbatim next to the rendered pages
    pub asset_dir: Option<String>,
    pub index_priority: f32,
    pub page_priority: f32,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            template: "work.html".to_string(),
            index_template: "works-index.html".to_string(),
            layout: CollectionLayout::Article,
            extension: "md".to_string(),
            index_file: "index.md".to_string(),
            default_date: None,
            show_dates: false,
            count_label: String::new(),
            lang: "en".to_string(),
            title: String::new(),
            title_native: String::new(),
            subtitle: String::new(),
            description: String::new(),
            keywords: String::new(),
            og_title: String::new(),
            og_description: String::new(),
            og_type: "article".to_string(),
            og_image: None,
            back_label: None,
            asset_dir: None,
            index_priority: 0.7,
            page_priority: 0.6,
        }
    }
}

impl CollectionConfig {
    /// URL path of the collection index (`/wegoch`)
    pub fn url(&self) -> String {
        format!("/{}", self.name)
    }

    /// Index OG image: explicit, else `/assets/og-<name>.png`
    pub fn index_og_image(&self) -> String {
        self.og_image
            .clone()
            .unwrap_or_else(|| format!("/assets/og-{}.png", self.name))
    }

    fn defaults() -> Vec<Self> {
        vec![
            Self {
                name: "wegoch".to_string(),
                show_dates: true,
                count_label: "ወጎች".to_string(),
                lang: "am".to_string(),
                title: "ወጎች - Wegs".to_string(),
                title_native: "ወጎች".to_string(),
                subtitle: "Short stories and reflections in Amharic".to_string(),
                description: "Collection of Ethiopian short stories (ወግ) and reflections written in Amharic.".to_string(),
                keywords: "ወግ, ወጎች, Amharic stories, Ethiopian literature, short stories".to_string(),
                og_title: "ወጎች - Ethiopian Short Stories".to_string(),
                og_description: "Amharic short stories and reflections".to_string(),
                back_label: Some("Back to Wegoch".to_string()),
                asset_dir: Some("misloch".to_string()),
                ..Default::default()
            },
            Self {
                name: "getem".to_string(),
                show_dates: true,
                count_label: "ግጥሞች".to_string(),
                lang: "am".to_string(),
                title: "ግጥሞች - Poems".to_string(),
                title_native: "ግጥሞች".to_string(),
                subtitle: "Poetry in Amharic".to_string(),
                description: "Collection of Ethiopian poems (ግጥም) written in Amharic.".to_string(),
                keywords: "ግጥም, ግጥሞች, Amharic poetry, Ethiopian poetry, poems".to_string(),
                og_title: "ግጥሞች - Ethiopian Poetry".to_string(),
                og_description: "Amharic poems and verses".to_string(),
                back_label: Some("Back to Getem".to_string()),
                asset_dir: Some("misloch".to_string()),
                ..Default::default()
            },
            Self {
                name: "geez".to_string(),
                template: "geez.html".to_string(),
                layout: CollectionLayout::Sections,
                count_label: "ቅኔዎች".to_string(),
                lang: "gez".to_string(),
                title: "ግእዝ - Ge'ez".to_string(),
                title_native: "ግእዝ".to_string(),
                subtitle: "Sacred texts and qine in Ge'ez".to_string(),
                description: "Collection of Ethiopian Orthodox Ge'ez sacred texts, qine (poetry), and liturgical verses with Amharic translations.".to_string(),
                keywords: "ግእዝ, Ge'ez, ቅኔ, qine, Ethiopian Orthodox, sacred texts, liturgy, Ethiopic".to_string(),
                og_title: "ግእዝ - Ethiopian Sacred Texts".to_string(),
                og_description: "Ge'ez qine and sacred verses with translations".to_string(),
                index_priority: 0.8,
                page_priority: 0.8,
                ..Default::default()
            },
            Self {
                name: "cs".to_string(),
                template: "cs.html".to_string(),
                show_dates: true,
                count_label: "articles".to_string(),
                lang: "en".to_string(),
                title: "CS - Computer Science".to_string(),
                title_native: "CS".to_string(),
                subtitle: "Technical articles, reviews, and explorations".to_string(),
                description: "Computer Science articles, software reviews, and technical explorations.".to_string(),
                keywords: "Computer Science, programming, software engineering, technical articles, code review".to_string(),
                og_title: "CS - Computer Science Articles".to_string(),
                og_description: "Technical articles and software explorations".to_string(),
                index_priority: 0.8,
                page_priority: 0.7,
                ..Default::default()
            },
        ]
    }
}

/// 404 page texts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotFoundConfig {
    pub template: String,
    pub title: String,
    pub description: String,
    pub og_description: String,
    pub og_image: String,
}

impl Default for NotFoundConfig {
    fn default() -> Self {
        Self {
            template: "base.html".to_string(),
            title: "404 - Page Not Found".to_string(),
            description: "Page not found".to_string(),
            og_description: "The page you're looking for doesn't exist.".to_string(),
            og_image: "/assets/og-404.png".to_string(),
        }
    }
}

/// OG image generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OgConfig {
    /// Run the generator as the first step of every build
    pub enabled: bool,
    pub width: u32,
    pub height: u32,
    pub label: String,
    /// Footer line; `<author> • <host>` when empty
    pub footer: String,
    /// Font file embedded into the SVG when readable
    pub font: Option<String>,
    pub rasterizer: String,
    pub wrap_chars: usize,
    pub max_lines: usize,
}

impl Default for OgConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 1200,
            height: 630,
            label: "BLOG POST".to_string(),
            footer: String::new(),
            font: None,
            rasterizer: "rsvg-convert".to_string(),
            wrap_chars: 30,
            max_lines: 3,
        }
    }
}
