//! Open Graph metadata resolution

use crate::config::SiteConfig;
use crate::content::FrontMatter;
use crate::helpers::absolute_url;
use crate::templates::TemplateContext;

/// Page-level fallbacks, used when front-matter has no override
#[derive(Debug, Clone, Default)]
pub struct OgDefaults<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub image: Option<&'a str>,
    pub og_type: Option<&'a str>,
}

/// Resolved `og:*` values for one page
#[derive(Debug, Clone, PartialEq)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    /// Always absolute
    pub image: String,
    pub og_type: String,
}

impl OpenGraph {
    /// Resolve each field: `og:<field>`, `og_<field>`, page default, site default
    pub fn resolve(meta: &FrontMatter, defaults: &OgDefaults, config: &SiteConfig) -> Self {
        let pick = |field: &str, fallback: Option<&str>, site: &str| -> String {
            let keys = [format!("og:{}", field), format!("og_{}", field)];
            meta.first_of(&[keys[0].as_str(), keys[1].as_str()])
                .or_else(|| fallback.filter(|s| !s.is_empty()))
                .unwrap_or(site)
                .to_string()
        };

        let image = pick("image", defaults.image, &config.og_image);

        Self {
            title: pick("title", defaults.title, &config.title),
            description: pick("description", defaults.description, &config.description),
            image: absolute_url(config, &image),
            og_type: pick("type", defaults.og_type, "website"),
        }
    }

    /// Write the `og_*` keys into a template context
    pub fn apply(&self, context: &mut TemplateContext) {
        context
            .insert("og_title", &self.title)
            .insert("og_description", &self.description)
            .insert("og_image", &self.image)
            .insert("og_type", &self.og_type);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(front: &str) -> FrontMatter {
        let content = format!("---\n{}\n---\n", front);
        FrontMatter::parse(&content).0
    }

    #[test]
    fn test_frontmatter_colon_key_wins() {
        let config = SiteConfig::default();
        let og = OpenGraph::resolve(
            &meta("og:title: Colon\nog_title: Underscore"),
            &OgDefaults {
                title: Some("Page"),
                ..Default::default()
            },
            &config,
        );
        assert_eq!(og.title, "Colon");
    }

    #[test]
    fn test_underscore_key_then_page_default() {
        let config = SiteConfig::default();
        let defaults = OgDefaults {
            title: Some("Page"),
            description: Some("About the page"),
            ..Default::default()
        };

        let og = OpenGraph::resolve(&meta("og_title: Underscore"), &defaults, &config);
        assert_eq!(og.title, "Underscore");
        assert_eq!(og.description, "About the page");

        let og = OpenGraph::resolve(&FrontMatter::default(), &defaults, &config);
        assert_eq!(og.title, "Page");
    }

    #[test]
    fn test_site_defaults_and_absolute_image() {
        let config = SiteConfig::default();
        let og = OpenGraph::resolve(&FrontMatter::default(), &OgDefaults::default(), &config);
        assert_eq!(og.title, "Folio");
        assert_eq!(og.og_type, "website");
        assert_eq!(og.image, "https://example.com/assets/og-image.png");

        let og = OpenGraph::resolve(
            &meta("og:image: https://cdn.example.org/x.png"),
            &OgDefaults::default(),
            &config,
        );
        assert_eq!(og.image, "https://cdn.example.org/x.png");
    }

    #[test]
    fn test_empty_page_default_falls_through() {
        let config = SiteConfig::default();
        let og = OpenGraph::resolve(
            &FrontMatter::default(),
            &OgDefaults {
                description: Some(""),
                ..Default::default()
            },
            &config,
        );
        assert_eq!(og.description, config.description);
    }

    #[test]
    fn test_apply_escapes() {
        let config = SiteConfig::default();
        let og = OpenGraph::resolve(&meta("og:title: A & B"), &OgDefaults::default(), &config);
        let mut context = TemplateContext::new();
        og.apply(&mut context);
        assert_eq!(context.get("og_title"), Some("A &amp; B"));
        assert_eq!(context.get("og_type"), Some("website"));
    }
}
