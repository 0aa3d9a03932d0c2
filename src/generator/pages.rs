//! Page builders
//!
//! Each builder reads its input, fills a `TemplateContext` and writes one
//! or more `index.html` files through `Generator::write_page`.

use anyhow::Result;
use chrono::NaiveDate;

use super::lists::{post_list, works_list};
use super::opengraph::{OgDefaults, OpenGraph};
use super::Generator;
use crate::config::{CollectionConfig, CollectionLayout, PageConfig};
use crate::content::sections::{Section, Sections};
use crate::content::{loader, CollectionDefaults, ContentRecord, FrontMatter};
use crate::helpers::date::{date_iso, full_date, full_date_unpadded};
use crate::helpers::{escape_html, line_spans};
use crate::og;
use crate::templates::{render, TemplateContext};
use crate::Folio;

/// Collector defaults for blog posts
pub(super) fn blog_defaults(folio: &Folio) -> CollectionDefaults {
    let blog = &folio.config.blog;
    CollectionDefaults::new("blog", folio.today)
        .with_default_date(blog.default_date)
        .with_files(&blog.extension, &blog.index_file)
}

/// Collector defaults for a works collection
pub(super) fn collection_defaults(collection: &CollectionConfig, today: NaiveDate) -> CollectionDefaults {
    CollectionDefaults::new(&collection.name, today)
        .with_default_date(collection.default_date)
        .with_files(&collection.extension, &collection.index_file)
}

impl Generator {
    /// Context keys shared by every page
    ///
    /// Front-matter values come first so the explicit keys below win.
    fn base_context(
        &self,
        meta: &FrontMatter,
        title: &str,
        description: &str,
        keywords: &str,
        og: &OgDefaults,
        path: &str,
    ) -> TemplateContext {
        let config = &self.folio.config;
        let mut context = TemplateContext::from_meta(meta);
        context
            .insert("title", title)
            .insert("description", description)
            .insert("keywords", meta.first_of(&["keywords"]).unwrap_or(keywords))
            .insert("canonical_url", self.page_url(path));
        OpenGraph::resolve(meta, og, config).apply(&mut context);
        context
    }

    pub(super) fn build_home(&self, posts: &[ContentRecord]) -> Result<()> {
        let config = &self.folio.config;
        let (meta, body) = loader::load_required(&self.folio.content_dir.join(&config.home.file))?;

        let latest = &posts[..posts.len().min(config.home.latest_posts)];
        let content = format!(
            r#"
        <section class="intro">
            <h1>{}</h1>
            <p class="subtitle">{}</p>
            {}
        </section>

        <section>
            <h2 class="section-header">Latest Posts</h2>
            {}
        </section>
    "#,
            escape_html(&config.author),
            escape_html(&config.tagline),
            self.markdown.render(&body)?,
            post_list(latest)
        );

        let title = meta.first_of(&["title"]).unwrap_or("Home");
        let description = meta.first_of(&["description"]).unwrap_or(&config.description);
        let og = OgDefaults {
            title: meta.title(),
            description: Some(description),
            image: Some(config.home.og_image.as_str()),
            og_type: None,
        };

        let mut context = self.base_context(&meta, title, description, &config.keywords, &og, "");
        context.insert_html("content", content);

        let html = self.templates.render(&config.home.template, &context)?;
        self.write_page("index.html", &html)?;
        tracing::info!("Generated index.html");
        Ok(())
    }

    pub(super) fn build_blog_index(&self, posts: &[ContentRecord]) -> Result<()> {
        let blog = &self.folio.config.blog;

        let content = format!(
            r#"
        <section>
            <h1 class="section-header">{}</h1>
            {}
        </section>
    "#,
            escape_html(&blog.index_title),
            post_list(posts)
        );

        let og = OgDefaults {
            title: Some(blog.index_og_title.as_str()),
            description: Some(blog.index_og_description.as_str()),
            image: Some(blog.og_image.as_str()),
            og_type: None,
        };
        let mut context = self.base_context(
            &FrontMatter::default(),
            &blog.index_title,
            &blog.index_description,
            &blog.index_keywords,
            &og,
            "/blog",
        );
        context.insert_html("content", content);

        let html = self.templates.render(&blog.index_template, &context)?;
        self.write_page("blog/index.html", &html)?;
        tracing::info!("Generated blog/index.html");
        Ok(())
    }

    pub(super) fn build_blog_posts(&self, posts: &[ContentRecord]) -> Result<()> {
        let blog = &self.folio.config.blog;
        let template = self.templates.get(&blog.template)?;

        for post in posts {
            let og_image = self.generated_og_image(post);
            let og = OgDefaults {
                title: Some(post.title.as_str()),
                description: Some(post.description.as_str()),
                image: Some(og_image.as_deref().unwrap_or(&blog.og_image)),
                og_type: Some("article"),
            };

            let mut context =
                self.base_context(&post.metadata, &post.title, &post.description, "", &og, &post.url);
            context
                .insert("date", date_iso(&post.date))
                .insert("date_formatted", full_date(&post.date))
                .insert_html("content", self.markdown.render(&post.body)?);

            self.write_page(
                &format!("blog/{}/index.html", post.slug),
                &render(&template, &context),
            )?;
        }

        tracing::info!("Generated {} blog posts", posts.len());
        Ok(())
    }

    /// Site path of a generated OG image for `post`, if one exists on disk
    fn generated_og_image(&self, post: &ContentRecord) -> Option<String> {
        let name = og::image_name(&post.slug);
        self.folio
            .blog_dir
            .join(format!("{}.png", name))
            .is_file()
            .then(|| format!("/blog/{}.png", name))
    }

    pub(super) fn build_page(&self, page: &PageConfig) -> Result<()> {
        let config = &self.folio.config;
        let (meta, body) = loader::load_required(&self.folio.content_dir.join(&page.file))?;
        let body_html = self.markdown.render(&body)?;

        let section = if page.section_class.is_empty() {
            "<section>".to_string()
        } else {
            format!("<section class=\"{}\">", escape_html(&page.section_class))
        };
        let inner = if page.content_class.is_empty() {
            body_html
        } else {
            format!(
                "<div class=\"{}\">\n                {}\n            </div>",
                escape_html(&page.content_class),
                body_html
            )
        };
        let content = format!(
            "\n        {}\n            <h1 class=\"section-header\">{}</h1>\n            {}\n        </section>\n    ",
            section,
            escape_html(&page.heading),
            inner
        );

        let title = meta.first_of(&["title"]).unwrap_or(&page.heading);
        let description = meta.first_of(&["description"]).unwrap_or(&config.description);
        let og = OgDefaults {
            title: Some(title),
            description: Some(description),
            image: Some(page.og_image.as_str()),
            og_type: Some(page.og_type.as_str()),
        };

        let path = format!("/{}", page.name);
        let mut context = self.base_context(&meta, title, description, &config.keywords, &og, &path);
        context.insert_html("content", content);

        let html = self.templates.render(&page.template, &context)?;
        self.write_page(&format!("{}/index.html", page.name), &html)?;
        tracing::info!("Generated {}/index.html", page.name);
        Ok(())
    }

    /// Build every record page of a collection
    ///
    /// A missing directory is an empty collection. The template is only
    /// required when there is something to render.
    pub(super) fn build_collection(&self, collection: &CollectionConfig) -> Result<Vec<ContentRecord>> {
        let dir = self.folio.collection_dir(&collection.name);
        let records = loader::collect(&dir, &collection_defaults(collection, self.folio.today))?;
        if records.is_empty() {
            tracing::debug!("Collection {} is empty, skipping", collection.name);
            return Ok(records);
        }

        let template = self.templates.get(&collection.template)?;
        for record in &records {
            let context = self.record_context(collection, record)?;
            self.write_page(
                &format!("{}/{}/index.html", collection.name, record.slug),
                &render(&template, &context),
            )?;
        }

        tracing::info!("Generated {} {} pages", records.len(), collection.name);
        Ok(records)
    }

    fn record_context(&self, collection: &CollectionConfig, record: &ContentRecord) -> Result<TemplateContext> {
        let og = OgDefaults {
            title: Some(record.title.as_str()),
            description: Some(record.description.as_str()),
            image: None,
            og_type: Some(collection.og_type.as_str()),
        };

        let mut context = self.base_context(
            &record.metadata,
            &record.title,
            &record.description,
            &collection.keywords,
            &og,
            &record.url,
        );
        context
            .insert("lang", &collection.lang)
            .insert("date", date_iso(&record.date))
            .insert("date_formatted", full_date_unpadded(&record.date))
            .insert("back_url", collection.url())
            .insert("back_label", collection.back_label.as_deref().unwrap_or_default());

        match collection.layout {
            CollectionLayout::Article => {
                context.insert_html("content", self.markdown.render(&record.body)?);
            }
            CollectionLayout::Sections => {
                let sections = Sections::parse(&record.body);
                let geez_text = line_spans(sections.get(Section::Geez));
                context
                    .insert_html("content", geez_text.clone())
                    .insert_html("geez_text", geez_text)
                    .insert_html("meaning_section", meaning_section(sections.get(Section::Meaning)))
                    .insert_html(
                        "reference_section",
                        reference_section(sections.get(Section::Reference)),
                    )
                    .insert_html(
                        "memorial_section",
                        memorial_section(sections.get(Section::Memorial)),
                    );
            }
        }

        Ok(context)
    }

    pub(super) fn build_works_index(
        &self,
        collection: &CollectionConfig,
        records: &[ContentRecord],
    ) -> Result<()> {
        let og_image = collection.index_og_image();
        let og = OgDefaults {
            title: Some(collection.og_title.as_str()),
            description: Some(collection.og_description.as_str()),
            image: Some(og_image.as_str()),
            og_type: Some("website"),
        };

        let mut context = self.base_context(
            &FrontMatter::default(),
            &collection.title,
            &collection.description,
            &collection.keywords,
            &og,
            &collection.url(),
        );
        context
            .insert("lang", &collection.lang)
            .insert("title_native", &collection.title_native)
            .insert("title_ethiopic", &collection.title_native)
            .insert("subtitle", &collection.subtitle)
            .insert_html(
                "content",
                works_list(
                    records,
                    collection.show_dates,
                    &collection.count_label,
                    &self.folio.today,
                ),
            );

        let html = self.templates.render(&collection.index_template, &context)?;
        self.write_page(&format!("{}/index.html", collection.name), &html)?;
        tracing::info!("Generated {}/index.html", collection.name);
        Ok(())
    }

    pub(super) fn build_not_found(&self) -> Result<()> {
        let not_found = &self.folio.config.not_found;

        let content = r#"
        <section class="error-page">
            <h1>404</h1>
            <p>Page not found</p>
            <a href="/">← Back to home</a>
        </section>
    "#;

        let og = OgDefaults {
            title: Some(not_found.title.as_str()),
            description: Some(not_found.og_description.as_str()),
            image: Some(not_found.og_image.as_str()),
            og_type: None,
        };
        let mut context = self.base_context(
            &FrontMatter::default(),
            &not_found.title,
            &not_found.description,
            "",
            &og,
            "",
        );
        context.insert_html("content", content);

        let html = self.templates.render(&not_found.template, &context)?;
        self.write_page("404.html", &html)?;
        tracing::info!("Generated 404.html");
        Ok(())
    }
}

fn meaning_section(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    format!(
        "<div class=\"geez-separator\"></div>\n<div class=\"geez-meaning\">\n{}</div>",
        line_spans(text)
    )
}

fn reference_section(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    format!("<div class=\"geez-reference\">{}</div>", escape_html(text))
}

fn memorial_section(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    format!(
        "<div class=\"geez-memorial\"><span class=\"memorial-label\">{}</span> {}</div>",
        Section::Memorial.label(),
        escape_html(text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sections_render_nothing() {
        assert_eq!(meaning_section(""), "");
        assert_eq!(reference_section(""), "");
        assert_eq!(memorial_section(""), "");
    }

    #[test]
    fn test_meaning_section() {
        assert_eq!(
            meaning_section("one\ntwo"),
            "<div class=\"geez-separator\"></div>\n<div class=\"geez-meaning\">\n<span class=\"line\">one</span>\n<span class=\"line\">two</span>\n</div>"
        );
    }

    #[test]
    fn test_memorial_section_escapes() {
        assert_eq!(
            memorial_section("A & B"),
            "<div class=\"geez-memorial\"><span class=\"memorial-label\">ማስታወሻ:</span> A &amp; B</div>"
        );
        assert_eq!(
            reference_section("<ref>"),
            "<div class=\"geez-reference\">&lt;ref&gt;</div>"
        );
    }

    #[test]
    fn test_collection_defaults() {
        let collection = CollectionConfig {
            name: "cs".to_string(),
            extension: "markdown".to_string(),
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let defaults = collection_defaults(&collection, today);
        assert_eq!(defaults.name, "cs");
        assert_eq!(defaults.extension, "markdown");
        assert_eq!(defaults.default_date, None);
        assert_eq!(defaults.today, today);
    }
}
