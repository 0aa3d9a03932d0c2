//! Create a new content file

use anyhow::{bail, Result};
use std::fs;
use std::path::PathBuf;

use crate::helpers::date::date_iso;
use crate::Folio;

/// Create a blog post or collection entry named after `title`
///
/// Refuses to overwrite an existing file.
pub fn run(folio: &Folio, title: &str, collection: &str) -> Result<PathBuf> {
    let (dir, extension) = if collection == "blog" {
        (folio.blog_dir.clone(), folio.config.blog.extension.as_str())
    } else {
        let Some(config) = folio.config.collection(collection) else {
            bail!("Unknown collection: {}", collection);
        };
        (folio.collection_dir(collection), config.extension.as_str())
    };

    let slug = slug::slugify(title);
    if slug.is_empty() {
        bail!("Cannot derive a file name from title {:?}", title);
    }

    let file_path = dir.join(format!("{}.{}", slug, extension));
    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        "---\ntitle: {}\ndate: {}\ndescription: \n---\n\n",
        title,
        date_iso(&folio.today)
    );

    fs::create_dir_all(&dir)?;
    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::FrontMatter;
    use chrono::NaiveDate;

    fn folio(base: &std::path::Path) -> Folio {
        Folio {
            today: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            ..Folio::with_config(base, SiteConfig::default())
        }
    }

    #[test]
    fn test_new_blog_post() {
        let dir = tempfile::tempdir().unwrap();
        let folio = folio(dir.path());

        let path = run(&folio, "Hello, World!", "blog").unwrap();
        assert_eq!(path, folio.blog_dir.join("hello-world.md"));

        let content = fs::read_to_string(&path).unwrap();
        let (fm, body) = FrontMatter::parse(&content);
        assert_eq!(fm.title(), Some("Hello, World!"));
        assert_eq!(fm.date(), Some("2025-07-01"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let folio = folio(dir.path());
        run(&folio, "Twice", "wegoch").unwrap();
        let err = run(&folio, "Twice", "wegoch").unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(folio.collection_dir("wegoch").join("twice.md").is_file());
    }

    #[test]
    fn test_unknown_collection() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(&folio(dir.path()), "x", "nope").is_err());
    }
}
