//! List site content

use anyhow::{bail, Result};

use crate::content::ContentRecord;
use crate::generator::load_collection;
use crate::helpers::date::date_iso;
use crate::Folio;

/// Print the records of one section of the site
///
/// `kind` is `blog`, `pages`, a collection name, or `all`.
pub fn run(folio: &Folio, kind: &str) -> Result<()> {
    match kind {
        "blog" | "post" | "posts" => print_records("blog", &load_collection(folio, "blog")?),
        "page" | "pages" => print_pages(folio),
        "all" => {
            print_records("blog", &load_collection(folio, "blog")?);
            print_pages(folio);
            for collection in &folio.config.collections {
                print_records(&collection.name, &load_collection(folio, &collection.name)?);
            }
        }
        name if folio.config.collection(name).is_some() => {
            print_records(name, &load_collection(folio, name)?)
        }
        _ => {
            let names: Vec<&str> = folio
                .config
                .collections
                .iter()
                .map(|c| c.name.as_str())
                .collect();
            bail!(
                "Unknown type: {}. Available: blog, pages, all, {}",
                kind,
                names.join(", ")
            );
        }
    }

    Ok(())
}

fn print_records(name: &str, records: &[ContentRecord]) {
    println!("{} ({}):", name, records.len());
    for record in records {
        println!("  {} - {} [{}]", date_iso(&record.date), record.title, record.url);
    }
}

fn print_pages(folio: &Folio) {
    println!("pages ({}):", folio.config.pages.len());
    for page in &folio.config.pages {
        let source = folio.content_dir.join(&page.file);
        let status = if source.is_file() { "" } else { " (missing)" };
        println!("  {} [/{}]{}", page.heading, page.name, status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_known_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::with_config(dir.path(), SiteConfig::default());
        for kind in ["blog", "pages", "geez", "all"] {
            run(&folio, kind).unwrap();
        }
    }

    #[test]
    fn test_unknown_kind() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::with_config(dir.path(), SiteConfig::default());
        let err = run(&folio, "tags").unwrap_err();
        assert!(err.to_string().contains("wegoch"));
    }
}
