//! Content record model

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use super::FrontMatter;
use crate::helpers::{self, date};

/// One piece of content, resolved from a single source file
#[derive(Debug, Clone)]
pub struct ContentRecord {
    /// Front-matter title, or the title-cased slug
    pub title: String,

    /// Front-matter description (may be empty)
    pub description: String,

    /// Resolved date (never missing, see `CollectionDefaults`)
    pub date: NaiveDate,

    /// Filename stem
    pub slug: String,

    /// Site-relative URL (`/blog/<slug>`)
    pub url: String,

    /// Raw markdown body
    pub body: String,

    /// All front-matter fields, including unknown ones
    pub metadata: FrontMatter,

    /// Source file path
    pub source: PathBuf,
}

/// Per-collection defaults applied while resolving records
#[derive(Debug, Clone)]
pub struct CollectionDefaults {
    /// Collection name, used as the URL segment
    pub name: String,
    /// File extension to collect, without the dot
    pub extension: String,
    /// File name excluded from the collection
    pub index_file: String,
    /// Date used when front-matter has none; `today` when unset
    pub default_date: Option<NaiveDate>,
    /// Build day, used for unset and unparsable dates
    pub today: NaiveDate,
}

impl CollectionDefaults {
    pub fn new(name: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            name: name.into(),
            extension: "md".to_string(),
            index_file: "index.md".to_string(),
            default_date: None,
            today,
        }
    }

    pub fn with_default_date(mut self, date: Option<NaiveDate>) -> Self {
        self.default_date = date;
        self
    }

    pub fn with_files(mut self, extension: &str, index_file: &str) -> Self {
        self.extension = extension.to_string();
        self.index_file = index_file.to_string();
        self
    }

    /// Resolve the record date
    ///
    /// Missing → collection default (or today); unparsable → today.
    pub fn resolve_date(&self, raw: Option<&str>, source: &Path) -> NaiveDate {
        match raw.filter(|s| !s.trim().is_empty()) {
            None => self.default_date.unwrap_or(self.today),
            Some(raw) => date::parse_date(raw).unwrap_or_else(|| {
                tracing::warn!(
                    "Unparsable date {:?} in {:?}, using {}",
                    raw,
                    source,
                    self.today
                );
                self.today
            }),
        }
    }
}

impl ContentRecord {
    /// Build a record from parsed front-matter and body
    pub fn from_parts(
        source: &Path,
        metadata: FrontMatter,
        body: &str,
        defaults: &CollectionDefaults,
    ) -> Self {
        let slug = source
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("untitled")
            .to_string();

        let title = metadata
            .title()
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| title_from_slug(&slug));

        let description = metadata.description().unwrap_or_default().to_string();
        let date = defaults.resolve_date(metadata.date(), source);
        let url = helpers::entry_path(&defaults.name, &slug);

        Self {
            title,
            description,
            date,
            slug,
            url,
            body: body.to_string(),
            metadata,
            source: source.to_path_buf(),
        }
    }

    /// Year label for list grouping
    pub fn year(&self) -> String {
        date::year(&self.date)
    }

    /// Front-matter field, empty when absent
    pub fn meta(&self, key: &str) -> &str {
        self.metadata.get(key).unwrap_or_default()
    }
}

/// Title-case a slug: `-`/`_` become spaces, each word capitalized
pub fn title_from_slug(slug: &str) -> String {
    slug.replace(['-', '_'], " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
