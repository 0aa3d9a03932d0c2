//! `{{placeholder}}` templates
//!
//! The template language is plain substitution: `{{key}}` is replaced by the
//! context value for `key`, unknown placeholders are removed, and nothing
//! else is interpreted. There are no loops, conditionals, filters or nested
//! expressions, and substituted values are never scanned again.

use anyhow::Result;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::FrontMatter;
use crate::error::FolioError;
use crate::helpers::escape_html;

lazy_static! {
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\{\{([^{}]+)\}\}").expect("placeholder pattern is valid");
}

/// Values for one render call
///
/// `insert` escapes text; `insert_html` is for markup the builder made
/// (rendered markdown, list fragments). Later inserts replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    values: IndexMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from every front-matter field, escaped
    pub fn from_meta(meta: &FrontMatter) -> Self {
        let mut context = Self::new();
        for (key, value) in meta.iter() {
            context.insert(key, value);
        }
        context
    }

    /// Insert plain text (HTML-escaped)
    pub fn insert(&mut self, key: impl Into<String>, value: impl AsRef<str>) -> &mut Self {
        self.values
            .insert(key.into(), escape_html(value.as_ref()));
        self
    }

    /// Insert trusted markup as-is
    pub fn insert_html(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Substitute `{{key}}` placeholders in `template`
///
/// Missing keys and empty values both render as the empty string.
pub fn render(template: &str, context: &TemplateContext) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            context.get(&caps[1]).unwrap_or_default().to_string()
        })
        .into_owned()
}

/// Template files loaded by name from the templates directory
pub struct Templates {
    dir: PathBuf,
}

impl Templates {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Read a template; a missing template is fatal
    pub fn get(&self, name: &str) -> Result<String> {
        let path = self.dir.join(name);
        if !path.is_file() {
            return Err(FolioError::MissingTemplate {
                name: name.to_string(),
                path,
            }
            .into());
        }
        Ok(fs::read_to_string(&path).map_err(|e| FolioError::io(&path, e))?)
    }

    /// Read a template and render it in one step
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        Ok(render(&self.get(name)?, context))
    }
}
