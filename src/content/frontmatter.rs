//! Front-matter parsing
//!
//! The block format is deliberately flat: `---`, one `key: value` per line,
//! `---`. There is no YAML here; nesting, lists and escapes are not
//! understood and never cause an error.

use indexmap::IndexMap;

/// Front-matter delimiter
const DELIMITER: &str = "---";

/// Flat key/value metadata from the top of a content file
///
/// Duplicate keys keep the last value. Unknown keys are kept as-is so
/// templates can reference them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: IndexMap<String, String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, body)
    ///
    /// Content that does not start with `---`, or has no closing `---`,
    /// is returned unchanged with an empty mapping.
    pub fn parse(content: &str) -> (Self, &str) {
        if !content.starts_with(DELIMITER) {
            return (Self::default(), content);
        }

        let mut parts = content.splitn(3, DELIMITER);
        let (Some(_), Some(block), Some(body)) = (parts.next(), parts.next(), parts.next()) else {
            tracing::debug!("Unclosed front-matter block, treating as body");
            return (Self::default(), content);
        };

        let mut fm = Self::default();
        for line in block.trim().split('\n') {
            if let Some((key, value)) = split_line(line) {
                fm.insert(key, value);
            }
        }

        (fm, body.trim())
    }

    /// Get a field value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Get the first present, non-empty field among `keys`
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|k| self.get(k))
            .find(|v| !v.is_empty())
    }

    /// Set a field, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn date(&self) -> Option<&str> {
        self.get("date")
    }

    pub fn description(&self) -> Option<&str> {
        self.get("description")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Split one front-matter line into (key, value)
///
/// `": "` is tried first so values like `og:image` keep their colon in the
/// key (`og:image: /x.png`). A bare `:` is the fallback.
fn split_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line
        .split_once(": ")
        .or_else(|| line.split_once(':'))?;

    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    Some((key, strip_quotes(value.trim())))
}

/// Strip one pair of matching surrounding quotes
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
