//! List fragments for index pages

use chrono::NaiveDate;

use crate::content::ContentRecord;
use crate::helpers::{escape_html, link_to, time_tag};

/// Year-grouped post list
///
/// The year label is printed on the first record of each run of equal years
/// and left empty on the rest, so the column lines up.
pub fn post_list(records: &[ContentRecord]) -> String {
    let mut html = String::from("<ul class=\"post-list\">\n");
    let mut current_year: Option<String> = None;

    for record in records {
        let year = record.year();
        let label = if current_year.as_deref() == Some(year.as_str()) {
            String::new()
        } else {
            current_year = Some(year.clone());
            year
        };

        html.push_str(&format!(
            "    <li>\n        <span class=\"year\">{}</span>\n        <span class=\"title\">{}</span>\n    </li>\n",
            label,
            link_to(&record.url, &record.title)
        ));
    }

    html.push_str("</ul>");
    html
}

/// Works list with an item count footer
pub fn works_list(
    records: &[ContentRecord],
    show_dates: bool,
    count_label: &str,
    today: &NaiveDate,
) -> String {
    let mut html = String::from("<ul class=\"works-list\">\n");

    for record in records {
        let transliterated = match record.meta("title_transliterated") {
            "" => String::new(),
            t => format!(
                "<span class=\"work-transliterated\">{}</span>",
                escape_html(t)
            ),
        };

        let date = if show_dates {
            format!(
                "\n      <span class=\"work-date\">\n        {}\n      </span>",
                time_tag(&record.date, today)
            )
        } else {
            String::new()
        };

        html.push_str(&format!(
            "  <li>\n    <a href=\"{}\">\n      <span class=\"work-title\">{}</span>\n      {}{}\n    </a>\n  </li>\n",
            escape_html(&record.url),
            escape_html(&record.title),
            transliterated,
            date
        ));
    }

    html.push_str("</ul>\n");
    html.push_str(&format!(
        "<p class=\"works-count\">{} {}</p>",
        records.len(),
        escape_html(count_label)
    ));
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{CollectionDefaults, FrontMatter};
    use std::path::Path;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
    }

    fn record(slug: &str, front: &str) -> ContentRecord {
        let defaults = CollectionDefaults::new("blog", today());
        let content = format!("---\n{}\n---\nbody", front);
        let (fm, body) = FrontMatter::parse(&content);
        ContentRecord::from_parts(Path::new(&format!("{}.md", slug)), fm, body, &defaults)
    }

    fn year_labels(html: &str) -> Vec<&str> {
        html.split("<span class=\"year\">")
            .skip(1)
            .map(|s| s.split("</span>").next().unwrap())
            .collect()
    }

    #[test]
    fn test_same_year_label_once() {
        let records = vec![
            record("a", "date: 2025-06-01"),
            record("b", "date: 2025-01-01"),
        ];
        assert_eq!(year_labels(&post_list(&records)), vec!["2025", ""]);
    }

    #[test]
    fn test_year_boundary_labels_both() {
        let records = vec![
            record("a", "date: 2025-06-01"),
            record("b", "date: 2024-01-01"),
        ];
        assert_eq!(year_labels(&post_list(&records)), vec!["2025", "2024"]);
    }

    #[test]
    fn test_post_list_escapes_titles() {
        let records = vec![record("x", "title: <b>bold</b>\ndate: 2025-01-01")];
        let html = post_list(&records);
        assert!(html.contains("<a href=\"/blog/x\">&lt;b&gt;bold&lt;/b&gt;</a>"));
        assert!(html.starts_with("<ul class=\"post-list\">"));
        assert!(html.ends_with("</ul>"));
    }

    #[test]
    fn test_empty_post_list() {
        assert_eq!(post_list(&[]), "<ul class=\"post-list\">\n</ul>");
    }

    #[test]
    fn test_works_list_with_dates_and_transliteration() {
        let records = vec![
            record("selam", "title: ሰላም\ntitle_transliterated: Selam\ndate: 2025-06-30"),
            record("other", "date: 2025-06-01"),
        ];
        let html = works_list(&records, true, "ወጎች", &today());
        assert!(html.contains("<span class=\"work-title\">ሰላም</span>"));
        assert!(html.contains("<span class=\"work-transliterated\">Selam</span>"));
        assert!(html.contains(
            "<time datetime=\"2025-06-30\" title=\"June 30, 2025\">yesterday</time>"
        ));
        assert!(html.ends_with("<p class=\"works-count\">2 ወጎች</p>"));
    }

    #[test]
    fn test_works_list_without_dates() {
        let records = vec![record("a", "date: 2025-06-01")];
        let html = works_list(&records, false, "ቅኔዎች", &today());
        assert!(!html.contains("<time"));
        assert!(!html.contains("work-transliterated"));
        assert!(html.contains("1 ቅኔዎች"));
    }
}
