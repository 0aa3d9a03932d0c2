//! HTML and XML helper functions

use chrono::NaiveDate;

use super::date;

/// Escape text for HTML element content and attribute values
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape XML special characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// One `<span class="line">` per non-empty line
pub fn line_spans(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| format!("<span class=\"line\">{}</span>\n", escape_html(l)))
        .collect()
}

/// Generate a <time> element showing a humanized date with the full date as tooltip
pub fn time_tag(date: &NaiveDate, today: &NaiveDate) -> String {
    format!(
        r#"<time datetime="{}" title="{}">{}</time>"#,
        date::date_iso(date),
        date::full_date(date),
        date::humanize_date(date, today)
    )
}

/// Generate an anchor tag
pub fn link_to(href: &str, text: &str) -> String {
    format!(r#"<a href="{}">{}</a>"#, escape_html(href), escape_html(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("ሰላም"), "ሰላም");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a&b<'c'>"), "a&amp;b&lt;&apos;c&apos;&gt;");
    }

    #[test]
    fn test_line_spans() {
        assert_eq!(
            line_spans("  one \n\n two"),
            "<span class=\"line\">one</span>\n<span class=\"line\">two</span>\n"
        );
        assert_eq!(line_spans(""), "");
    }

    #[test]
    fn test_time_tag() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert_eq!(
            time_tag(&date, &today),
            r#"<time datetime="2025-06-01" title="June 01, 2025">yesterday</time>"#
        );
    }

    #[test]
    fn test_link_to() {
        assert_eq!(
            link_to("/blog/a", "A & B"),
            r#"<a href="/blog/a">A &amp; B</a>"#
        );
    }
}
