//! SVG card rendering

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::Path;

use crate::config::OgConfig;
use crate::helpers::escape_xml;

const LINE_HEIGHT: u32 = 60;
const DEFAULT_FONT_FAMILY: &str = "Arial, sans-serif";
const EMBEDDED_FONT_NAME: &str = "OgTitle";

/// Card colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Diagonal gradient stops at 0%, 50% and 100%
    pub gradient: [&'static str; 3],
    pub accent: &'static str,
    pub text: &'static str,
    pub subtitle: &'static str,
    pub footer: &'static str,
}

pub static THEMES: [Theme; 5] = [
    Theme {
        gradient: ["#1a1a2e", "#16213e", "#0f3460"],
        accent: "#e94560",
        text: "#ffffff",
        subtitle: "#a5b4fc",
        footer: "#94a3b8",
    },
    Theme {
        gradient: ["#0d1b2a", "#1b263b", "#415a77"],
        accent: "#00b4d8",
        text: "#ffffff",
        subtitle: "#90e0ef",
        footer: "#caf0f8",
    },
    Theme {
        gradient: ["#2d1b69", "#11998e", "#38ef7d"],
        accent: "#f7dc6f",
        text: "#ffffff",
        subtitle: "#d5f5e3",
        footer: "#abebc6",
    },
    Theme {
        gradient: ["#1f1c2c", "#928dab", "#1f1c2c"],
        accent: "#ff6b6b",
        text: "#ffffff",
        subtitle: "#ffeaa7",
        footer: "#dfe6e9",
    },
    Theme {
        gradient: ["#0f0c29", "#302b63", "#24243e"],
        accent: "#f093fb",
        text: "#ffffff",
        subtitle: "#c471ed",
        footer: "#a29bfe",
    },
];

/// Pick a theme from a stable hash of the title
pub fn theme_for(title: &str) -> &'static Theme {
    let mut hasher = DefaultHasher::new();
    title.hash(&mut hasher);
    &THEMES[(hasher.finish() % THEMES.len() as u64) as usize]
}

/// Greedy word wrap
///
/// Words are never split; a word longer than `max_chars` gets a line of its
/// own. Lines past `max_lines` are dropped.
pub fn wrap_text(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let len = word.chars().count();
        if current_len + len + 1 <= max_chars {
            current.push(word);
            current_len += len + 1;
        } else {
            if !current.is_empty() {
                lines.push(current.join(" "));
            }
            current = vec![word];
            current_len = len;
        }
    }
    if !current.is_empty() {
        lines.push(current.join(" "));
    }

    lines.truncate(max_lines);
    lines
}

/// `@font-face` rule for an embedded font, if the file is readable
fn font_face(path: &Path) -> Option<String> {
    let (mime, format) = match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
        "ttf" => ("font/ttf", "truetype"),
        "otf" => ("font/otf", "opentype"),
        "woff" => ("font/woff", "woff"),
        "woff2" => ("font/woff2", "woff2"),
        other => {
            tracing::warn!("Unsupported font type {:?}: {:?}", other, path);
            return None;
        }
    };

    match fs::read(path) {
        Ok(bytes) => Some(format!(
            "    <style>\n      @font-face {{ font-family: '{}'; src: url('data:{};base64,{}') format('{}'); }}\n    </style>\n",
            EMBEDDED_FONT_NAME,
            mime,
            STANDARD.encode(bytes),
            format
        )),
        Err(e) => {
            tracing::warn!("Cannot read font {:?}: {}", path, e);
            None
        }
    }
}

/// Render the card for `title`
///
/// `footer` is the already-resolved footer line. `font` is an optional font
/// file to embed.
pub fn render_svg(title: &str, theme: &Theme, config: &OgConfig, footer: &str, font: Option<&Path>) -> String {
    let (width, height) = (config.width, config.height);
    let lines = wrap_text(title, config.wrap_chars, config.max_lines);

    let style = font.and_then(font_face);
    let family = if style.is_some() {
        format!("'{}', {}", EMBEDDED_FONT_NAME, DEFAULT_FONT_FAMILY)
    } else {
        DEFAULT_FONT_FAMILY.to_string()
    };

    let stops: String = theme
        .gradient
        .iter()
        .zip([0, 50, 100])
        .map(|(color, pct)| {
            format!(
                "      <stop offset=\"{}%\" style=\"stop-color:{};stop-opacity:1\" />\n",
                pct, color
            )
        })
        .collect();

    let total_height = lines.len() as u32 * LINE_HEIGHT;
    let start_y = (height / 2) as i64 - (total_height / 2) as i64 + 20;
    let title_lines: String = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            format!(
                "  <text x=\"{}\" y=\"{}\" fill=\"{}\" font-family=\"{}\" font-size=\"48\" font-weight=\"bold\" text-anchor=\"middle\">{}</text>\n",
                width / 2,
                start_y + (i as i64) * LINE_HEIGHT as i64,
                theme.text,
                family,
                escape_xml(line)
            )
        })
        .collect();

    format!(
        r##"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">
  <defs>
{style}    <linearGradient id="bgGrad" x1="0%" y1="0%" x2="100%" y2="100%">
{stops}    </linearGradient>
  </defs>

  <rect width="{w}" height="{h}" fill="url(#bgGrad)"/>

  <circle cx="100" cy="100" r="150" fill="{accent}" fill-opacity="0.1"/>
  <circle cx="{cx2}" cy="{cy2}" r="200" fill="{accent}" fill-opacity="0.08"/>

  <rect x="100" y="80" width="80" height="6" rx="3" fill="{accent}"/>

  <text x="100" y="130" fill="{subtitle}" font-family="{family}" font-size="22" font-weight="500">{label}</text>

{title_lines}
  <line x1="100" y1="{rule_y}" x2="{rule_x2}" y2="{rule_y}" stroke="{footer_color}" stroke-opacity="0.3" stroke-width="1"/>
  <text x="{cx}" y="{footer_y}" fill="{footer_color}" font-family="{family}" font-size="20" text-anchor="middle">{footer}</text>
</svg>
"##,
        w = width,
        h = height,
        style = style.unwrap_or_default(),
        stops = stops,
        accent = theme.accent,
        cx2 = width.saturating_sub(100),
        cy2 = height.saturating_sub(100),
        subtitle = theme.subtitle,
        family = family,
        label = escape_xml(&config.label),
        title_lines = title_lines,
        rule_y = height.saturating_sub(90),
        rule_x2 = width.saturating_sub(100),
        footer_color = theme.footer,
        cx = width / 2,
        footer_y = height.saturating_sub(50),
        footer = escape_xml(footer),
    )
}
