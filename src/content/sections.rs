//! Labeled body sections
//!
//! Some collections write their body as labeled blocks instead of prose:
//!
//! ```text
//! geez: first line of the verse
//! second line
//! meaning:
//! the translation
//! reference: Psalm 23
//! ማስታወሻ: a memorial note
//! ```
//!
//! Parsing is a line-oriented state machine over trimmed lines. A label
//! switches the current section (text after the label on the same line
//! starts it); other non-empty lines append to the current section. Lines
//! before the first label belong to no section and are dropped.

/// A recognized section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Geez,
    Meaning,
    Reference,
    Memorial,
}

impl Section {
    const ALL: [Section; 4] = [
        Section::Geez,
        Section::Meaning,
        Section::Reference,
        Section::Memorial,
    ];

    /// Line prefix that opens this section
    pub fn label(self) -> &'static str {
        match self {
            Section::Geez => "geez:",
            Section::Meaning => "meaning:",
            Section::Reference => "reference:",
            Section::Memorial => "ማስታወሻ:",
        }
    }

    /// Match a trimmed line against the labels; returns the rest of the line
    fn open(line: &str) -> Option<(Section, &str)> {
        Section::ALL
            .iter()
            .find_map(|s| line.strip_prefix(s.label()).map(|rest| (*s, rest.trim())))
    }
}

/// Parsed sections; each holds `\n`-joined trimmed lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    pub geez: String,
    pub meaning: String,
    pub reference: String,
    pub memorial: String,
}

impl Sections {
    /// Split a body into sections
    pub fn parse(body: &str) -> Self {
        let mut sections = Self::default();
        let mut current: Option<Section> = None;

        for line in body.split('\n') {
            let line = line.trim();

            if let Some((section, rest)) = Section::open(line) {
                current = Some(section);
                if !rest.is_empty() {
                    // A label restarts its section
                    *sections.get_mut(section) = rest.to_string();
                }
                continue;
            }

            if line.is_empty() {
                continue;
            }

            if let Some(section) = current {
                let text = sections.get_mut(section);
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(line);
            }
        }

        sections
    }

    pub fn get(&self, section: Section) -> &str {
        match section {
            Section::Geez => &self.geez,
            Section::Meaning => &self.meaning,
            Section::Reference => &self.reference,
            Section::Memorial => &self.memorial,
        }
    }

    fn get_mut(&mut self, section: Section) -> &mut String {
        match section {
            Section::Geez => &mut self.geez,
            Section::Meaning => &mut self.meaning,
            Section::Reference => &mut self.reference,
            Section::Memorial => &mut self.memorial,
        }
    }
}
