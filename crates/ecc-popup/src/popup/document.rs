/// Titled code-block sections an info popup can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    MacroBody,
    BriefDocumentation,
    FullComment,
    TypeBody,
}

impl Heading {
    fn title(self) -> &'static str {
        match self {
            Self::MacroBody | Self::TypeBody => "Body",
            Self::BriefDocumentation => "Brief documentation",
            Self::FullComment => "Full doxygen comment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// The one-line declaration with its links.
    Declaration(String),
    Code {
        heading: Heading,
        lang: &'static str,
        code: String,
    },
}

/// Ordered sections of an info popup, rendered to Markdown last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopupDocument {
    sections: Vec<Section>,
}

impl PopupDocument {
    pub fn push(
        &mut self,
        section: Section,
    ) {
        self.sections.push(section);
    }

    pub fn push_code(
        &mut self,
        heading: Heading,
        lang: &'static str,
        code: impl Into<String>,
    ) {
        self.push(Section::Code {
            heading,
            lang,
            code: code.into(),
        });
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn declaration(&self) -> Option<&str> {
        self.sections.iter().find_map(|s| match s {
            Section::Declaration(text) => Some(text.as_str()),
            Section::Code { .. } => None,
        })
    }

    pub fn code(
        &self,
        heading: Heading,
    ) -> Option<&str> {
        self.sections.iter().find_map(|s| match s {
            Section::Code { heading: h, code, .. } if *h == heading => Some(code.as_str()),
            _ => None,
        })
    }

    pub fn render(&self) -> String {
        let mut md = String::new();
        for section in &self.sections {
            match section {
                Section::Declaration(text) => {
                    md.push_str("## Declaration: ##\n");
                    md.push_str(text);
                    md.push('\n');
                },
                Section::Code { heading, lang, code } => {
                    md.push_str(&format!("### {}:\n", heading.title()));
                    md.push_str(&format!("```{lang}\n{}\n```\n", code.trim_end_matches('\n')));
                },
            }
        }
        md
    }
}
