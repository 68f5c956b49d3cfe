//! Source locations rendered as navigable references.

use crate::ast::{ClangType, SourceLocation};

/// Output flavour for links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    /// `[text](file:line:col) `, used by info popups.
    Markdown,
    /// `<a href="file:line:col">text</a>`, used by completion tooltips.
    Html,
}

impl LinkStyle {
    pub fn link(
        self,
        location: Option<&SourceLocation>,
        text: &str,
    ) -> String {
        match self {
            Self::Markdown => link(location, text),
            Self::Html => html_link(location, text),
        }
    }
}

/// Markdown link to `location` labelled `text`, always followed by a space.
///
/// Degrades to the plain text when the location or its file is unknown.
pub fn link(
    location: Option<&SourceLocation>,
    text: &str,
) -> String {
    match location.and_then(|loc| loc.file_name().map(|file| (loc, file))) {
        Some((loc, file)) => format!("[{text}]({file}:{}:{}) ", loc.line, loc.column),
        None => format!("{text} "),
    }
}

/// HTML anchor to `location` labelled `text`. `text` is inserted as is.
pub fn html_link(
    location: Option<&SourceLocation>,
    text: &str,
) -> String {
    match location.and_then(|loc| loc.file_name().map(|file| (loc, file))) {
        Some((loc, file)) => format!("<a href=\"{file}:{}:{}\">{text}</a>", loc.line, loc.column),
        None => text.to_string(),
    }
}

/// Declaration location of a type.
///
/// Looks at the type itself, then one level of pointer/reference
/// indirection down. Never walks further.
pub fn location_from_type(ty: &ClangType) -> Option<&SourceLocation> {
    let has_file = |loc: &&SourceLocation| loc.file_name().is_some();
    ty.declaration.as_ref().filter(has_file).or_else(|| {
        ty.pointee
            .as_deref()
            .and_then(|pointee| pointee.declaration.as_ref())
            .filter(has_file)
    })
}

/// Target of a link emitted by [`link`], as handed to navigation callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl NavigationTarget {
    /// Parse `file:line:col`. The file part may itself contain `:`.
    pub fn parse(href: &str) -> Option<Self> {
        let mut parts = href.rsplitn(3, ':');
        let column = parts.next()?.parse().ok()?;
        let line = parts.next()?.parse().ok()?;
        let file = parts.next().filter(|f| !f.is_empty())?;
        Some(Self {
            file: file.to_string(),
            line,
            column,
        })
    }

    pub fn to_location(&self) -> SourceLocation {
        SourceLocation::new(self.file.clone(), self.line, self.column)
    }
}

#[cfg(test)]
#[path = "../tests/src/link_tests.rs"]
mod tests;
