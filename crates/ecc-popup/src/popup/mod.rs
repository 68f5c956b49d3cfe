//! Info, warning and error popups rendered as Markdown admonitions.

mod document;
mod info;
mod objc;
mod surface;
pub mod tooltip;

pub use document::{Heading, PopupDocument, Section};
pub use info::PopupFormatter;
pub use objc::message_declaration;
pub use surface::{MAX_POPUP_HEIGHT, MAX_POPUP_WIDTH, PopupOptions, PopupSurface, WRAPPER_CLASS};

use crate::ast::Cursor;
use crate::config::PopupSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupKind {
    Error,
    Warning,
    Info,
}

impl PopupKind {
    /// Admonition header: panel class and quoted title.
    pub fn panel(self) -> &'static str {
        match self {
            Self::Error => r#"panel-error "ECC: Error""#,
            Self::Warning => r#"panel-warning "ECC: Warning""#,
            Self::Info => r#"panel-info "ECC: Info""#,
        }
    }
}

/// Text of a popup together with the panel it is shown in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    kind: PopupKind,
    text: String,
}

impl Popup {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: PopupKind::Error,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: PopupKind::Warning,
            text: text.into(),
        }
    }

    /// Info popup for `cursor`. See [`PopupFormatter::info`].
    pub fn info(
        cursor: &Cursor,
        settings: &PopupSettings,
    ) -> Option<Self> {
        PopupFormatter::new(settings.clone()).info(cursor)
    }

    pub fn kind(&self) -> PopupKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text wrapped in an admonition, every line indented by one tab.
    pub fn as_markdown(&self) -> String {
        let indented = self.text.split('\n').collect::<Vec<_>>().join("\n\t");
        format!("!!! {}\n    {}\n", self.kind.panel(), indented)
    }

    pub fn show(
        &self,
        surface: &dyn PopupSurface,
        options: &PopupOptions,
    ) {
        surface.show_popup(&self.as_markdown(), options);
    }
}

#[cfg(test)]
#[path = "../../tests/src/popup/popup_tests.rs"]
mod tests;
