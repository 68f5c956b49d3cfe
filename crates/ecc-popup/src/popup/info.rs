use tracing::{Dispatch, debug, warn};

use crate::ast::{Cursor, CursorKind, KindCategory};
use crate::config::PopupSettings;
use crate::link::{LinkStyle, link, location_from_type};
use crate::source::{MacroParser, clean_comment, text_by_extent};

use super::document::{Heading, PopupDocument, Section};
use super::objc;
use super::{Popup, PopupKind};

/// Builds info popups for cursors.
///
/// Logging goes to the injected [`Dispatch`] when one is set, otherwise to
/// the current default subscriber.
#[derive(Debug, Clone, Default)]
pub struct PopupFormatter {
    settings: PopupSettings,
    dispatch: Option<Dispatch>,
}

impl PopupFormatter {
    pub fn new(settings: PopupSettings) -> Self {
        Self {
            settings,
            dispatch: None,
        }
    }

    pub fn with_dispatch(
        mut self,
        dispatch: Dispatch,
    ) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    pub fn settings(&self) -> &PopupSettings {
        &self.settings
    }

    /// Info popup for `cursor`, or `None` when it has no usable type.
    pub fn info(
        &self,
        cursor: &Cursor,
    ) -> Option<Popup> {
        let document = self.document(cursor)?;
        Some(Popup {
            kind: PopupKind::Info,
            text: document.render(),
        })
    }

    /// Sections of the info popup for `cursor`, before rendering.
    pub fn document(
        &self,
        cursor: &Cursor,
    ) -> Option<PopupDocument> {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, || self.build(cursor)),
            None => self.build(cursor),
        }
    }

    fn build(
        &self,
        cursor: &Cursor,
    ) -> Option<PopupDocument> {
        let category = cursor.kind.category();
        match category {
            KindCategory::ObjcMessage => return objc_message_document(cursor),
            KindCategory::Unhandled => {
                debug!("no dedicated layout for {:?} {}, using the generic one", cursor.kind, cursor.spelling);
            },
            KindCategory::Macro | KindCategory::TypeDeclaration | KindCategory::Callable | KindCategory::Value => {},
        }

        let macro_parser =
            (category == KindCategory::Macro).then(|| MacroParser::new(&cursor.spelling, cursor.location.as_ref()));

        let mut declaration = match &macro_parser {
            Some(_) => "\\#define ".to_string(),
            None => type_prefix(cursor)?,
        };
        declaration.push_str(&link(cursor.location.as_ref(), &cursor.spelling));
        if let Some(args) = argument_list(cursor, macro_parser.as_ref()) {
            declaration.push_str(&args);
        }
        if cursor.kind == CursorKind::EnumConstantDecl
            && let Some(value) = cursor.enum_value
        {
            declaration.push_str(&enum_value_suffix(value));
        }
        if cursor.is_const_method {
            declaration.push_str(" const");
        }

        let mut document = PopupDocument::default();
        document.push(Section::Declaration(declaration));
        if let Some(parser) = &macro_parser {
            document.push_code(Heading::MacroBody, "c++", parser.body());
        }
        push_documentation(&mut document, cursor);

        if self.settings.show_type_body
            && category == KindCategory::TypeDeclaration
            && let Some(extent) = &cursor.extent
        {
            match text_by_extent(extent) {
                Some(body) => document.push_code(Heading::TypeBody, "c++", body),
                None => debug!("no body text for {}", cursor.spelling),
            }
        }
        Some(document)
    }
}

/// `static ` marker and the linked result type, unless the cursor names the
/// type itself.
fn type_prefix(cursor: &Cursor) -> Option<String> {
    let result_type = if cursor.result_type.has_spelling() {
        &cursor.result_type
    } else if cursor.ty.has_spelling() {
        &cursor.ty
    } else {
        warn!("no spelling for type of {} provided in info", cursor.spelling);
        return None;
    };

    let mut prefix = String::new();
    if cursor.is_static_method {
        prefix.push_str("static ");
    }
    if cursor.spelling != cursor.ty.spelling {
        let location = location_from_type(result_type);
        if location.is_none() {
            warn!("no declaration location for type {}", result_type.spelling);
        }
        prefix.push_str(&link(location, &result_type.spelling));
    }
    Some(prefix)
}

fn argument_list(
    cursor: &Cursor,
    macro_parser: Option<&MacroParser>,
) -> Option<String> {
    if let Some(parser) = macro_parser {
        let args = parser.args_string();
        return (!args.is_empty()).then_some(args);
    }
    if !cursor.kind.is_callable() {
        return None;
    }
    let args: Vec<String> = cursor
        .arguments
        .iter()
        .map(|arg| format!("{} {}", arg.ty.spelling, arg.spelling))
        .collect();
    Some(format!("({})", args.join(", ")))
}

pub(crate) fn enum_value_suffix(value: i64) -> String {
    let hex = if value < 0 {
        format!("-0x{:x}", value.unsigned_abs())
    } else {
        format!("0x{value:x}")
    };
    format!(" = {value}({hex})")
}

fn push_documentation(
    document: &mut PopupDocument,
    cursor: &Cursor,
) {
    if let Some(brief) = cursor.brief_comment() {
        document.push_code(Heading::BriefDocumentation, "", brief);
    }
    if let Some(raw) = cursor.raw_comment() {
        let full = clean_comment(raw);
        if !full.is_empty() {
            document.push_code(Heading::FullComment, "", full);
        }
    }
}

fn objc_message_document(cursor: &Cursor) -> Option<PopupDocument> {
    let declaration = objc::message_declaration(cursor, LinkStyle::Markdown)?;
    let mut document = PopupDocument::default();
    document.push(Section::Declaration(declaration));
    if let Some(raw) = cursor.referenced.as_deref().and_then(Cursor::raw_comment) {
        let full = clean_comment(raw);
        if !full.is_empty() {
            document.push_code(Heading::FullComment, "", full);
        }
    }
    Some(document)
}

#[cfg(test)]
#[path = "../../tests/src/popup/info_tests.rs"]
mod tests;
