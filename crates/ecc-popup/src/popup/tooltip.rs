//! HTML details shown next to completion entries.

use tracing::warn;

use crate::ast::{Cursor, KindCategory};
use crate::link::{LinkStyle, html_link, location_from_type};

use super::objc;

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// One-line HTML summary of `cursor`: linked result type, linked name,
/// arguments for callables, modifiers and the brief comment in bold.
pub fn completion_details(cursor: &Cursor) -> Option<String> {
    if cursor.kind.category() == KindCategory::ObjcMessage {
        return objc_message_details(cursor);
    }
    let cursor_type = if cursor.result_type.has_spelling() {
        &cursor.result_type
    } else if cursor.ty.has_spelling() {
        &cursor.ty
    } else {
        warn!("no type spelling for {} in completion details", cursor.spelling);
        return None;
    };

    let mut result = String::new();
    if cursor.is_static_method {
        result.push_str("static ");
    }
    result.push_str(&html_link(location_from_type(cursor_type), &escape_html(&cursor_type.spelling)));
    result.push(' ');
    result.push_str(&html_link(cursor.location.as_ref(), &escape_html(&cursor.spelling)));

    if cursor.kind.is_callable() {
        let args: Vec<String> = cursor
            .arguments
            .iter()
            .map(|arg| format!("{} {}", arg.ty.spelling, arg.spelling))
            .collect();
        result.push('(');
        result.push_str(&escape_html(&args.join(", ")));
        result.push(')');
    }
    if cursor.is_const_method {
        result.push_str(" const");
    }
    if let Some(brief) = cursor.brief_comment() {
        result.push_str(&format!("<br><br><b>{brief}</b>"));
    }
    Some(result)
}

/// HTML flavour of the Objective-C message declaration.
pub fn objc_message_details(cursor: &Cursor) -> Option<String> {
    objc::message_declaration(cursor, LinkStyle::Html)
}

#[cfg(test)]
#[path = "../../tests/src/popup/tooltip_tests.rs"]
mod tests;
