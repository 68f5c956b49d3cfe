use tracing::warn;

use crate::ast::Cursor;
use crate::link::{LinkStyle, location_from_type};

use super::tooltip::escape_html;

/// Declaration line for an Objective-C message expression.
///
/// The return type comes from the message cursor itself while name and
/// arguments come from the referenced method declaration. Its selector
/// `bar:boolParam2:` is interleaved with the arguments to read
/// `bar:(BOOL)b1 boolParam2:(BOOL)b2`.
pub fn message_declaration(
    cursor: &Cursor,
    style: LinkStyle,
) -> Option<String> {
    let Some(method) = cursor.referenced.as_deref() else {
        warn!("message expression {} has no referenced method", cursor.spelling);
        return None;
    };
    let text = |s: &str| match style {
        LinkStyle::Markdown => s.to_string(),
        LinkStyle::Html => escape_html(s),
    };

    let return_type = &cursor.ty;
    let mut result = style
        .link(location_from_type(return_type), &text(&return_type.spelling))
        .trim_end()
        .to_string();
    result.push(' ');

    let mut selector = method.spelling.split(':');
    let name = selector.next().unwrap_or_default();
    result.push_str(style.link(method.location.as_ref(), &text(name)).trim_end());

    for arg in &method.arguments {
        result.push_str(&format!(":({})", arg.ty.spelling));
        if !arg.spelling.is_empty() {
            result.push_str(&arg.spelling);
            result.push(' ');
        }
        result.push_str(selector.next().unwrap_or_default());
    }
    let mut result = result.trim_end().to_string();

    if let Some(brief) = method.brief_comment() {
        match style {
            LinkStyle::Markdown => result.push_str(&format!("\n\n**{brief}**")),
            LinkStyle::Html => result.push_str(&format!("<br><br><b>{brief}</b>")),
        }
    }
    Some(result)
}

#[cfg(test)]
#[path = "../../tests/src/popup/objc_tests.rs"]
mod tests;
