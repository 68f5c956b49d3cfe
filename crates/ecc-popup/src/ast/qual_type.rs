//! Helpers over clang `qualType` strings.

use std::borrow::Cow;

/// Return type of a function type, e.g. `int` for `int (int, char)`.
///
/// The parameter list is the group closed by the last `)`, so parentheses in
/// the return type survive: `std::function<void (int)> (int)` gives
/// `std::function<void (int)>`. When that group follows a declarator group
/// such as `(*(int))`, the function returns a pointer to function and its own
/// parameters are removed from inside the declarator: `void (*(int))(char)`
/// gives `void (*)(char)`.
pub(crate) fn return_type(qual_type: &str) -> Cow<'_, str> {
    let trimmed = qual_type.trim();
    match strip_parameters(trimmed) {
        Some(stripped) => stripped,
        None => Cow::Borrowed(trimmed),
    }
}

fn strip_parameters(qual_type: &str) -> Option<Cow<'_, str>> {
    let close = qual_type.rfind(')')?;
    let open = matching_open(qual_type, close)?;
    let before = qual_type[..open].trim_end();
    if let Some(declarator) = declarator_group(before) {
        let (group_open, group_close) = declarator;
        let inner = strip_parameters(&before[group_open + 1..group_close])?;
        return Some(Cow::Owned(format!(
            "{}({}){}",
            &before[..group_open],
            inner,
            &qual_type[open..=close]
        )));
    }
    Some(Cow::Borrowed(before))
}

/// Byte range of a trailing `(*...)`, `(&...)` or `(^...)` group in `text`.
fn declarator_group(text: &str) -> Option<(usize, usize)> {
    let close = text.len().checked_sub(1).filter(|&i| text.as_bytes()[i] == b')')?;
    let open = matching_open(text, close)?;
    let inner = text[open + 1..close].trim_start();
    inner.starts_with(['*', '&', '^']).then_some((open, close))
}

/// Index of the `(` matching the `)` at byte `close`.
fn matching_open(
    text: &str,
    close: usize,
) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, byte) in text.as_bytes()[..=close].iter().enumerate().rev() {
        match byte {
            b')' => depth += 1,
            b'(' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx);
                }
            },
            _ => {},
        }
    }
    None
}

/// Whether a method type carries a trailing `const` qualifier.
pub(crate) fn is_const_method(qual_type: &str) -> bool {
    qual_type
        .rfind(')')
        .is_some_and(|i| qual_type[i + 1..].split_whitespace().any(|token| token == "const"))
}

/// Type one pointer or reference level down: `A *` -> `A`, `const A &` ->
/// `const A`, `A &&` -> `A`.
pub(crate) fn pointee(qual_type: &str) -> Option<&str> {
    let trimmed = qual_type.trim_end();
    let stripped = trimmed
        .strip_suffix("&&")
        .or_else(|| trimmed.strip_suffix('&'))
        .or_else(|| trimmed.strip_suffix('*'))?;
    let stripped = stripped.trim_end();
    (!stripped.is_empty()).then_some(stripped)
}

/// Name a non-pointer type is declared under: qualifiers, elaborated
/// keywords, scopes and template arguments removed.
///
/// `const struct ns::Foo<int>` -> `Foo`. Pointers, references and function
/// types have no declaration and give `None`.
pub(crate) fn declared_name(qual_type: &str) -> Option<&str> {
    let mut s = qual_type.trim();
    if s.is_empty() || s.contains(['*', '&', '(']) {
        return None;
    }
    if let Some((base, _)) = s.split_once('<') {
        s = base.trim();
    }
    loop {
        let before = s;
        for prefix in ["const ", "volatile ", "struct ", "class ", "union ", "enum "] {
            if let Some(rest) = s.strip_prefix(prefix) {
                s = rest.trim_start();
            }
        }
        s = s.strip_suffix(" const").unwrap_or(s).trim_end();
        if before == s {
            break;
        }
    }
    let token = s.rsplit("::").next().unwrap_or(s).trim();
    (!token.is_empty() && token.chars().all(|c| c.is_alphanumeric() || c == '_')).then_some(token)
}

#[cfg(test)]
#[path = "../../tests/src/ast/qual_type_tests.rs"]
mod tests;
