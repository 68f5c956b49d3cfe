use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::ast::SourceLocation;

static DEFINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*#[ \t]*define[ \t]+([A-Za-z_][A-Za-z0-9_]*)").expect("valid define regex"));

/// Parameter list and body of a `#define`, recovered from source text.
///
/// Macros carry no argument cursors in the AST, so the definition line is
/// parsed directly. Continuation lines are followed. Anything that does not
/// parse leaves an empty parameter list and a best-effort body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroParser {
    name: String,
    params: Option<Vec<String>>,
    body: String,
}

impl MacroParser {
    /// Parse the definition of `name` found at `location`.
    pub fn new(
        name: &str,
        location: Option<&SourceLocation>,
    ) -> Self {
        let empty = Self {
            name: name.to_string(),
            ..Self::default()
        };
        let Some((file, line)) = location.and_then(|loc| loc.file_name().map(|f| (f, loc.line))) else {
            debug!("no location for macro {name}");
            return empty;
        };
        match std::fs::read_to_string(file) {
            Ok(content) => {
                let lines: Vec<&str> = content.lines().collect();
                Self::from_source_lines(name, &lines, line)
            },
            Err(e) => {
                warn!("failed to read {file} for macro {name}: {e}");
                empty
            },
        }
    }

    /// Parse the definition of `name` starting at 1-based `line` of `lines`.
    pub fn from_source_lines<S: AsRef<str>>(
        name: &str,
        lines: &[S],
        line: u32,
    ) -> Self {
        let mut parser = Self {
            name: name.to_string(),
            ..Self::default()
        };
        let Some(text) = logical_line(lines, line) else {
            debug!("macro {name}: line {line} is out of range");
            return parser;
        };
        let Some(captures) = DEFINE_RE.captures(&text) else {
            debug!("macro {name}: no #define on line {line}");
            return parser;
        };
        let (Some(whole), Some(defined)) = (captures.get(0), captures.get(1)) else {
            return parser;
        };
        if defined.as_str() != name {
            debug!("macro {name}: line {line} defines {} instead", defined.as_str());
            return parser;
        }

        let rest = &text[whole.end()..];
        let body = if rest.starts_with('(') {
            match split_params(rest) {
                Some((params, consumed)) => {
                    parser.params = Some(params);
                    &rest[consumed..]
                },
                None => {
                    debug!("macro {name}: unbalanced parameter list");
                    rest
                },
            }
        } else {
            rest
        };
        parser.body = body
            .trim_start_matches(|c: char| c.is_whitespace() || c == '\\')
            .trim_end()
            .to_string();
        parser
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter names in declaration order. Empty for object-like macros.
    pub fn params(&self) -> &[String] {
        self.params.as_deref().unwrap_or_default()
    }

    pub fn is_function_like(&self) -> bool {
        self.params.is_some()
    }

    /// `(a, b)` for function-like macros, `()` without parameters, and an
    /// empty string for object-like macros.
    pub fn args_string(&self) -> String {
        match &self.params {
            Some(params) => format!("({})", params.join(", ")),
            None => String::new(),
        }
    }

    /// Macro body as written, before expansion.
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// 1-based line and column of the name in the first `#define name`.
pub(crate) fn find_define<S: AsRef<str>>(
    lines: &[S],
    name: &str,
) -> Option<(u32, u32)> {
    lines.iter().enumerate().find_map(|(idx, line)| {
        let captures = DEFINE_RE.captures(line.as_ref())?;
        let defined = captures.get(1)?;
        (defined.as_str() == name).then(|| (idx as u32 + 1, defined.start() as u32 + 1))
    })
}

/// The physical line at `line` joined with its backslash continuations.
fn logical_line<S: AsRef<str>>(
    lines: &[S],
    line: u32,
) -> Option<String> {
    let start = (line as usize).checked_sub(1)?;
    let first = lines.get(start)?.as_ref();
    let mut text = first.trim_end_matches('\r').to_string();
    let mut next = start + 1;
    while text.trim_end().ends_with('\\')
        && let Some(continuation) = lines.get(next)
    {
        text.push('\n');
        text.push_str(continuation.as_ref().trim_end_matches('\r'));
        next += 1;
    }
    Some(text)
}

/// Split `(a, b, c)` at the start of `text` into trimmed parameter names.
///
/// Returns the names and the byte length of the parenthesized list, or
/// `None` if the parentheses never balance.
fn split_params(text: &str) -> Option<(Vec<String>, usize)> {
    let mut depth = 0usize;
    let mut current = String::new();
    let mut params = Vec::new();
    for (idx, ch) in text.char_indices() {
        match ch {
            '(' => {
                depth += 1;
                if depth > 1 {
                    current.push(ch);
                }
            },
            ')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    params.push(normalize_param(&current));
                    if params.len() == 1 && params[0].is_empty() {
                        params.clear();
                    }
                    return Some((params, idx + ch.len_utf8()));
                }
                current.push(ch);
            },
            ',' if depth == 1 => params.push(normalize_param(&std::mem::take(&mut current))),
            _ => current.push(ch),
        }
    }
    None
}

fn normalize_param(raw: &str) -> String {
    raw.replace("\\\n", " ").split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "../../tests/src/source/macro_parser_tests.rs"]
mod tests;
