//! Doxygen comment cleanup.

fn is_marker(c: char) -> bool {
    c == '/' || c == '*' || c.is_whitespace()
}

/// Lines of `raw_comment` with leading `/`, `*` and whitespace removed,
/// starting at the first non-empty line.
pub fn strip_comment_markers(raw_comment: &str) -> Vec<&str> {
    raw_comment
        .split('\n')
        .map(|line| line.trim_start_matches(is_marker))
        .skip_while(|line| line.is_empty())
        .collect()
}

/// The detailed part of a doxygen comment.
///
/// The first paragraph is the brief and is dropped together with the blank
/// line that ends it. A comment without a blank line after its first
/// paragraph therefore cleans to an empty string.
pub fn clean_comment(raw_comment: &str) -> String {
    let lines = strip_comment_markers(raw_comment);
    let mut detail = match lines.iter().position(|line| line.is_empty()) {
        Some(brief_end) => lines[brief_end + 1..].to_vec(),
        None => Vec::new(),
    };
    while detail.last().is_some_and(|line| line.trim().is_empty()) {
        detail.pop();
    }
    detail.join("\n")
}

#[cfg(test)]
#[path = "../../tests/src/source/comment_tests.rs"]
mod tests;
