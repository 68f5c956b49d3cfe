use super::*;

#[test]
fn clean_comment_drops_brief_paragraph() {
    let raw = "/**\n * Brief line.\n *\n * Detail line.\n */";
    assert_eq!(clean_comment(raw), "Detail line.");
}

#[test]
fn clean_comment_keeps_every_detail_line() {
    let raw = "/// Brief.\n///\n/// More.\n///   Indented.\n///\n/// Last.";
    assert_eq!(clean_comment(raw), "More.\nIndented.\n\nLast.");
}

#[test]
fn clean_comment_without_blank_separator_is_empty() {
    assert_eq!(clean_comment("/** Only a brief. */"), "");
    assert_eq!(clean_comment("/// One.\n/// Two."), "");
}

#[test]
fn clean_comment_ignores_leading_empty_lines() {
    let raw = "/**\n *\n *\n * Brief.\n *\n * Detail.\n */";
    assert_eq!(clean_comment(raw), "Detail.");
}

#[test]
fn strip_comment_markers_keeps_inner_markers() {
    assert_eq!(strip_comment_markers("  * a * b /c"), vec!["a * b /c"]);
    assert_eq!(strip_comment_markers("\n\n// x\n//"), vec!["x", ""]);
}

#[test]
fn stripping_cleaned_output_changes_nothing() {
    let cleaned = clean_comment("/**\n * Brief.\n *\n * Detail line.\n * Second: a * b.\n */");
    let restripped = strip_comment_markers(&cleaned).join("\n");
    assert_eq!(restripped, cleaned);
}
