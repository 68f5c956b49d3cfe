use super::*;

#[test]
fn link_with_known_location_is_markdown_reference() {
    let location = SourceLocation::new("a.c", 3, 5);
    assert_eq!(link(Some(&location), "foo"), "[foo](a.c:3:5) ");
}

#[test]
fn link_without_location_degrades_to_plain_text() {
    assert_eq!(link(None, "foo"), "foo ");
}

#[test]
fn link_without_file_name_degrades_to_plain_text() {
    let no_file = SourceLocation {
        file: None,
        line: 3,
        column: 5,
    };
    let empty_file = SourceLocation::new("", 3, 5);
    assert_eq!(link(Some(&no_file), "foo"), "foo ");
    assert_eq!(link(Some(&empty_file), "foo"), "foo ");
}

#[test]
fn html_link_wraps_text_in_anchor() {
    let location = SourceLocation::new("/src/a.h", 10, 2);
    assert_eq!(html_link(Some(&location), "Foo"), r#"<a href="/src/a.h:10:2">Foo</a>"#);
    assert_eq!(html_link(None, "Foo"), "Foo");
    assert_eq!(LinkStyle::Html.link(None, "Foo"), "Foo");
    assert_eq!(LinkStyle::Markdown.link(None, "Foo"), "Foo ");
}

#[test]
fn location_from_type_prefers_the_type_declaration() {
    let decl = SourceLocation::new("a.h", 1, 8);
    let ty = ClangType::new("A").with_declaration(decl.clone());
    assert_eq!(location_from_type(&ty), Some(&decl));
}

#[test]
fn location_from_type_strips_one_indirection() {
    let decl = SourceLocation::new("a.h", 1, 8);
    let ty = ClangType::new("A *").with_pointee(ClangType::new("A").with_declaration(decl.clone()));
    assert_eq!(location_from_type(&ty), Some(&decl));
}

#[test]
fn location_from_type_does_not_strip_a_second_indirection() {
    let decl = SourceLocation::new("a.h", 1, 8);
    let ty = ClangType::new("A **")
        .with_pointee(ClangType::new("A *").with_pointee(ClangType::new("A").with_declaration(decl)));
    assert_eq!(location_from_type(&ty), None);
}

#[test]
fn location_from_type_skips_declarations_without_file() {
    let fileless = SourceLocation {
        file: None,
        line: 1,
        column: 1,
    };
    let decl = SourceLocation::new("a.h", 4, 7);
    let ty = ClangType::new("B &")
        .with_declaration(fileless)
        .with_pointee(ClangType::new("B").with_declaration(decl.clone()));
    assert_eq!(location_from_type(&ty), Some(&decl));
    assert_eq!(location_from_type(&ClangType::new("int")), None);
}

#[test]
fn navigation_target_parses_link_targets() {
    let target = NavigationTarget::parse("a.c:3:5").expect("valid target");
    assert_eq!(target.file, "a.c");
    assert_eq!(target.line, 3);
    assert_eq!(target.column, 5);
    assert_eq!(target.to_location(), SourceLocation::new("a.c", 3, 5));
}

#[test]
fn navigation_target_keeps_colons_in_file_names() {
    let target = NavigationTarget::parse(r"C:\src\a.c:10:2").expect("valid target");
    assert_eq!(target.file, r"C:\src\a.c");
    assert_eq!((target.line, target.column), (10, 2));
}

#[test]
fn navigation_target_rejects_malformed_targets() {
    assert_eq!(NavigationTarget::parse("a.c:x:5"), None);
    assert_eq!(NavigationTarget::parse("3:5"), None);
    assert_eq!(NavigationTarget::parse(":3:5"), None);
    assert_eq!(NavigationTarget::parse("a.c"), None);
}
