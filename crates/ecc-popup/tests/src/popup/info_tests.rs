use std::io::Write;
use std::sync::{Arc, Mutex};

use expect_test::expect;
use tempfile::NamedTempFile;
use tracing::field::{Field, Visit};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

use super::*;
use crate::ast::{ClangType, Extent, SourceLocation};

fn formatter() -> PopupFormatter {
    PopupFormatter::new(PopupSettings::default())
}

fn declaration(cursor: &Cursor) -> String {
    let document = formatter().document(cursor).expect("document");
    document.declaration().expect("declaration section").to_string()
}

fn function(
    name: &str,
    result: &str,
    args: Vec<Cursor>,
) -> Cursor {
    let mut cursor = Cursor::new(CursorKind::FunctionDecl, name);
    cursor.ty = ClangType::new(format!("{result} (...)"));
    cursor.result_type = ClangType::new(result);
    cursor.location = Some(SourceLocation::new("a.c", 1, 5));
    cursor.arguments = args;
    cursor
}

fn source_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write source");
    file
}

#[test]
fn free_function_lists_named_arguments_in_order() {
    let cursor = function("foo", "int", vec![Cursor::argument("int", "x"), Cursor::argument("char", "c")]);
    let text = declaration(&cursor);
    assert!(text.ends_with("(int x, char c)"), "{text}");
    assert_eq!(text, "int [foo](a.c:1:5) (int x, char c)");
}

#[test]
fn unnamed_arguments_keep_trailing_space() {
    let cursor = function("foo", "void", vec![Cursor::argument("int", ""), Cursor::argument("const char *", "")]);
    assert_eq!(declaration(&cursor), "void [foo](a.c:1:5) (int , const char * )");
}

#[test]
fn function_without_arguments_shows_empty_parentheses() {
    assert_eq!(declaration(&function("run", "void", Vec::new())), "void [run](a.c:1:5) ()");
}

#[test]
fn static_and_const_methods_get_modifiers() {
    let mut method = Cursor::new(CursorKind::CxxMethod, "create");
    method.ty = ClangType::new("Widget ()");
    method.result_type = ClangType::new("Widget").with_declaration(SourceLocation::new("w.h", 2, 7));
    method.location = Some(SourceLocation::new("w.h", 4, 17));
    method.is_static_method = true;
    assert_eq!(declaration(&method), "static [Widget](w.h:2:7) [create](w.h:4:17) ()");

    let mut getter = Cursor::new(CursorKind::CxxMethod, "size");
    getter.ty = ClangType::new("int () const");
    getter.result_type = ClangType::new("int");
    getter.is_const_method = true;
    assert_eq!(declaration(&getter), "int size () const");
}

#[test]
fn result_type_falls_back_to_type() {
    let mut cursor = Cursor::new(CursorKind::VarDecl, "origin");
    cursor.ty = ClangType::new("Point").with_declaration(SourceLocation::new("p.h", 1, 8));
    cursor.location = Some(SourceLocation::new("main.cpp", 5, 9));
    assert_eq!(declaration(&cursor), "[Point](p.h:1:8) [origin](main.cpp:5:9) ");
}

#[test]
fn pointer_types_link_to_the_pointee_declaration() {
    let mut cursor = Cursor::new(CursorKind::ParmDecl, "node");
    cursor.ty = ClangType::new("Node *").with_pointee(ClangType::new("Node").with_declaration(SourceLocation::new("n.h", 3, 8)));
    assert_eq!(declaration(&cursor), "[Node *](n.h:3:8) node ");
}

#[test]
fn hovering_the_type_itself_does_not_repeat_it() {
    let mut cursor = Cursor::new(CursorKind::TypedefDecl, "Meters");
    cursor.ty = ClangType::new("Meters");
    cursor.location = Some(SourceLocation::new("units.h", 2, 16));
    assert_eq!(declaration(&cursor), "[Meters](units.h:2:16) ");
}

#[test]
fn enum_constants_show_decimal_and_hex_values() {
    let mut cursor = Cursor::new(CursorKind::EnumConstantDecl, "Blue");
    cursor.ty = ClangType::new("Color");
    cursor.enum_value = Some(5);
    assert!(declaration(&cursor).ends_with(" = 5(0x5)"));

    assert_eq!(enum_value_suffix(255), " = 255(0xff)");
    assert_eq!(enum_value_suffix(-1), " = -1(-0x1)");
    assert_eq!(enum_value_suffix(0), " = 0(0x0)");
}

#[test]
fn enum_value_is_ignored_for_other_kinds() {
    let mut cursor = Cursor::new(CursorKind::VarDecl, "v");
    cursor.ty = ClangType::new("int");
    cursor.enum_value = Some(3);
    assert_eq!(declaration(&cursor), "int v ");
}

#[test]
fn missing_type_spelling_gives_no_popup() {
    let cursor = Cursor::new(CursorKind::FunctionDecl, "mystery");
    assert!(formatter().document(&cursor).is_none());
    assert!(formatter().info(&cursor).is_none());
}

#[test]
fn unhandled_kinds_use_the_generic_layout() {
    let mut cursor = Cursor::new(CursorKind::Unexposed, "thing");
    cursor.ty = ClangType::new("int");
    cursor.arguments = vec![Cursor::argument("int", "ignored")];
    assert_eq!(declaration(&cursor), "int thing ");
}

#[test]
fn brief_and_full_documentation_both_appear() {
    let mut cursor = function("area", "double", vec![Cursor::argument("const Shape &", "shape")]);
    cursor.location = Some(SourceLocation::new("shapes.h", 12, 8));
    cursor.brief_comment = Some("Computes the area.".to_string());
    cursor.raw_comment = Some("/**\n * Computes the area.\n *\n * Works for every shape.\n */".to_string());

    let document = formatter().document(&cursor).expect("document");
    assert_eq!(document.code(Heading::BriefDocumentation), Some("Computes the area."));
    assert_eq!(document.code(Heading::FullComment), Some("Works for every shape."));

    expect![[r#"
        ## Declaration: ##
        double [area](shapes.h:12:8) (const Shape & shape)
        ### Brief documentation:
        ```
        Computes the area.
        ```
        ### Full doxygen comment:
        ```
        Works for every shape.
        ```
    "#]]
    .assert_eq(&document.render());
}

#[test]
fn comment_without_details_adds_no_full_section() {
    let mut cursor = function("f", "void", Vec::new());
    cursor.brief_comment = Some("Does f.".to_string());
    cursor.raw_comment = Some("/// Does f.".to_string());
    let document = formatter().document(&cursor).expect("document");
    assert!(document.code(Heading::BriefDocumentation).is_some());
    assert!(document.code(Heading::FullComment).is_none());
}

#[test]
fn type_body_is_read_from_the_extent() {
    let file = source_file("/// A point.\nstruct Point {\n  int x;\n};\nint other;\n");
    let path = file.path().display().to_string();
    let mut cursor = Cursor::new(CursorKind::StructDecl, "Point");
    cursor.ty = ClangType::new("Point");
    cursor.location = Some(SourceLocation::new(path.clone(), 2, 8));
    cursor.extent = Some(Extent::new(SourceLocation::new(path.clone(), 2, 1), SourceLocation::new(path.clone(), 4, 2)));

    let document = formatter().document(&cursor).expect("document");
    assert_eq!(document.code(Heading::TypeBody), Some("struct Point {\n  int x;\n};\n"));
    assert!(document.render().ends_with("### Body:\n```c++\nstruct Point {\n  int x;\n};\n```\n"));

    let hidden = PopupFormatter::new(PopupSettings {
        show_type_body: false,
        ..PopupSettings::default()
    });
    assert!(hidden.document(&cursor).expect("document").code(Heading::TypeBody).is_none());
}

#[test]
fn type_body_is_skipped_for_values_and_cross_file_extents() {
    let file = source_file("int counter = 0;\n");
    let path = file.path().display().to_string();
    let mut value = Cursor::new(CursorKind::VarDecl, "counter");
    value.ty = ClangType::new("int");
    value.extent = Some(Extent::new(SourceLocation::new(path.clone(), 1, 1), SourceLocation::new(path, 1, 16)));
    assert!(formatter().document(&value).expect("document").code(Heading::TypeBody).is_none());

    let mut split = Cursor::new(CursorKind::ClassDecl, "Split");
    split.ty = ClangType::new("Split");
    split.extent = Some(Extent::new(SourceLocation::new("a.h", 1, 1), SourceLocation::new("b.h", 9, 1)));
    let document = formatter().document(&split).expect("document");
    assert!(document.code(Heading::TypeBody).is_none());
    assert_eq!(document.sections().len(), 1);
}

#[test]
fn function_like_macro_shows_parameters_and_body() {
    let file = source_file("#include <stdio.h>\n#define MAX(a, b) ((a) > (b) ? (a) : (b))\n");
    let path = file.path().display().to_string();
    let mut cursor = Cursor::new(CursorKind::MacroDefinition, "MAX");
    cursor.location = Some(SourceLocation::new(path.clone(), 2, 9));

    let document = formatter().document(&cursor).expect("macro document");
    assert_eq!(document.declaration(), Some(format!("\\#define [MAX]({path}:2:9) (a, b)").as_str()));
    assert_eq!(document.code(Heading::MacroBody), Some("((a) > (b) ? (a) : (b))"));
    assert!(document.render().contains("### Body:\n```c++\n((a) > (b) ? (a) : (b))\n```\n"));
}

#[test]
fn object_like_macro_has_no_parentheses() {
    let file = source_file("#define VERSION 3\n");
    let path = file.path().display().to_string();
    let mut cursor = Cursor::new(CursorKind::MacroDefinition, "VERSION");
    cursor.location = Some(SourceLocation::new(path.clone(), 1, 9));

    let document = formatter().document(&cursor).expect("macro document");
    assert_eq!(document.declaration(), Some(format!("\\#define [VERSION]({path}:1:9) ").as_str()));
    assert_eq!(document.code(Heading::MacroBody), Some("3"));
}

/// Collects `LEVEL message` lines for every event it sees.
#[derive(Clone, Default)]
struct RecordingLayer {
    events: Arc<Mutex<Vec<String>>>,
}

impl RecordingLayer {
    fn events(&self) -> Vec<String> {
        self.events.lock().expect("events lock").clone()
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(
        &mut self,
        field: &Field,
        value: &dyn std::fmt::Debug,
    ) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: tracing::Subscriber> Layer<S> for RecordingLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: Context<'_, S>,
    ) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        let line = format!("{} {}", event.metadata().level(), visitor.0);
        self.events.lock().expect("events lock").push(line);
    }
}

fn recording_formatter() -> (PopupFormatter, RecordingLayer) {
    let layer = RecordingLayer::default();
    let dispatch = tracing::Dispatch::new(tracing_subscriber::registry().with(layer.clone()));
    (formatter().with_dispatch(dispatch), layer)
}

#[test]
fn missing_type_spelling_is_logged_to_the_injected_dispatch() {
    let (formatter, layer) = recording_formatter();
    let cursor = Cursor::new(CursorKind::VarDecl, "untyped");
    assert!(formatter.info(&cursor).is_none());
    assert!(
        layer.events().contains(&"WARN no spelling for type of untyped provided in info".to_string()),
        "{:?}",
        layer.events()
    );
}

#[test]
fn unresolved_result_type_is_logged_and_printed_plain() {
    let (formatter, layer) = recording_formatter();
    let mut cursor = Cursor::new(CursorKind::VarDecl, "origin");
    cursor.ty = ClangType::new("Widget");

    assert_eq!(declaration_with(&formatter, &cursor), "Widget origin ");
    assert!(
        layer.events().contains(&"WARN no declaration location for type Widget".to_string()),
        "{:?}",
        layer.events()
    );
    assert!(formatter.settings().show_type_body);
}

fn declaration_with(
    formatter: &PopupFormatter,
    cursor: &Cursor,
) -> String {
    let document = formatter.document(cursor).expect("document");
    document.declaration().expect("declaration section").to_string()
}
