use std::cell::RefCell;

use super::*;
use crate::ast::{ClangType, CursorKind};

#[derive(Default)]
struct RecordingSurface {
    shown: RefCell<Vec<(String, PopupOptions)>>,
}

impl PopupSurface for RecordingSurface {
    fn show_popup(
        &self,
        markdown: &str,
        options: &PopupOptions,
    ) {
        self.shown.borrow_mut().push((markdown.to_string(), options.clone()));
    }
}

#[test]
fn error_popup_uses_error_panel() {
    let popup = Popup::error("error_text");
    assert_eq!(popup.kind(), PopupKind::Error);
    assert_eq!(popup.as_markdown(), "!!! panel-error \"ECC: Error\"\n    error_text\n");
}

#[test]
fn warning_popup_uses_warning_panel() {
    let popup = Popup::warning("warning_text");
    assert_eq!(popup.kind(), PopupKind::Warning);
    assert_eq!(popup.as_markdown(), "!!! panel-warning \"ECC: Warning\"\n    warning_text\n");
}

#[test]
fn every_following_line_is_tab_indented() {
    let popup = Popup::error("first\nsecond\nthird");
    assert_eq!(popup.as_markdown(), "!!! panel-error \"ECC: Error\"\n    first\n\tsecond\n\tthird\n");
}

#[test]
fn info_popup_uses_info_panel() {
    let mut cursor = Cursor::new(CursorKind::VarDecl, "count");
    cursor.ty = ClangType::new("int");
    let popup = Popup::info(&cursor, &PopupSettings::default()).expect("info popup");
    assert_eq!(popup.kind(), PopupKind::Info);
    assert_eq!(popup.text(), "## Declaration: ##\nint count \n");
    assert_eq!(popup.as_markdown(), "!!! panel-info \"ECC: Info\"\n    ## Declaration: ##\n\tint count \n\t\n");
}

#[test]
fn info_popup_without_type_is_absent() {
    let cursor = Cursor::new(CursorKind::Namespace, "detail");
    assert_eq!(Popup::info(&cursor, &PopupSettings::default()), None);
}

#[test]
fn show_hands_markdown_and_options_to_the_surface() {
    let surface = RecordingSurface::default();
    let options = PopupOptions {
        anchor: Some(42),
        ..PopupOptions::default()
    };
    Popup::warning("careful").show(&surface, &options);

    let shown = surface.shown.borrow();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].0, "!!! panel-warning \"ECC: Warning\"\n    careful\n");
    assert_eq!(shown[0].1.max_width, 1800);
    assert_eq!(shown[0].1.max_height, 800);
    assert_eq!(shown[0].1.wrapper_class, "ECC");
    assert_eq!(shown[0].1.anchor, Some(42));
}
