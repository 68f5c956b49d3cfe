pub mod ast;
pub mod config;
pub mod link;
pub mod popup;
pub mod source;

pub use ast::{ClangType, Cursor, CursorKind, Extent, SourceLocation, TranslationUnit};
pub use config::{PopupSettings, Settings};
pub use link::{NavigationTarget, link, location_from_type};
pub use popup::{Popup, PopupFormatter, PopupKind, PopupOptions, PopupSurface};
pub use source::{MacroParser, clean_comment, text_by_extent};
