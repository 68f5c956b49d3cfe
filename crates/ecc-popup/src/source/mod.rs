//! Helpers that recover text from source files and comments.

pub mod comment;
pub mod extent;
pub mod macro_parser;

pub use comment::{clean_comment, strip_comment_markers};
pub use extent::text_by_extent;
pub use macro_parser::MacroParser;
