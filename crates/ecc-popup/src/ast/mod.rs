//! Read-only cursor model consumed by the popup formatter.
//!
//! The model mirrors what libclang exposes for a cursor: kind, spelling,
//! types, locations, arguments and documentation. It is plain data so a
//! host can hand it over as JSON; [`TranslationUnit`] builds it from clang's
//! JSON AST dump.

mod clang_nodes;
pub mod compiler;
mod kind;
mod lowering;
mod qual_type;

pub use compiler::{AstDumpError, run_ast_dump};
pub use kind::{CursorKind, KindCategory};
pub use lowering::TranslationUnit;

use serde::{Deserialize, Serialize};

/// A position in a source file. Lines and columns are 1-based.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceLocation {
    pub file: Option<String>,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(
        file: impl Into<String>,
        line: u32,
        column: u32,
    ) -> Self {
        Self {
            file: Some(file.into()),
            line,
            column,
        }
    }

    /// File name, if one is known and non-empty.
    pub fn file_name(&self) -> Option<&str> {
        self.file.as_deref().filter(|f| !f.is_empty())
    }
}

/// Source range delimited by two locations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl Extent {
    pub fn new(
        start: SourceLocation,
        end: SourceLocation,
    ) -> Self {
        Self { start, end }
    }

    pub fn is_single_file(&self) -> bool {
        self.start.file == self.end.file
    }
}

/// A type as seen from a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClangType {
    pub spelling: String,
    /// Location of the type's declaration, if the type has one.
    pub declaration: Option<SourceLocation>,
    /// Type one level of pointer/reference indirection down.
    pub pointee: Option<Box<ClangType>>,
}

impl ClangType {
    pub fn new(spelling: impl Into<String>) -> Self {
        Self {
            spelling: spelling.into(),
            ..Self::default()
        }
    }

    pub fn with_declaration(
        mut self,
        location: SourceLocation,
    ) -> Self {
        self.declaration = Some(location);
        self
    }

    pub fn with_pointee(
        mut self,
        pointee: ClangType,
    ) -> Self {
        self.pointee = Some(Box::new(pointee));
        self
    }

    pub fn has_spelling(&self) -> bool {
        !self.spelling.is_empty()
    }
}

/// An AST node under the user's cursor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Cursor {
    pub kind: CursorKind,
    pub spelling: String,
    #[serde(rename = "type")]
    pub ty: ClangType,
    pub result_type: ClangType,
    pub location: Option<SourceLocation>,
    pub extent: Option<Extent>,
    pub arguments: Vec<Cursor>,
    pub brief_comment: Option<String>,
    pub raw_comment: Option<String>,
    pub enum_value: Option<i64>,
    pub referenced: Option<Box<Cursor>>,
    pub is_static_method: bool,
    pub is_const_method: bool,
}

impl Cursor {
    pub fn new(
        kind: CursorKind,
        spelling: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            spelling: spelling.into(),
            ..Self::default()
        }
    }

    /// Plain argument cursor: `<ty> <name>`, name may be empty.
    pub fn argument(
        ty: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            kind: CursorKind::ParmDecl,
            spelling: name.into(),
            ty: ClangType::new(ty),
            ..Self::default()
        }
    }

    pub fn brief_comment(&self) -> Option<&str> {
        self.brief_comment.as_deref().filter(|c| !c.is_empty())
    }

    pub fn raw_comment(&self) -> Option<&str> {
        self.raw_comment.as_deref().filter(|c| !c.is_empty())
    }
}
