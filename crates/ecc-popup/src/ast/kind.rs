use serde::{Deserialize, Serialize};

/// Cursor kinds the popup formatter distinguishes.
///
/// Names follow libclang's `CXCursorKind`. Anything the formatter has no
/// dedicated handling for deserializes to [`CursorKind::Unexposed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CursorKind {
    // --- Preprocessor ---
    MacroDefinition,

    // --- Type declarations ---
    StructDecl,
    UnionDecl,
    ClassDecl,
    EnumDecl,
    TypedefDecl,
    ClassTemplate,
    TypeAliasDecl,
    TypeRef,

    // --- Callables ---
    FunctionDecl,
    CxxMethod,
    Constructor,
    Destructor,
    ConversionFunction,
    FunctionTemplate,

    // --- Values and other declarations ---
    VarDecl,
    FieldDecl,
    ParmDecl,
    EnumConstantDecl,
    Namespace,
    ObjcInterfaceDecl,
    ObjcInstanceMethodDecl,
    ObjcClassMethodDecl,

    // --- Expressions ---
    DeclRefExpr,
    MemberRefExpr,
    ObjcMessageExpr,

    #[default]
    #[serde(other)]
    Unexposed,
}

/// Coarse classification driving which popup sections apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindCategory {
    Macro,
    TypeDeclaration,
    Callable,
    Value,
    ObjcMessage,
    Unhandled,
}

impl CursorKind {
    pub fn category(self) -> KindCategory {
        match self {
            Self::MacroDefinition => KindCategory::Macro,
            Self::StructDecl
            | Self::UnionDecl
            | Self::ClassDecl
            | Self::EnumDecl
            | Self::TypedefDecl
            | Self::ClassTemplate
            | Self::TypeAliasDecl
            | Self::TypeRef => KindCategory::TypeDeclaration,
            Self::FunctionDecl
            | Self::CxxMethod
            | Self::Constructor
            | Self::Destructor
            | Self::ConversionFunction
            | Self::FunctionTemplate => KindCategory::Callable,
            Self::VarDecl
            | Self::FieldDecl
            | Self::ParmDecl
            | Self::EnumConstantDecl
            | Self::Namespace
            | Self::ObjcInterfaceDecl
            | Self::ObjcInstanceMethodDecl
            | Self::ObjcClassMethodDecl
            | Self::DeclRefExpr
            | Self::MemberRefExpr => KindCategory::Value,
            Self::ObjcMessageExpr => KindCategory::ObjcMessage,
            Self::Unexposed => KindCategory::Unhandled,
        }
    }

    pub fn is_type_declaration(self) -> bool {
        self.category() == KindCategory::TypeDeclaration
    }

    pub fn is_callable(self) -> bool {
        self.category() == KindCategory::Callable
    }
}
