use clang_ast::{BareSourceLocation, Id, SourceLocation, SourceRange};
use serde::Deserialize;

pub type Node = clang_ast::Node<Clang>;

/// Clang JSON AST node kinds the lowering looks at.
///
/// Each variant corresponds to a `"kind"` value; everything else lands in
/// `Other`.
#[derive(Deserialize)]
pub enum Clang {
    // --- Declarations ---
    FunctionDecl(DeclData),
    CXXMethodDecl(DeclData),
    CXXConstructorDecl(DeclData),
    CXXDestructorDecl(DeclData),
    CXXConversionDecl(DeclData),
    FunctionTemplateDecl(DeclData),
    ClassTemplateDecl(DeclData),
    RecordDecl(DeclData),
    CXXRecordDecl(DeclData),
    EnumDecl(DeclData),
    EnumConstantDecl(DeclData),
    TypedefDecl(DeclData),
    TypeAliasDecl(DeclData),
    VarDecl(DeclData),
    FieldDecl(DeclData),
    ParmVarDecl(DeclData),
    NamespaceDecl(DeclData),
    ObjCInterfaceDecl(DeclData),
    ObjCMethodDecl(DeclData),

    // --- Expressions ---
    DeclRefExpr(RefExprData),
    MemberExpr(MemberExprData),
    ObjCMessageExpr(MessageExprData),
    ConstantExpr(ValueData),
    IntegerLiteral(ValueData),

    // --- Documentation comments ---
    FullComment(CommentData),
    ParagraphComment(CommentData),
    TextComment(TextData),

    // --- Catch-all ---
    // Locations must still be deserialized: clang-ast tracks the current
    // file across the stream and every later node depends on it.
    #[allow(dead_code)]
    Other {
        #[serde(default)]
        loc: Option<SourceLocation>,
        #[serde(default)]
        range: Option<SourceRange>,
    },
}

/// Fields shared by declaration nodes. Most are kind specific and optional.
#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct DeclData {
    pub name: Option<String>,
    pub loc: Option<SourceLocation>,
    pub range: Option<SourceRange>,
    pub is_implicit: Option<bool>,
    #[serde(rename = "type")]
    pub ty: Option<QualType>,
    /// `struct`, `class` or `union` on record declarations.
    pub tag_used: Option<String>,
    pub storage_class: Option<String>,
    /// Objective-C methods only.
    pub return_type: Option<QualType>,
    pub instance: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct RefExprData {
    pub range: Option<SourceRange>,
    pub referenced_decl: Option<ReferencedDecl>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct MemberExprData {
    pub range: Option<SourceRange>,
    pub name: Option<String>,
    pub referenced_member_decl: Option<Id>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct MessageExprData {
    pub range: Option<SourceRange>,
    #[serde(rename = "type")]
    pub ty: Option<QualType>,
    pub selector: Option<String>,
    pub decl: Option<ReferencedDecl>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct ValueData {
    #[allow(dead_code)]
    pub range: Option<SourceRange>,
    pub value: Option<String>,
}

#[allow(dead_code)]
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct CommentData {
    pub loc: Option<SourceLocation>,
    pub range: Option<SourceRange>,
}

#[allow(dead_code)]
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct TextData {
    pub loc: Option<SourceLocation>,
    pub range: Option<SourceRange>,
    pub text: Option<String>,
}

/// Inline summary of a referenced declaration.
#[derive(Deserialize, Debug)]
pub struct ReferencedDecl {
    pub id: Id,
    pub name: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct QualType {
    #[serde(rename = "qualType")]
    pub qual_type: Option<String>,
}

impl DeclData {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    pub fn is_implicit(&self) -> bool {
        self.is_implicit.unwrap_or(false)
    }

    pub fn qual_type(&self) -> Option<&str> {
        self.ty.as_ref().and_then(|t| t.qual_type.as_deref())
    }

    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_ref().and_then(|t| t.qual_type.as_deref())
    }

    pub fn is_static(&self) -> bool {
        self.storage_class.as_deref() == Some("static")
    }
}

/// Location where a declaration is written, preferring the spelling
/// location so macro-generated declarations point into the macro body.
pub fn spelling_loc(loc: &SourceLocation) -> Option<&BareSourceLocation> {
    loc.spelling_loc.as_ref().or(loc.expansion_loc.as_ref())
}

/// Location the user sees, preferring where a macro was expanded.
pub fn resolve_loc(loc: &SourceLocation) -> Option<&BareSourceLocation> {
    loc.expansion_loc.as_ref().or(loc.spelling_loc.as_ref())
}
