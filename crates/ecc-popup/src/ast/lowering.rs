use std::collections::HashMap;

use clang_ast::{BareSourceLocation, SourceRange};
use tracing::{debug, warn};

use super::clang_nodes::{Clang, DeclData, MessageExprData, Node, resolve_loc, spelling_loc};
use super::compiler::AstDumpError;
use super::qual_type;
use super::{ClangType, Cursor, CursorKind, Extent, SourceLocation};
use crate::source::comment::strip_comment_markers;
use crate::source::extent::lines_in_range;
use crate::source::macro_parser::find_define;

#[derive(Debug, Clone)]
enum HitTarget {
    /// Declaration node id, reached directly or through a reference.
    Decl(String),
    Message {
        selector: String,
        ty: String,
        method: Option<String>,
    },
}

/// Columns `start..end` of `line` in the main file that resolve to `target`.
#[derive(Debug, Clone)]
struct Hit {
    line: u32,
    start: u32,
    end: u32,
    target: HitTarget,
}

impl Hit {
    fn contains(
        &self,
        line: u32,
        column: u32,
    ) -> bool {
        self.line == line && self.start <= column && column < self.end
    }

    fn width(&self) -> u32 {
        self.end - self.start
    }
}

/// Cursors of one file, lowered from clang's JSON AST dump.
#[derive(Debug)]
pub struct TranslationUnit {
    main_file: String,
    source: String,
    decls: HashMap<String, Cursor>,
    type_locations: HashMap<String, SourceLocation>,
    hits: Vec<Hit>,
}

impl TranslationUnit {
    /// Deserialize `json` (the output of `-ast-dump=json`) for `main_file`.
    pub fn from_json(
        json: &str,
        main_file: &str,
    ) -> Result<Self, AstDumpError> {
        let root: Node = serde_json::from_str(json).map_err(|error| AstDumpError::InvalidJson(error.to_string()))?;
        Ok(Self::from_root(&root, main_file))
    }

    pub(crate) fn from_root(
        root: &Node,
        main_file: &str,
    ) -> Self {
        let mut lowering = Lowering::new(main_file);
        lowering.walk(root);
        debug!(
            "[lowering] {} declarations, {} hits in {main_file}",
            lowering.decls.len(),
            lowering.hits.len()
        );

        let source = std::fs::read_to_string(main_file).unwrap_or_else(|error| {
            warn!("failed to read {main_file}: {error}");
            String::new()
        });

        Self {
            main_file: main_file.to_string(),
            source,
            decls: lowering.decls,
            type_locations: lowering.type_locations,
            hits: lowering.hits,
        }
    }

    pub fn main_file(&self) -> &str {
        &self.main_file
    }

    pub fn declaration_count(&self) -> usize {
        self.decls.len()
    }

    /// Cursor under 1-based `line`/`column` of the main file.
    ///
    /// Macro names win over AST nodes, since nodes expanded from a macro
    /// report the macro's position. References resolve to the declaration
    /// they name; the narrowest node covering the position is used.
    pub fn cursor_at(
        &self,
        line: u32,
        column: u32,
    ) -> Option<Cursor> {
        if let Some(cursor) = self.macro_at(line, column) {
            return Some(cursor);
        }

        let hit = self.hits.iter().filter(|h| h.contains(line, column)).min_by_key(|h| h.width())?;
        let mut cursor = match &hit.target {
            HitTarget::Decl(id) => self.decls.get(id)?.clone(),
            HitTarget::Message { selector, ty, method } => Cursor {
                kind: CursorKind::ObjcMessageExpr,
                spelling: selector.clone(),
                ty: ClangType::new(ty.clone()),
                referenced: method.as_ref().and_then(|id| self.decls.get(id)).cloned().map(Box::new),
                ..Cursor::default()
            },
        };
        self.resolve_types(&mut cursor);
        Some(cursor)
    }

    fn macro_at(
        &self,
        line: u32,
        column: u32,
    ) -> Option<Cursor> {
        let lines: Vec<&str> = self.source.lines().collect();
        let text = lines.get((line as usize).checked_sub(1)?)?;
        let word = word_at(text, column)?;
        let (define_line, define_column) = find_define(&lines, word)?;

        let raw_comment = preceding_comment(&lines, define_line);
        let brief_comment = raw_comment.as_deref().map(first_paragraph).filter(|b| !b.is_empty());
        Some(Cursor {
            kind: CursorKind::MacroDefinition,
            spelling: word.to_string(),
            location: Some(SourceLocation::new(self.main_file.clone(), define_line, define_column)),
            brief_comment,
            raw_comment,
            ..Cursor::default()
        })
    }

    fn resolve_types(
        &self,
        cursor: &mut Cursor,
    ) {
        self.resolve_type(&mut cursor.ty);
        self.resolve_type(&mut cursor.result_type);
        for arg in &mut cursor.arguments {
            self.resolve_types(arg);
        }
        if let Some(referenced) = cursor.referenced.as_deref_mut() {
            self.resolve_types(referenced);
        }
    }

    fn resolve_type(
        &self,
        ty: &mut ClangType,
    ) {
        if !ty.has_spelling() {
            return;
        }
        match qual_type::pointee(&ty.spelling) {
            Some(pointee) => {
                let declaration = self.type_declaration(pointee);
                ty.pointee = Some(Box::new(ClangType {
                    spelling: pointee.to_string(),
                    declaration,
                    pointee: None,
                }));
            },
            None => ty.declaration = self.type_declaration(&ty.spelling),
        }
    }

    fn type_declaration(
        &self,
        spelling: &str,
    ) -> Option<SourceLocation> {
        qual_type::declared_name(spelling).and_then(|name| self.type_locations.get(name)).cloned()
    }
}

struct Lowering<'a> {
    main_file: &'a str,
    main_file_matches: HashMap<String, bool>,
    sources: HashMap<String, Option<String>>,
    decls: HashMap<String, Cursor>,
    type_locations: HashMap<String, SourceLocation>,
    enum_values: HashMap<String, i64>,
    hits: Vec<Hit>,
}

impl<'a> Lowering<'a> {
    fn new(main_file: &'a str) -> Self {
        Self {
            main_file,
            main_file_matches: HashMap::new(),
            sources: HashMap::new(),
            decls: HashMap::new(),
            type_locations: HashMap::new(),
            enum_values: HashMap::new(),
            hits: Vec::new(),
        }
    }

    fn walk(
        &mut self,
        node: &Node,
    ) {
        match &node.kind {
            Clang::FunctionDecl(d) => self.function(node, d, CursorKind::FunctionDecl),
            Clang::CXXMethodDecl(d) => self.function(node, d, CursorKind::CxxMethod),
            Clang::CXXConstructorDecl(d) => self.function(node, d, CursorKind::Constructor),
            Clang::CXXDestructorDecl(d) => self.function(node, d, CursorKind::Destructor),
            Clang::CXXConversionDecl(d) => self.function(node, d, CursorKind::ConversionFunction),
            Clang::FunctionTemplateDecl(d) => self.function_template(node, d),
            Clang::ClassTemplateDecl(d) => self.type_decl(node, d, CursorKind::ClassTemplate),
            Clang::RecordDecl(d) | Clang::CXXRecordDecl(d) => self.type_decl(node, d, record_kind(d)),
            Clang::EnumDecl(d) => {
                self.collect_enum_values(node);
                self.type_decl(node, d, CursorKind::EnumDecl);
            },
            Clang::TypedefDecl(d) => self.type_decl(node, d, CursorKind::TypedefDecl),
            Clang::TypeAliasDecl(d) => self.type_decl(node, d, CursorKind::TypeAliasDecl),
            Clang::ObjCInterfaceDecl(d) => self.type_decl(node, d, CursorKind::ObjcInterfaceDecl),
            Clang::EnumConstantDecl(d) => self.enum_constant(node, d),
            Clang::VarDecl(d) => self.value_decl(node, d, CursorKind::VarDecl),
            Clang::FieldDecl(d) => self.value_decl(node, d, CursorKind::FieldDecl),
            Clang::ParmVarDecl(d) => self.value_decl(node, d, CursorKind::ParmDecl),
            Clang::NamespaceDecl(d) => self.value_decl(node, d, CursorKind::Namespace),
            Clang::ObjCMethodDecl(d) => self.objc_method(node, d),
            Clang::DeclRefExpr(r) => {
                if let (Some(range), Some(decl)) = (&r.range, &r.referenced_decl)
                    && let Some(anchor) = name_token(range, decl.name.as_deref())
                {
                    let len = decl.name.as_deref().map_or(anchor.tok_len, str::len);
                    self.hit(anchor, len, HitTarget::Decl(decl.id.to_string()));
                }
            },
            Clang::MemberExpr(m) => {
                // The member name is the last token of the expression.
                if let (Some(range), Some(id)) = (&m.range, &m.referenced_member_decl)
                    && let Some(end) = resolve_loc(&range.end)
                {
                    let len = m.name.as_deref().map_or(end.tok_len, str::len);
                    self.hit(end, len, HitTarget::Decl(id.to_string()));
                }
            },
            Clang::ObjCMessageExpr(m) => self.message(m),
            Clang::ConstantExpr(_)
            | Clang::IntegerLiteral(_)
            | Clang::FullComment(_)
            | Clang::ParagraphComment(_)
            | Clang::TextComment(_)
            | Clang::Other { .. } => {},
        }

        for child in &node.inner {
            self.walk(child);
        }
    }

    /// Cursor fields every declaration shares. `None` for implicit or
    /// unnamed declarations.
    fn base_cursor(
        &mut self,
        node: &Node,
        d: &DeclData,
        kind: CursorKind,
    ) -> Option<Cursor> {
        if d.is_implicit() {
            return None;
        }
        let name = d.name()?;
        let (brief_comment, raw_comment) = self.documentation(node);
        Some(Cursor {
            kind,
            spelling: name.to_string(),
            location: d.loc.as_ref().and_then(spelling_loc).and_then(to_location),
            extent: d.range.as_ref().and_then(to_extent),
            brief_comment,
            raw_comment,
            ..Cursor::default()
        })
    }

    fn record(
        &mut self,
        node: &Node,
        d: &DeclData,
        cursor: Cursor,
    ) {
        if let Some(bare) = d.loc.as_ref().and_then(resolve_loc) {
            self.hit(bare, cursor.spelling.len(), HitTarget::Decl(node.id.to_string()));
        }
        self.decls.insert(node.id.to_string(), cursor);
    }

    fn function(
        &mut self,
        node: &Node,
        d: &DeclData,
        kind: CursorKind,
    ) {
        let Some(mut cursor) = self.base_cursor(node, d, kind) else {
            return;
        };
        let qual = d.qual_type().unwrap_or_default();
        cursor.ty = ClangType::new(qual);
        cursor.result_type = ClangType::new(qual_type::return_type(qual));
        cursor.arguments = parameters(node);
        if kind != CursorKind::FunctionDecl {
            cursor.is_static_method = d.is_static();
            cursor.is_const_method = qual_type::is_const_method(qual);
        }
        self.record(node, d, cursor);
    }

    fn function_template(
        &mut self,
        node: &Node,
        d: &DeclData,
    ) {
        let Some(mut cursor) = self.base_cursor(node, d, CursorKind::FunctionTemplate) else {
            return;
        };
        let templated = node.inner.iter().find_map(|child| match &child.kind {
            Clang::FunctionDecl(f) => Some((child, f)),
            _ => None,
        });
        if let Some((child, f)) = templated {
            let qual = f.qual_type().unwrap_or_default();
            cursor.ty = ClangType::new(qual);
            cursor.result_type = ClangType::new(qual_type::return_type(qual));
            cursor.arguments = parameters(child);
            if cursor.brief_comment.is_none() && cursor.raw_comment.is_none() {
                let (brief, raw) = self.documentation(child);
                cursor.brief_comment = brief;
                cursor.raw_comment = raw;
            }
        }
        self.record(node, d, cursor);
    }

    fn type_decl(
        &mut self,
        node: &Node,
        d: &DeclData,
        kind: CursorKind,
    ) {
        let Some(mut cursor) = self.base_cursor(node, d, kind) else {
            return;
        };
        cursor.ty = ClangType::new(cursor.spelling.clone());
        if let Some(location) = &cursor.location {
            self.type_locations.insert(cursor.spelling.clone(), location.clone());
        }
        self.record(node, d, cursor);
    }

    fn value_decl(
        &mut self,
        node: &Node,
        d: &DeclData,
        kind: CursorKind,
    ) {
        let Some(mut cursor) = self.base_cursor(node, d, kind) else {
            return;
        };
        cursor.ty = ClangType::new(d.qual_type().unwrap_or_default());
        self.record(node, d, cursor);
    }

    fn enum_constant(
        &mut self,
        node: &Node,
        d: &DeclData,
    ) {
        let Some(mut cursor) = self.base_cursor(node, d, CursorKind::EnumConstantDecl) else {
            return;
        };
        cursor.ty = ClangType::new(d.qual_type().unwrap_or_default());
        cursor.enum_value = self.enum_values.get(&node.id.to_string()).copied();
        self.record(node, d, cursor);
    }

    fn objc_method(
        &mut self,
        node: &Node,
        d: &DeclData,
    ) {
        let kind = if d.instance.unwrap_or(true) {
            CursorKind::ObjcInstanceMethodDecl
        } else {
            CursorKind::ObjcClassMethodDecl
        };
        let Some(mut cursor) = self.base_cursor(node, d, kind) else {
            return;
        };
        let return_type = d.return_type().unwrap_or_default();
        cursor.ty = ClangType::new(return_type);
        cursor.result_type = ClangType::new(return_type);
        cursor.arguments = parameters(node);
        self.record(node, d, cursor);
    }

    fn message(
        &mut self,
        m: &MessageExprData,
    ) {
        let Some(range) = &m.range else {
            return;
        };
        let (Some(begin), Some(end)) = (resolve_loc(&range.begin), resolve_loc(&range.end)) else {
            return;
        };
        if begin.line == 0 || !self.is_main_file(&begin.file) {
            return;
        }
        let line_end = if end.line == begin.line {
            (end.col + end.tok_len.max(1)) as u32
        } else {
            u32::MAX
        };
        self.hits.push(Hit {
            line: begin.line as u32,
            start: begin.col as u32,
            end: line_end,
            target: HitTarget::Message {
                selector: m.selector.clone().unwrap_or_default(),
                ty: m.ty.as_ref().and_then(|t| t.qual_type.clone()).unwrap_or_default(),
                method: m.decl.as_ref().map(|decl| decl.id.to_string()),
            },
        });
    }

    /// Explicit values where an initializer exists, otherwise one more than
    /// the previous enumerator.
    fn collect_enum_values(
        &mut self,
        node: &Node,
    ) {
        let mut next = 0i64;
        for child in &node.inner {
            if let Clang::EnumConstantDecl(_) = &child.kind {
                let value = explicit_value(child).unwrap_or(next);
                self.enum_values.insert(child.id.to_string(), value);
                next = value.wrapping_add(1);
            }
        }
    }

    /// Brief text and raw source of the doc comment attached to `node`.
    fn documentation(
        &mut self,
        node: &Node,
    ) -> (Option<String>, Option<String>) {
        let Some((full_node, full)) = node.inner.iter().find_map(|child| match &child.kind {
            Clang::FullComment(data) => Some((child, data)),
            _ => None,
        }) else {
            return (None, None);
        };

        let brief = full_node.inner.iter().find_map(|child| match &child.kind {
            Clang::ParagraphComment(_) => paragraph_text(child),
            _ => None,
        });
        let raw = full.range.as_ref().and_then(|range| {
            let begin = spelling_loc(&range.begin)?;
            let end = spelling_loc(&range.end)?;
            self.source_lines(&begin.file, begin.line, end.line)
        });
        (brief, raw)
    }

    fn source_lines(
        &mut self,
        file: &str,
        first: usize,
        last: usize,
    ) -> Option<String> {
        let content = self.sources.entry(file.to_string()).or_insert_with(|| match std::fs::read_to_string(file) {
            Ok(content) => Some(content),
            Err(error) => {
                debug!("failed to read {file} for comments: {error}");
                None
            },
        });
        let text = lines_in_range(content.as_deref()?, first as u32, last as u32);
        (!text.is_empty()).then_some(text)
    }

    fn hit(
        &mut self,
        bare: &BareSourceLocation,
        len: usize,
        target: HitTarget,
    ) {
        if bare.line == 0 || !self.is_main_file(&bare.file) {
            return;
        }
        self.hits.push(Hit {
            line: bare.line as u32,
            start: bare.col as u32,
            end: (bare.col + len.max(1)) as u32,
            target,
        });
    }

    fn is_main_file(
        &mut self,
        file: &str,
    ) -> bool {
        if let Some(&matches) = self.main_file_matches.get(file) {
            return matches;
        }
        let matches = paths_equivalent(file, self.main_file);
        self.main_file_matches.insert(file.to_string(), matches);
        matches
    }
}

/// Token holding the referenced name. A qualified reference `ns::foo`
/// begins at the qualifier, so the end token is used when it is the name.
fn name_token<'n>(
    range: &'n SourceRange,
    name: Option<&str>,
) -> Option<&'n BareSourceLocation> {
    let begin = resolve_loc(&range.begin);
    let end = resolve_loc(&range.end);
    match (end, name) {
        (Some(end), Some(name)) if end.tok_len == name.len() => Some(end),
        _ => begin.or(end),
    }
}

fn record_kind(d: &DeclData) -> CursorKind {
    match d.tag_used.as_deref() {
        Some("class") => CursorKind::ClassDecl,
        Some("union") => CursorKind::UnionDecl,
        _ => CursorKind::StructDecl,
    }
}

fn parameters(node: &Node) -> Vec<Cursor> {
    node.inner
        .iter()
        .filter_map(|child| match &child.kind {
            Clang::ParmVarDecl(p) => {
                let mut arg = Cursor::argument(p.qual_type().unwrap_or_default(), p.name().unwrap_or_default());
                arg.location = p.loc.as_ref().and_then(spelling_loc).and_then(to_location);
                Some(arg)
            },
            _ => None,
        })
        .collect()
}

fn explicit_value(node: &Node) -> Option<i64> {
    node.inner.iter().find_map(|child| match &child.kind {
        Clang::ConstantExpr(v) | Clang::IntegerLiteral(v) => {
            v.value.as_deref().and_then(|s| s.parse().ok()).or_else(|| explicit_value(child))
        },
        _ => explicit_value(child),
    })
}

fn paragraph_text(node: &Node) -> Option<String> {
    let words: Vec<&str> = node
        .inner
        .iter()
        .filter_map(|child| match &child.kind {
            Clang::TextComment(t) => t.text.as_deref().map(str::trim),
            _ => None,
        })
        .filter(|t| !t.is_empty())
        .collect();
    (!words.is_empty()).then(|| words.join(" "))
}

fn to_location(bare: &BareSourceLocation) -> Option<SourceLocation> {
    if bare.line == 0 {
        return None;
    }
    Some(SourceLocation {
        file: (!bare.file.is_empty()).then(|| bare.file.to_string()),
        line: bare.line as u32,
        column: bare.col as u32,
    })
}

fn to_extent(range: &SourceRange) -> Option<Extent> {
    let start = spelling_loc(&range.begin).and_then(to_location)?;
    let end = spelling_loc(&range.end).and_then(to_location)?;
    Some(Extent::new(start, end))
}

/// Identifier covering 1-based byte `column` of `line`.
fn word_at(
    line: &str,
    column: u32,
) -> Option<&str> {
    let bytes = line.as_bytes();
    let idx = (column as usize).checked_sub(1)?;
    let is_ident = |b: u8| b.is_ascii_alphanumeric() || b == b'_';
    if !bytes.get(idx).copied().is_some_and(is_ident) {
        return None;
    }
    let mut start = idx;
    while start > 0 && is_ident(bytes[start - 1]) {
        start -= 1;
    }
    let mut end = idx;
    while end < bytes.len() && is_ident(bytes[end]) {
        end += 1;
    }
    let word = &line[start..end];
    (!word.starts_with(|c: char| c.is_ascii_digit())).then_some(word)
}

/// Comment lines directly above 1-based `line`, joined as written.
///
/// `//` lines are taken one by one. A line ending a `/* ... */` block pulls
/// in the whole block; `*` lines outside such a block are code.
fn preceding_comment(
    lines: &[&str],
    line: u32,
) -> Option<String> {
    let mut idx = (line as usize).checked_sub(1)?;
    let mut comment = Vec::new();
    let mut in_block = false;
    while idx > 0 {
        idx -= 1;
        let trimmed = lines[idx].trim();
        if in_block {
            comment.push(lines[idx]);
            in_block = !trimmed.contains("/*");
        } else if trimmed.starts_with("//") {
            comment.push(lines[idx]);
        } else if trimmed.ends_with("*/") {
            comment.push(lines[idx]);
            in_block = !trimmed.starts_with("/*");
        } else {
            break;
        }
    }
    if comment.is_empty() || in_block {
        return None;
    }
    comment.reverse();
    Some(comment.join("\n"))
}

/// First paragraph of a comment with markers stripped, on one line.
fn first_paragraph(raw: &str) -> String {
    strip_comment_markers(raw)
        .into_iter()
        .take_while(|line| !line.is_empty())
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether two paths name the same file, tolerating symlinks.
fn paths_equivalent(
    a: &str,
    b: &str,
) -> bool {
    if a == b {
        return true;
    }
    let (pa, pb) = (std::path::Path::new(a), std::path::Path::new(b));
    match (pa.canonicalize(), pb.canonicalize()) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => false,
    }
}

#[cfg(test)]
#[path = "../../tests/src/ast/lowering_tests.rs"]
mod tests;
