//! Input AST handed over by the external TypeScript parser.
//!
//! The shapes follow the usual `type`-tagged JSON dumps of TS parsers
//! (`TsTypeLiteral`, `TsPropertySignature`, ...), trimmed down to what the
//! extractor reads. Every node kind the extractor refuses still has its own
//! variant so the error can name it.
use serde::Deserialize;

// ————————————————————————————————————————————————————————————————————————————
// SPANS
// ————————————————————————————————————————————————————————————————————————————

/// Byte range `[start, end)` in the original source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// DOCUMENT
// ————————————————————————————————————————————————————————————————————————————

/// One parsed source file: its top-level declarations and every comment.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SourceFile {
    pub declarations: Vec<Declaration>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Comment {
    /// Comment body without the `/*` `*/` (or `//`) delimiters.
    #[serde(default)]
    pub text: Option<String>,
    pub span: Span,
}

impl Comment {
    /// Text of the comment, `None` when it carries nothing worth attaching.
    pub fn body(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type")]
pub enum Declaration {
    #[serde(rename_all = "camelCase")]
    TsInterfaceDeclaration {
        span: Span,
        id: String,
        #[serde(default)]
        body: Vec<TypeMember>,
    },
    #[serde(rename_all = "camelCase")]
    TsTypeAliasDeclaration {
        span: Span,
        id: String,
        type_annotation: TypeNode,
    },
    /// `export interface ...` / `export type ...`. Only the inner declaration
    /// is looked at; its span is the one that counts.
    ExportDeclaration {
        #[serde(default)]
        span: Span,
        declaration: Box<Declaration>,
    },
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::TsInterfaceDeclaration { id, .. }
            | Declaration::TsTypeAliasDeclaration { id, .. } => id,
            Declaration::ExportDeclaration { declaration, .. } => declaration.name(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Declaration::TsInterfaceDeclaration { span, .. }
            | Declaration::TsTypeAliasDeclaration { span, .. } => *span,
            Declaration::ExportDeclaration { declaration, .. } => declaration.span(),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TYPE NODES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type")]
pub enum TypeNode {
    TsKeywordType { span: Span, kind: KeywordKind },
    #[serde(rename_all = "camelCase")]
    TsArrayType { span: Span, elem_type: Box<TypeNode> },
    TsTypeLiteral {
        span: Span,
        #[serde(default)]
        members: Vec<TypeMember>,
    },
    TsUnionType { span: Span, types: Vec<TypeNode> },
    TsIntersectionType { span: Span, types: Vec<TypeNode> },
    #[serde(rename_all = "camelCase")]
    TsParenthesizedType { span: Span, type_annotation: Box<TypeNode> },
    TsLiteralType { span: Span, literal: Literal },
    #[serde(rename_all = "camelCase")]
    TsTypeReference {
        span: Span,
        type_name: TypeName,
        #[serde(default)]
        type_params: Option<serde_json::Value>,
    },

    // not part of the supported grammar
    TsFunctionType { span: Span },
    TsConstructorType { span: Span },
    TsTupleType { span: Span },
    TsOptionalType { span: Span },
    TsRestType { span: Span },
    TsConditionalType { span: Span },
    TsMappedType { span: Span },
    TsTypeOperator { span: Span },
    TsIndexedAccessType { span: Span },
    TsTypeQuery { span: Span },
    TsInferType { span: Span },
    TsThisType { span: Span },
    TsImportType { span: Span },
    TsTypePredicate { span: Span },
}

impl TypeNode {
    /// Node kind as it appears in the `type` tag.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeNode::TsKeywordType { .. } => "TsKeywordType",
            TypeNode::TsArrayType { .. } => "TsArrayType",
            TypeNode::TsTypeLiteral { .. } => "TsTypeLiteral",
            TypeNode::TsUnionType { .. } => "TsUnionType",
            TypeNode::TsIntersectionType { .. } => "TsIntersectionType",
            TypeNode::TsParenthesizedType { .. } => "TsParenthesizedType",
            TypeNode::TsLiteralType { .. } => "TsLiteralType",
            TypeNode::TsTypeReference { .. } => "TsTypeReference",
            TypeNode::TsFunctionType { .. } => "TsFunctionType",
            TypeNode::TsConstructorType { .. } => "TsConstructorType",
            TypeNode::TsTupleType { .. } => "TsTupleType",
            TypeNode::TsOptionalType { .. } => "TsOptionalType",
            TypeNode::TsRestType { .. } => "TsRestType",
            TypeNode::TsConditionalType { .. } => "TsConditionalType",
            TypeNode::TsMappedType { .. } => "TsMappedType",
            TypeNode::TsTypeOperator { .. } => "TsTypeOperator",
            TypeNode::TsIndexedAccessType { .. } => "TsIndexedAccessType",
            TypeNode::TsTypeQuery { .. } => "TsTypeQuery",
            TypeNode::TsInferType { .. } => "TsInferType",
            TypeNode::TsThisType { .. } => "TsThisType",
            TypeNode::TsImportType { .. } => "TsImportType",
            TypeNode::TsTypePredicate { .. } => "TsTypePredicate",
        }
    }

    pub fn span(&self) -> Span {
        match self {
            TypeNode::TsKeywordType { span, .. }
            | TypeNode::TsArrayType { span, .. }
            | TypeNode::TsTypeLiteral { span, .. }
            | TypeNode::TsUnionType { span, .. }
            | TypeNode::TsIntersectionType { span, .. }
            | TypeNode::TsParenthesizedType { span, .. }
            | TypeNode::TsLiteralType { span, .. }
            | TypeNode::TsTypeReference { span, .. }
            | TypeNode::TsFunctionType { span }
            | TypeNode::TsConstructorType { span }
            | TypeNode::TsTupleType { span }
            | TypeNode::TsOptionalType { span }
            | TypeNode::TsRestType { span }
            | TypeNode::TsConditionalType { span }
            | TypeNode::TsMappedType { span }
            | TypeNode::TsTypeOperator { span }
            | TypeNode::TsIndexedAccessType { span }
            | TypeNode::TsTypeQuery { span }
            | TypeNode::TsInferType { span }
            | TypeNode::TsThisType { span }
            | TypeNode::TsImportType { span }
            | TypeNode::TsTypePredicate { span } => *span,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordKind {
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    Any,
    Unknown,
    Never,
    Void,
    Object,
    Symbol,
    #[serde(rename = "bigint")]
    BigInt,
    Intrinsic,
}

impl KeywordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            KeywordKind::String => "string",
            KeywordKind::Number => "number",
            KeywordKind::Boolean => "boolean",
            KeywordKind::Null => "null",
            KeywordKind::Undefined => "undefined",
            KeywordKind::Any => "any",
            KeywordKind::Unknown => "unknown",
            KeywordKind::Never => "never",
            KeywordKind::Void => "void",
            KeywordKind::Object => "object",
            KeywordKind::Symbol => "symbol",
            KeywordKind::BigInt => "bigint",
            KeywordKind::Intrinsic => "intrinsic",
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type")]
pub enum Literal {
    StringLiteral { value: String },
    NumericLiteral { value: f64 },
    BooleanLiteral { value: bool },
    BigIntLiteral { value: String },
    TemplateLiteral {},
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type")]
pub enum TypeName {
    Identifier { value: String },
    TsQualifiedName { left: Box<TypeName>, right: String },
}

// ————————————————————————————————————————————————————————————————————————————
// MEMBERS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type")]
pub enum TypeMember {
    #[serde(rename_all = "camelCase")]
    TsPropertySignature {
        span: Span,
        key: PropertyKey,
        #[serde(default)]
        type_annotation: Option<TypeNode>,
    },
    TsMethodSignature { span: Span },
    TsIndexSignature { span: Span },
    TsCallSignatureDeclaration { span: Span },
    TsConstructSignatureDeclaration { span: Span },
    TsGetterSignature { span: Span },
    TsSetterSignature { span: Span },
}

impl TypeMember {
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeMember::TsPropertySignature { .. } => "TsPropertySignature",
            TypeMember::TsMethodSignature { .. } => "TsMethodSignature",
            TypeMember::TsIndexSignature { .. } => "TsIndexSignature",
            TypeMember::TsCallSignatureDeclaration { .. } => "TsCallSignatureDeclaration",
            TypeMember::TsConstructSignatureDeclaration { .. } => "TsConstructSignatureDeclaration",
            TypeMember::TsGetterSignature { .. } => "TsGetterSignature",
            TypeMember::TsSetterSignature { .. } => "TsSetterSignature",
        }
    }

    pub fn span(&self) -> Span {
        match self {
            TypeMember::TsPropertySignature { span, .. }
            | TypeMember::TsMethodSignature { span }
            | TypeMember::TsIndexSignature { span }
            | TypeMember::TsCallSignatureDeclaration { span }
            | TypeMember::TsConstructSignatureDeclaration { span }
            | TypeMember::TsGetterSignature { span }
            | TypeMember::TsSetterSignature { span } => *span,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type")]
pub enum PropertyKey {
    Identifier { value: String },
    StringLiteral { value: String },
    NumericLiteral { value: f64 },
    Computed {},
}

impl PropertyKey {
    pub fn kind_name(&self) -> &'static str {
        match self {
            PropertyKey::Identifier { .. } => "Identifier",
            PropertyKey::StringLiteral { .. } => "StringLiteral",
            PropertyKey::NumericLiteral { .. } => "NumericLiteral",
            PropertyKey::Computed {} => "Computed",
        }
    }
}
