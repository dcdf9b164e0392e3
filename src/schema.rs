//! The schema tree produced by an extraction run.
use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::ast::Span;

/// Label given to the single child of an `array` node.
pub const ARRAY_ELEMENT_LABEL: &str = "ofString";

/// Handle into the declaration arena of a [`crate::table::DeclarationTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclId(pub(crate) usize);

#[derive(Clone, Debug, PartialEq)]
pub enum SchemaKind {
    String,
    Number,
    Boolean,
    Null,
    Array,
    Object,
    Union,
    Intersection,
    StringLiteral(String),
    NumberLiteral(OrderedFloat<f64>),
    BooleanLiteral(bool),
    /// Resolved link to another declaration. The target is owned by the table.
    Reference(DeclId),
    /// Placeholder until the backfill pass has seen every declaration.
    UnresolvedReference(String),
    Declaration,
}

impl SchemaKind {
    /// Name used in the JSON output and the tree view.
    pub fn label(&self) -> &'static str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Null => "null",
            SchemaKind::Array => "array",
            SchemaKind::Object => "object",
            SchemaKind::Union => "union",
            SchemaKind::Intersection => "intersection",
            SchemaKind::StringLiteral(_) => "stringLiteral",
            SchemaKind::NumberLiteral(_) => "numberLiteral",
            SchemaKind::BooleanLiteral(_) => "booleanLiteral",
            SchemaKind::Reference(_) => "reference",
            SchemaKind::UnresolvedReference(_) => "unresolvedReference",
            SchemaKind::Declaration => "declaration",
        }
    }

    pub fn literal_value(&self) -> Option<LiteralValue<'_>> {
        match self {
            SchemaKind::StringLiteral(s) => Some(LiteralValue::String(s)),
            SchemaKind::NumberLiteral(n) => Some(LiteralValue::Number(n.0)),
            SchemaKind::BooleanLiteral(b) => Some(LiteralValue::Boolean(*b)),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LiteralValue<'a> {
    String(&'a str),
    Number(f64),
    Boolean(bool),
}

/// Decoded value of one `@tag` in a documentation comment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    String(String),
    Number(OrderedFloat<f64>),
    Boolean(bool),
    List(Vec<String>),
}

impl AnnotationValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AnnotationValue::Number(n) => Some(n.0),
            _ => None,
        }
    }
}

impl std::fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnnotationValue::String(s) => f.write_str(s),
            AnnotationValue::Number(n) => write!(f, "{}", n.0),
            AnnotationValue::Boolean(b) => write!(f, "{b}"),
            AnnotationValue::List(xs) => f.write_str(&xs.join(",")),
        }
    }
}

/// Tag name → decoded value, in the order tags first appear.
pub type Annotations = IndexMap<String, AnnotationValue>;

#[derive(Clone, Debug, PartialEq)]
pub struct SchemaNode {
    pub name: String,
    pub kind: SchemaKind,
    pub children: Vec<SchemaNode>,
    pub source_range: Span,
    pub raw_comment: Option<String>,
    pub annotations: Option<Annotations>,
}

impl SchemaNode {
    pub fn new(name: impl Into<String>, kind: SchemaKind, source_range: Span) -> Self {
        Self {
            name: name.into(),
            kind,
            children: Vec::new(),
            source_range,
            raw_comment: None,
            annotations: None,
        }
    }

    pub fn with_children(mut self, children: Vec<SchemaNode>) -> Self {
        self.children = children;
        self
    }

    pub fn child(&self, name: &str) -> Option<&SchemaNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn annotation(&self, tag: &str) -> Option<&AnnotationValue> {
        self.annotations.as_ref()?.get(tag)
    }
}
