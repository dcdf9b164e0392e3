//! Type-AST → schema tree.
//!
//! Union and intersection members reuse the name of the position they sit in,
//! so `b: A & B` yields two children both called `b`. Consumers rely on that.
use ordered_float::OrderedFloat;

use crate::ast::{KeywordKind, Literal, PropertyKey, Span, TypeMember, TypeName, TypeNode};
use crate::error::{ExtractError, Result};
use crate::schema::{ARRAY_ELEMENT_LABEL, SchemaKind, SchemaNode};
use crate::table::DeclarationTable;

fn keyword_kind(kind: KeywordKind, range: Span) -> Result<SchemaKind> {
    match kind {
        KeywordKind::String => Ok(SchemaKind::String),
        KeywordKind::Number => Ok(SchemaKind::Number),
        KeywordKind::Boolean => Ok(SchemaKind::Boolean),
        KeywordKind::Null => Ok(SchemaKind::Null),
        other => Err(ExtractError::unsupported(
            format!("keyword `{}`", other.as_str()),
            range,
        )),
    }
}

/// Translate one type node sitting at a position called `name`.
///
/// Names not yet in `table` become `UnresolvedReference` placeholders; the
/// backfill pass in [`crate::resolve`] settles them once every declaration
/// is known.
pub fn translate_type(
    table: &DeclarationTable,
    name: &str,
    node: &TypeNode,
    range: Span,
) -> Result<SchemaNode> {
    match node {
        TypeNode::TsKeywordType { kind, span } => {
            Ok(SchemaNode::new(name, keyword_kind(*kind, *span)?, range))
        }

        TypeNode::TsArrayType { elem_type, .. } => match elem_type.as_ref() {
            TypeNode::TsKeywordType { kind, span } => {
                let elem = SchemaNode::new(ARRAY_ELEMENT_LABEL, keyword_kind(*kind, *span)?, *span);
                Ok(SchemaNode::new(name, SchemaKind::Array, range).with_children(vec![elem]))
            }
            other => Err(ExtractError::unsupported(
                format!("array of {}", other.kind_name()),
                other.span(),
            )),
        },

        TypeNode::TsTypeLiteral { members, .. } => {
            let fields = members
                .iter()
                .map(|m| translate_member(table, m))
                .collect::<Result<Vec<_>>>()?;
            Ok(SchemaNode::new(name, SchemaKind::Object, range).with_children(fields))
        }

        TypeNode::TsUnionType { types, .. } => {
            let arms = types
                .iter()
                .map(|t| translate_type(table, name, t, range))
                .collect::<Result<Vec<_>>>()?;
            Ok(SchemaNode::new(name, SchemaKind::Union, range).with_children(arms))
        }

        TypeNode::TsIntersectionType { types, span } => {
            let parts = types
                .iter()
                .map(|t| translate_type(table, name, t, range))
                .collect::<Result<Vec<_>>>()?;
            Ok(SchemaNode::new(name, SchemaKind::Intersection, *span).with_children(parts))
        }

        TypeNode::TsParenthesizedType { type_annotation, .. } => {
            translate_type(table, name, type_annotation, range)
        }

        TypeNode::TsLiteralType { literal, span } => {
            let kind = match literal {
                Literal::StringLiteral { value } => SchemaKind::StringLiteral(value.clone()),
                Literal::NumericLiteral { value } => SchemaKind::NumberLiteral(OrderedFloat(*value)),
                Literal::BooleanLiteral { value } => SchemaKind::BooleanLiteral(*value),
                Literal::BigIntLiteral { .. } => {
                    return Err(ExtractError::unsupported("BigIntLiteral", *span));
                }
                Literal::TemplateLiteral {} => {
                    return Err(ExtractError::unsupported("TemplateLiteral", *span));
                }
            };
            Ok(SchemaNode::new(name, kind, *span))
        }

        TypeNode::TsTypeReference { type_name, type_params, span } => {
            let target = match type_name {
                TypeName::Identifier { value } => value,
                TypeName::TsQualifiedName { .. } => {
                    return Err(ExtractError::unsupported("TsQualifiedName", *span));
                }
            };
            if type_params.is_some() {
                return Err(ExtractError::unsupported(
                    format!("generic reference `{target}<..>`"),
                    *span,
                ));
            }
            let kind = match table.lookup(target) {
                Some(id) => SchemaKind::Reference(id),
                None => SchemaKind::UnresolvedReference(target.clone()),
            };
            Ok(SchemaNode::new(name, kind, *span))
        }

        TypeNode::TsFunctionType { .. }
        | TypeNode::TsConstructorType { .. }
        | TypeNode::TsTupleType { .. }
        | TypeNode::TsOptionalType { .. }
        | TypeNode::TsRestType { .. }
        | TypeNode::TsConditionalType { .. }
        | TypeNode::TsMappedType { .. }
        | TypeNode::TsTypeOperator { .. }
        | TypeNode::TsIndexedAccessType { .. }
        | TypeNode::TsTypeQuery { .. }
        | TypeNode::TsInferType { .. }
        | TypeNode::TsThisType { .. }
        | TypeNode::TsImportType { .. }
        | TypeNode::TsTypePredicate { .. } => {
            Err(ExtractError::unsupported(node.kind_name(), node.span()))
        }
    }
}

/// Translate one member of an interface body or object-literal type.
pub fn translate_member(table: &DeclarationTable, member: &TypeMember) -> Result<SchemaNode> {
    let TypeMember::TsPropertySignature { span, key, type_annotation, .. } = member else {
        return Err(ExtractError::unsupported(member.kind_name(), member.span()));
    };
    let name = match key {
        PropertyKey::Identifier { value } if value.is_empty() => {
            return Err(ExtractError::malformed("<member>", "property has an empty name", *span));
        }
        PropertyKey::Identifier { value } => value,
        other => {
            return Err(ExtractError::unsupported(
                format!("{} property key", other.kind_name()),
                *span,
            ));
        }
    };
    let Some(ty) = type_annotation else {
        return Err(ExtractError::malformed(
            name.clone(),
            "property has no type annotation",
            *span,
        ));
    };
    translate_type(table, name, ty, *span)
}
