//! Declaration pass and forward-reference backfill.
use tracing::{debug, trace};

use crate::ast::{Declaration, TypeNode};
use crate::error::{ExtractError, Result};
use crate::flatten;
use crate::schema::{SchemaKind, SchemaNode};
use crate::table::DeclarationTable;
use crate::translate::{translate_member, translate_type};

/// Translate one top-level declaration into its `declaration` node.
pub fn translate_declaration(table: &DeclarationTable, decl: &Declaration) -> Result<SchemaNode> {
    let name = decl.name();
    let span = decl.span();
    if name.is_empty() {
        return Err(ExtractError::malformed("<anonymous>", "declaration has no name", span));
    }

    let children = match decl {
        Declaration::TsInterfaceDeclaration { body, .. } => body
            .iter()
            .map(|m| translate_member(table, m))
            .collect::<Result<Vec<_>>>()?,
        Declaration::TsTypeAliasDeclaration { type_annotation, .. } => match type_annotation {
            TypeNode::TsTypeLiteral { members, .. } => members
                .iter()
                .map(|m| translate_member(table, m))
                .collect::<Result<Vec<_>>>()?,
            other => vec![translate_type(table, name, other, span)?],
        },
        Declaration::ExportDeclaration { declaration, .. } => {
            return translate_declaration(table, declaration);
        }
    };

    Ok(SchemaNode::new(name, SchemaKind::Declaration, span).with_children(children))
}

/// First pass: translate every declaration in source order into a fresh table.
///
/// References to names declared further down stay unresolved; call
/// [`backfill`] afterwards.
pub fn build_table(declarations: &[Declaration]) -> Result<DeclarationTable> {
    let mut table = DeclarationTable::new();
    for decl in declarations {
        let node = translate_declaration(&table, decl)?;
        trace!(name = %node.name, children = node.children.len(), "declared");
        table.insert(node)?;
    }
    debug!(declarations = table.len(), "declaration pass done");
    Ok(table)
}

/// Second pass: rewrite every `UnresolvedReference` anywhere in the forest.
pub fn backfill(table: &mut DeclarationTable) -> Result<()> {
    let (index, decls) = table.split_mut();
    let mut resolved = 0usize;
    flatten::try_for_each_mut(decls, |_, node| {
        let SchemaKind::UnresolvedReference(target) = &node.kind else {
            return Ok(());
        };
        match index.get(target.as_str()) {
            Some(&id) => {
                node.kind = SchemaKind::Reference(id);
                resolved += 1;
                Ok(())
            }
            None => Err(ExtractError::UnresolvedReference {
                name: target.clone(),
                range: node.source_range,
            }),
        }
    })?;
    debug!(resolved, "backfill pass done");
    Ok(())
}
