//! One extraction run: declarations + comments in, [`SchemaSet`] out.
use tracing::debug;

use crate::annotations;
use crate::ast::{Comment, Declaration, SourceFile};
use crate::comments;
use crate::error::Result;
use crate::flatten::{self, Flatten};
use crate::resolve;
use crate::schema::{DeclId, SchemaKind, SchemaNode};
use crate::table::DeclarationTable;

/// Finished schema forest, keyed by declared name in source order.
#[derive(Clone, Debug)]
pub struct SchemaSet {
    table: DeclarationTable,
}

impl SchemaSet {
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.table.by_name(name)
    }

    pub fn declaration(&self, id: DeclId) -> &SchemaNode {
        self.table.get(id)
    }

    /// Target of a `reference` node; `None` for every other kind.
    pub fn referenced(&self, node: &SchemaNode) -> Option<&SchemaNode> {
        match node.kind {
            SchemaKind::Reference(id) => Some(self.table.get(id)),
            _ => None,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (DeclId, &SchemaNode)> {
        self.table.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.table.declarations().iter().map(|d| d.name.as_str())
    }

    pub fn declarations(&self) -> &[SchemaNode] {
        self.table.declarations()
    }

    /// Every node of the forest, parent first.
    pub fn nodes(&self) -> Flatten<'_> {
        flatten::flatten(self.table.declarations())
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

pub fn extract(file: &SourceFile) -> Result<SchemaSet> {
    extract_parts(&file.declarations, &file.comments)
}

/// Translate, backfill, attach comments, decode annotations. The first error
/// aborts the run.
pub fn extract_parts(declarations: &[Declaration], comments: &[Comment]) -> Result<SchemaSet> {
    let mut table = resolve::build_table(declarations)?;
    resolve::backfill(&mut table)?;

    let forest = table.declarations_mut();
    let attached = comments::attach_comments(forest, comments)?;
    let decoded = annotations::decode_forest(forest);
    debug!(attached, decoded, "comments applied");

    Ok(SchemaSet { table })
}
