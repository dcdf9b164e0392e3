use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::ast::Span;
use crate::error::{ExtractError, Result};
use crate::schema::{DeclId, SchemaKind, SchemaNode};

/// Arena of `declaration` nodes, indexed by declared name.
///
/// One table lives for exactly one extraction run. References hold a [`DeclId`]
/// into it instead of owning a copy of the target, which is what lets a
/// declaration refer to itself.
#[derive(Clone, Debug, Default)]
pub struct DeclarationTable {
    decls: Vec<SchemaNode>,
    by_name: IndexMap<String, DeclId>,
}

impl DeclarationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a finished declaration. Names are unique per run.
    pub fn insert(&mut self, decl: SchemaNode) -> Result<DeclId> {
        debug_assert_eq!(decl.kind, SchemaKind::Declaration);
        let id = DeclId(self.decls.len());
        match self.by_name.entry(decl.name.clone()) {
            Entry::Occupied(existing) => {
                let first: Span = self.decls[existing.get().0].source_range;
                Err(ExtractError::DuplicateDeclaration {
                    name: decl.name,
                    first,
                    second: decl.source_range,
                })
            }
            Entry::Vacant(slot) => {
                slot.insert(id);
                self.decls.push(decl);
                Ok(id)
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<DeclId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: DeclId) -> &SchemaNode {
        &self.decls[id.0]
    }

    pub fn by_name(&self, name: &str) -> Option<&SchemaNode> {
        self.lookup(name).map(|id| self.get(id))
    }

    /// Every declaration in source order.
    pub fn declarations(&self) -> &[SchemaNode] {
        &self.decls
    }

    pub(crate) fn declarations_mut(&mut self) -> &mut [SchemaNode] {
        &mut self.decls
    }

    /// Name index alongside the mutable arena, for in-place rewriting.
    pub(crate) fn split_mut(&mut self) -> (&IndexMap<String, DeclId>, &mut [SchemaNode]) {
        (&self.by_name, &mut self.decls)
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &SchemaNode)> {
        self.decls.iter().enumerate().map(|(i, d)| (DeclId(i), d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(name: &str, start: usize) -> SchemaNode {
        SchemaNode::new(name, SchemaKind::Declaration, Span::new(start, start + 10))
    }

    #[test]
    fn lookup_returns_inserted_handle() {
        let mut table = DeclarationTable::new();
        let a = table.insert(decl("A", 0)).unwrap();
        let b = table.insert(decl("B", 20)).unwrap();
        assert_eq!(table.lookup("A"), Some(a));
        assert_eq!(table.lookup("B"), Some(b));
        assert_eq!(table.lookup("C"), None);
        assert_eq!(table.get(b).name, "B");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut table = DeclarationTable::new();
        table.insert(decl("A", 0)).unwrap();
        let err = table.insert(decl("A", 40)).unwrap_err();
        assert_eq!(
            err,
            ExtractError::DuplicateDeclaration {
                name: "A".into(),
                first: Span::new(0, 10),
                second: Span::new(40, 50),
            }
        );
        assert_eq!(table.len(), 1);
    }
}
