//! Flat, parent-first traversal of a schema forest.
//!
//! References are leaves here: their target is a root of the same forest and
//! gets visited there, so walking never loops on self-referential types.
use crate::schema::SchemaNode;

/// Pre-order iterator over every node reachable from `forest`.
pub struct Flatten<'a> {
    stack: Vec<&'a SchemaNode>,
}

impl<'a> Iterator for Flatten<'a> {
    type Item = &'a SchemaNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

pub fn flatten(forest: &[SchemaNode]) -> Flatten<'_> {
    Flatten {
        stack: forest.iter().rev().collect(),
    }
}

/// Visit every node mutably, in the same order as [`flatten`], together with its
/// flat index.
pub fn for_each_mut<F>(forest: &mut [SchemaNode], mut f: F)
where
    F: FnMut(usize, &mut SchemaNode),
{
    fn go<F: FnMut(usize, &mut SchemaNode)>(node: &mut SchemaNode, next: &mut usize, f: &mut F) {
        f(*next, node);
        *next += 1;
        for child in &mut node.children {
            go(child, next, f);
        }
    }
    let mut next = 0;
    for root in forest {
        go(root, &mut next, &mut f);
    }
}

/// Like [`for_each_mut`] but stops at the first error.
pub fn try_for_each_mut<E, F>(forest: &mut [SchemaNode], mut f: F) -> Result<(), E>
where
    F: FnMut(usize, &mut SchemaNode) -> Result<(), E>,
{
    fn go<E, F>(node: &mut SchemaNode, next: &mut usize, f: &mut F) -> Result<(), E>
    where
        F: FnMut(usize, &mut SchemaNode) -> Result<(), E>,
    {
        f(*next, node)?;
        *next += 1;
        for child in &mut node.children {
            go(child, next, f)?;
        }
        Ok(())
    }
    let mut next = 0;
    for root in forest {
        go(root, &mut next, &mut f)?;
    }
    Ok(())
}
