// ————————————————————————————————————————————————————————————————————————————
// OUTPUT VIEWS OVER A SCHEMA SET
// ————————————————————————————————————————————————————————————————————————————

use colored::Colorize;
use serde_json::{Map, Value, json};

use crate::extract::SchemaSet;
use crate::schema::{DeclId, SchemaKind, SchemaNode};

#[derive(Clone, Copy, Debug, Default)]
pub struct EmitOptions {
    /// Add `sourceRange: [start, end]` to every node.
    pub include_ranges: bool,
}

/// JSON object keyed by declared name.
///
/// A reference renders its target declaration inline as its only child. When
/// that declaration is already open further up the same path the child list is
/// left empty; `referenceName` still names the target.
pub fn schema_set_to_json(set: &SchemaSet, opts: &EmitOptions) -> Value {
    let mut out = Map::new();
    let mut open = Vec::new();
    for (id, decl) in set.entries() {
        open.push(id);
        out.insert(decl.name.clone(), node_to_json(set, decl, opts, &mut open));
        open.pop();
    }
    Value::Object(out)
}

fn node_to_json(set: &SchemaSet, node: &SchemaNode, opts: &EmitOptions, open: &mut Vec<DeclId>) -> Value {
    let mut o = json!({
        "name": node.name,
        "kind": node.kind.label(),
    });

    let children = match &node.kind {
        SchemaKind::Reference(id) => {
            let target = set.declaration(*id);
            o["referenceName"] = Value::from(target.name.clone());
            if open.contains(id) {
                Vec::new()
            } else {
                open.push(*id);
                let inner = node_to_json(set, target, opts, open);
                open.pop();
                vec![inner]
            }
        }
        _ => node
            .children
            .iter()
            .map(|c| node_to_json(set, c, opts, open))
            .collect(),
    };
    o["children"] = Value::Array(children);

    if let Some(v) = node.kind.literal_value() {
        o["literalValue"] = serde_json::to_value(v).unwrap_or(Value::Null);
    }
    if let SchemaKind::UnresolvedReference(name) = &node.kind {
        o["referenceName"] = Value::from(name.clone());
    }
    if let Some(text) = &node.raw_comment {
        o["rawComment"] = Value::from(text.clone());
    }
    if let Some(annotations) = &node.annotations {
        o["annotations"] = serde_json::to_value(annotations).unwrap_or(Value::Null);
    }
    if opts.include_ranges {
        o["sourceRange"] = json!([node.source_range.start, node.source_range.end]);
    }
    o
}

// ————————————————————————————————————————————————————————————————————————————
// TREE VIEW
// ————————————————————————————————————————————————————————————————————————————

const INDENT: usize = 4;

/// Indented `name: kind` listing with annotations printed above each node.
/// Colors follow the `colored` crate's global switch.
pub fn render_tree(set: &SchemaSet) -> String {
    let mut out = String::new();
    for decl in set.declarations() {
        render_node(set, decl, 0, &mut out);
        out.push('\n');
    }
    out
}

fn render_node(set: &SchemaSet, node: &SchemaNode, level: usize, out: &mut String) {
    let pad = " ".repeat(level * INDENT);
    if let Some(annotations) = &node.annotations {
        for (key, value) in annotations {
            out.push_str(&format!("{pad}{}: {}\n", key.blue(), value.to_string().green()));
        }
    }
    match set.referenced(node) {
        // don't descend: the target is printed at top level
        Some(target) => out.push_str(&format!("{pad}{}: {} -> {}\n", node.name, node.kind.label(), target.name)),
        None => out.push_str(&format!("{pad}{}: {}\n", node.name, node.kind.label())),
    }
    for child in &node.children {
        render_node(set, child, level + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::SourceFile;
    use crate::extract::extract;

    fn file(doc: Value) -> SourceFile {
        serde_json::from_value(doc).unwrap()
    }

    fn kw(kind: &str, start: usize) -> Value {
        json!({ "type": "TsKeywordType", "span": { "start": start, "end": start + 6 }, "kind": kind })
    }

    fn reference(name: &str, start: usize) -> Value {
        json!({
            "type": "TsTypeReference",
            "span": { "start": start, "end": start + name.len() },
            "typeName": { "type": "Identifier", "value": name },
        })
    }

    fn prop(name: &str, ty: Value, start: usize) -> Value {
        json!({
            "type": "TsPropertySignature",
            "span": { "start": start, "end": start + 10 },
            "key": { "type": "Identifier", "value": name },
            "typeAnnotation": ty,
        })
    }

    fn alias(name: &str, start: usize, members: Vec<Value>) -> Value {
        json!({
            "type": "TsTypeAliasDeclaration",
            "span": { "start": start, "end": start + 30 },
            "id": name,
            "typeAnnotation": { "type": "TsTypeLiteral", "span": { "start": start + 9, "end": start + 30 }, "members": members },
        })
    }

    #[test]
    fn plain_declarations() {
        let set = extract(&file(json!({
            "declarations": [alias("A", 0, vec![prop("a", kw("string", 14), 11)])],
        })))
        .unwrap();
        let out = schema_set_to_json(&set, &EmitOptions::default());
        assert_eq!(
            out,
            json!({
                "A": {
                    "name": "A",
                    "kind": "declaration",
                    "children": [{ "name": "a", "kind": "string", "children": [] }],
                }
            })
        );
    }

    #[test]
    fn references_inline_their_target() {
        let set = extract(&file(json!({
            "declarations": [
                alias("A", 0, vec![prop("b", reference("B", 14), 11)]),
                alias("B", 40, vec![prop("x", kw("number", 54), 51)]),
            ],
        })))
        .unwrap();
        let out = schema_set_to_json(&set, &EmitOptions::default());
        let b_ref = &out["A"]["children"][0];
        assert_eq!(b_ref["kind"], "reference");
        assert_eq!(b_ref["referenceName"], "B");
        assert_eq!(b_ref["children"][0], out["B"]);
    }

    #[test]
    fn self_reference_stops_at_the_cycle() {
        let set = extract(&file(json!({
            "declarations": [alias("X", 0, vec![prop("next", reference("X", 18), 12)])],
        })))
        .unwrap();
        let out = schema_set_to_json(&set, &EmitOptions::default());
        let next = &out["X"]["children"][0];
        assert_eq!(next["referenceName"], "X");
        assert_eq!(next["children"], json!([]));
    }

    #[test]
    fn literal_comment_annotations_and_ranges() {
        let set = extract(&file(json!({
            "declarations": [{
                "type": "TsTypeAliasDeclaration",
                "span": { "start": 20, "end": 40 },
                "id": "Mode",
                "typeAnnotation": {
                    "type": "TsLiteralType",
                    "span": { "start": 32, "end": 36 },
                    "literal": { "type": "StringLiteral", "value": "on" },
                },
            }],
            "comments": [{ "text": "* @default on\n * @minimum x", "span": { "start": 0, "end": 19 } }],
        })))
        .unwrap();
        let out = schema_set_to_json(&set, &EmitOptions { include_ranges: true });
        let mode = &out["Mode"];
        assert_eq!(mode["rawComment"], "* @default on\n * @minimum x");
        assert_eq!(mode["annotations"], json!({ "default": "on", "minimum": null }));
        assert_eq!(mode["sourceRange"], json!([20, 40]));
        let lit = &mode["children"][0];
        assert_eq!(lit["kind"], "stringLiteral");
        assert_eq!(lit["literalValue"], "on");
        assert_eq!(lit["sourceRange"], json!([32, 36]));
    }

    #[test]
    fn tree_view_lists_annotations_above_nodes() {
        colored::control::set_override(false);
        let set = extract(&file(json!({
            "declarations": [
                alias("A", 20, vec![prop("b", reference("A", 34), 31)]),
            ],
            "comments": [{ "text": "* @title Top", "span": { "start": 0, "end": 16 } }],
        })))
        .unwrap();
        let tree = render_tree(&set);
        assert_eq!(tree, "title: Top\nA: declaration\n    b: reference -> A\n\n");
    }
}
