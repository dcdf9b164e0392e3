//! Attaches free-floating comments to the schema node they document.
//!
//! A comment documents whatever starts first after it ends. Distance is not
//! checked, only order.
use tracing::trace;

use crate::ast::Comment;
use crate::error::{ExtractError, Result};
use crate::flatten;
use crate::schema::SchemaNode;

/// Comment text bound for the node at `node` (a flat index, see [`flatten`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    pub node: usize,
    pub text: String,
}

const PREVIEW_LEN: usize = 40;

fn preview(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(PREVIEW_LEN) {
        Some((cut, _)) => format!("{}…", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

/// Pick a target node for every non-empty comment.
///
/// `nodes` is the flat snapshot of the forest. Among nodes starting strictly
/// after the comment's end, the one with the smallest start wins; equal starts
/// go to the earlier node in flat order. Attachments come back in comment
/// order, so applying them in sequence lets a later comment override an earlier
/// one on the same node.
pub fn associate<'a, I>(nodes: I, comments: &[Comment]) -> Result<Vec<Attachment>>
where
    I: IntoIterator<Item = &'a SchemaNode>,
{
    // (start, flat index), sorted; ties keep flat order.
    let mut starts: Vec<(usize, usize)> = nodes
        .into_iter()
        .enumerate()
        .map(|(i, n)| (n.source_range.start, i))
        .collect();
    starts.sort_unstable();

    let mut out = Vec::new();
    for comment in comments {
        let Some(text) = comment.body() else { continue };
        let end = comment.span.end;
        let first_after = starts.partition_point(|&(start, _)| start <= end);
        let Some(&(_, node)) = starts.get(first_after) else {
            return Err(ExtractError::OrphanComment {
                range: comment.span,
                preview: preview(text),
            });
        };
        trace!(comment = %comment.span, node, "attached comment");
        out.push(Attachment { node, text: text.to_string() });
    }
    Ok(out)
}

/// Write attachments into `raw_comment`. Later attachments overwrite earlier ones.
pub fn apply(forest: &mut [SchemaNode], attachments: Vec<Attachment>) {
    let mut by_node: Vec<Option<String>> = Vec::new();
    for Attachment { node, text } in attachments {
        if by_node.len() <= node {
            by_node.resize(node + 1, None);
        }
        by_node[node] = Some(text);
    }
    flatten::for_each_mut(forest, |i, node| {
        if let Some(text) = by_node.get_mut(i).and_then(Option::take) {
            node.raw_comment = Some(text);
        }
    });
}

/// Associate and apply in one step.
pub fn attach_comments(forest: &mut [SchemaNode], comments: &[Comment]) -> Result<usize> {
    let attachments = associate(flatten::flatten(forest), comments)?;
    let count = attachments.len();
    apply(forest, attachments);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Span;
    use crate::flatten::flatten;
    use crate::schema::SchemaKind;

    fn node(name: &str, start: usize, end: usize) -> SchemaNode {
        SchemaNode::new(name, SchemaKind::String, Span::new(start, end))
    }

    fn comment(text: &str, start: usize, end: usize) -> Comment {
        Comment { text: Some(text.into()), span: Span::new(start, end) }
    }

    fn forest() -> Vec<SchemaNode> {
        vec![
            SchemaNode::new("A", SchemaKind::Declaration, Span::new(0, 40)).with_children(vec![
                node("a", 10, 20),
                node("b", 30, 40),
            ]),
            SchemaNode::new("B", SchemaKind::Declaration, Span::new(60, 90))
                .with_children(vec![node("c", 70, 80)]),
        ]
    }

    #[test]
    fn picks_smallest_start_after_comment_end() {
        let forest = forest();
        let got = associate(flatten(&forest), &[comment("about b", 22, 28)]).unwrap();
        assert_eq!(got, [Attachment { node: 2, text: "about b".into() }]);
    }

    #[test]
    fn start_equal_to_comment_end_does_not_qualify() {
        let forest = forest();
        let got = associate(flatten(&forest), &[comment("x", 25, 30)]).unwrap();
        // "b" starts at 30 == end, so the next candidate is "B" at 60
        assert_eq!(got[0].node, 3);
    }

    #[test]
    fn order_not_distance_decides() {
        // the node listed later in the forest starts earlier than the one listed first
        let forest = vec![node("far", 100, 110), node("near", 50, 60)];
        let got = associate(flatten(&forest), &[comment("doc", 10, 20)]).unwrap();
        assert_eq!(got[0].node, 1);
    }

    #[test]
    fn ties_go_to_the_parent() {
        let forest = vec![
            SchemaNode::new("b", SchemaKind::Intersection, Span::new(30, 40))
                .with_children(vec![node("b", 30, 35), node("b", 30, 40)]),
        ];
        let got = associate(flatten(&forest), &[comment("doc", 10, 20)]).unwrap();
        assert_eq!(got[0].node, 0);
    }

    #[test]
    fn trailing_comment_is_an_orphan() {
        let forest = forest();
        let err = associate(flatten(&forest), &[comment("  the end  ", 95, 110)]).unwrap_err();
        assert_eq!(err, ExtractError::OrphanComment { range: Span::new(95, 110), preview: "the end".into() });
    }

    #[test]
    fn empty_comments_are_skipped() {
        let forest = forest();
        let comments = [
            Comment { text: None, span: Span::new(95, 100) },
            Comment { text: Some(String::new()), span: Span::new(100, 105) },
        ];
        assert!(associate(flatten(&forest), &comments).unwrap().is_empty());
    }

    #[test]
    fn later_comment_wins_on_the_same_node() {
        let mut forest = forest();
        attach_comments(&mut forest, &[comment("first", 42, 48), comment("second", 50, 55)]).unwrap();
        assert_eq!(forest[1].raw_comment.as_deref(), Some("second"));
        assert!(flatten(&forest).filter(|n| n.raw_comment.is_some()).count() == 1);
    }

    #[test]
    fn search_does_not_depend_on_comment_order() {
        let forest = forest();
        let a = comment("a", 0, 5);
        let b = comment("b", 41, 45);
        let forward = associate(flatten(&forest), &[a.clone(), b.clone()]).unwrap();
        let backward = associate(flatten(&forest), &[b, a]).unwrap();
        assert_eq!(forward[0], backward[1]);
        assert_eq!(forward[1], backward[0]);
    }

    #[test]
    fn long_previews_are_cut() {
        let text = "x".repeat(100);
        let p = preview(&text);
        assert_eq!(p.chars().count(), PREVIEW_LEN + 1);
        assert!(p.ends_with('…'));
    }
}
