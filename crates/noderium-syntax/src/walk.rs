//! Range-restricted preorder walk over nodes and tokens.

use std::ops::{ControlFlow, Range};

use rowan::NodeOrToken;

use crate::syntax_kind::{SyntaxElement, SyntaxNode};

/// Decision returned by a [`walk`] callback for each element entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Descend into the element's children.
    Continue,
    /// Leave this node's children unvisited and carry on with its siblings.
    SkipChildren,
    /// End the walk.
    Stop,
}

/// Byte range of a node or token.
pub fn element_range(element: &SyntaxElement) -> Range<usize> {
    let range = element.text_range();
    usize::from(range.start())..usize::from(range.end())
}

/// Walk every element overlapping `from..=to` in document order, parents
/// before children.
///
/// Elements that only touch the range (ending at `from` or starting at `to`)
/// are entered too. Subtrees entirely outside the range are pruned without a
/// callback.
pub fn walk<F>(root: &SyntaxNode, from: usize, to: usize, mut enter: F)
where
    F: FnMut(&SyntaxElement) -> Visit,
{
    let _ = walk_element(NodeOrToken::Node(root.clone()), from, to, &mut enter);
}

fn walk_element<F>(element: SyntaxElement, from: usize, to: usize, enter: &mut F) -> ControlFlow<()>
where
    F: FnMut(&SyntaxElement) -> Visit,
{
    let range = element_range(&element);
    if range.start > to || range.end < from {
        return ControlFlow::Continue(());
    }

    match enter(&element) {
        Visit::Stop => return ControlFlow::Break(()),
        Visit::SkipChildren => return ControlFlow::Continue(()),
        Visit::Continue => {}
    }

    if let NodeOrToken::Node(node) = element {
        for child in node.children_with_tokens() {
            walk_element(child, from, to, enter)?;
        }
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SyntaxKind, parse};
    use pretty_assertions::assert_eq;

    fn kinds_in(input: &str, from: usize, to: usize) -> Vec<SyntaxKind> {
        let tree = parse(input);
        let mut kinds = Vec::new();
        walk(&tree, from, to, |element| {
            kinds.push(element.kind());
            Visit::Continue
        });
        kinds
    }

    #[test]
    fn test_walk_visits_in_document_order() {
        assert_eq!(
            kinds_in("# A\n", 0, 4),
            vec![
                SyntaxKind::ROOT,
                SyntaxKind::ATX_HEADING_1,
                SyntaxKind::HEADER_MARK,
                SyntaxKind::WHITESPACE,
                SyntaxKind::TEXT,
                SyntaxKind::NEWLINE,
            ]
        );
    }

    #[test]
    fn test_walk_prunes_outside_range() {
        let kinds = kinds_in("# A\n\n> q\n", 5, 8);
        assert!(kinds.contains(&SyntaxKind::QUOTE_MARK));
        assert!(!kinds.contains(&SyntaxKind::HEADER_MARK));
    }

    #[test]
    fn test_walk_skip_children() {
        let tree = parse("```\n*x*\n```\n*y*\n");
        let mut marks = Vec::new();
        walk(&tree, 0, tree.text().len().into(), |element| {
            match element.kind() {
                SyntaxKind::FENCED_CODE => return Visit::SkipChildren,
                kind @ (SyntaxKind::EMPHASIS_MARK | SyntaxKind::CODE_MARK) => marks.push(kind),
                _ => {}
            }
            Visit::Continue
        });
        assert_eq!(
            marks,
            vec![SyntaxKind::EMPHASIS_MARK, SyntaxKind::EMPHASIS_MARK]
        );
    }

    #[test]
    fn test_walk_stop() {
        let tree = parse("- a\n- b\n");
        let mut seen = 0;
        walk(&tree, 0, 8, |element| {
            if element.kind() == SyntaxKind::LIST_MARK {
                seen += 1;
                return Visit::Stop;
            }
            Visit::Continue
        });
        assert_eq!(seen, 1);
    }
}
