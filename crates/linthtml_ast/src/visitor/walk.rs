//! Traversal driving a [`Visitor`] over a document.

use std::ops::ControlFlow;

use crate::{Document, NodeKind, NodeRef};

use super::visit::{VisitResult, Visitor};

enum Step<'a> {
    Enter(NodeRef<'a>),
    Exit(NodeRef<'a>),
}

/// Walks `node` and its descendants in document order.
///
/// Each node gets `enter_node`, then its kind-specific visit, then its
/// children, then `exit_node`. Pending steps live on a heap stack.
pub fn walk_node<'a, V>(visitor: &mut V, node: NodeRef<'a>) -> VisitResult
where
    V: Visitor<'a>,
{
    let mut stack = vec![Step::Enter(node)];

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(node) => {
                visitor.enter_node(node)?;
                match node.node().kind {
                    NodeKind::Element(_) => visitor.visit_element(node)?,
                    NodeKind::Text(_) => visitor.visit_text(node)?,
                    NodeKind::Comment(_) => visitor.visit_comment(node)?,
                    NodeKind::Declaration(_) => visitor.visit_declaration(node)?,
                }
                stack.push(Step::Exit(node));
                stack.extend(node.children().rev().map(Step::Enter));
            }
            Step::Exit(node) => visitor.exit_node(node)?,
        }
    }

    ControlFlow::Continue(())
}

/// Walks every top-level node of `doc`.
pub fn walk_document<'a, V>(visitor: &mut V, doc: &'a Document) -> VisitResult
where
    V: Visitor<'a>,
{
    for root in doc.root_refs() {
        walk_node(visitor, root)?;
    }
    ControlFlow::Continue(())
}
