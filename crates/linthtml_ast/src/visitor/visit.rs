//! Visitor trait for traversing a parsed document.

use std::ops::ControlFlow;

use crate::NodeRef;

/// Result type for visitor methods to control traversal.
///
/// - `ControlFlow::Continue(())` - continue visiting
/// - `ControlFlow::Break(())` - stop traversal early
pub type VisitResult = ControlFlow<()>;

/// Read-only traversal over document nodes, in document order.
///
/// Every method has a default implementation, so implementors only override
/// the node kinds they care about. Descending into children is done by
/// [`walk_node`](super::walk_node) with an explicit stack, so no method needs
/// to recurse and nesting depth never grows the call stack.
pub trait Visitor<'a>: Sized {
    /// Called before a node is dispatched.
    #[inline]
    fn enter_node(&mut self, _node: NodeRef<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Called after a node and all of its children were visited.
    #[inline]
    fn exit_node(&mut self, _node: NodeRef<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Called before the children of the element are visited.
    fn visit_element(&mut self, _node: NodeRef<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_text(&mut self, _node: NodeRef<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_comment(&mut self, _node: NodeRef<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_declaration(&mut self, _node: NodeRef<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }
}
