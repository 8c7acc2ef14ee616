use super::{Clause, ClauseNode, GroupKind};
use crate::Result;

/// Compiles an opaque clause tree into a backend's native predicate.
///
/// The tree never reaches a processor malformed: groups are non-empty and
/// every clause is typed. A NOT group logically negates the conjunction of
/// its children.
pub trait Processor {
    type Output;

    /// Compiles a single leaf comparison.
    fn clause(&mut self, clause: &Clause) -> Result<Self::Output>;

    /// Combines already-compiled children under a boolean group.
    fn group(&mut self, kind: GroupKind, children: Vec<Self::Output>) -> Result<Self::Output>;

    /// Compiles a list of sibling nodes (implicitly conjoined by callers).
    fn process(&mut self, nodes: &[ClauseNode]) -> Result<Vec<Self::Output>> {
        nodes.iter().map(|node| self.process_node(node)).collect()
    }

    fn process_node(&mut self, node: &ClauseNode) -> Result<Self::Output> {
        match node {
            ClauseNode::Clause(clause) => self.clause(clause),
            ClauseNode::Group(group) => {
                let children = self.process(&group.children)?;
                self.group(group.kind, children)
            }
        }
    }
}
