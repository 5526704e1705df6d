//! Path/graph recorder: an arena of explored nodes.
//!
//! Nodes are created once, never removed, and only ever gain children.
//! Node ids are arena indices, so creation order is id order.

use blocks_kernel::domain::state::BlocksState;
use blocks_kernel::operators::action::Action;

use crate::outcome::{SolutionPath, Step};

/// Arena index of a node.
pub type NodeId = usize;

/// One explored `(state, depth)` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// The action that produced this node; `None` for the root.
    pub action: Option<Action>,
    pub description: Option<String>,
    pub depth: u32,
    pub target_match: bool,
    pub state: BlocksState,
}

/// Single-writer node arena.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    nodes: Vec<Node>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next node and link it under `parent`.
    pub fn create_node(
        &mut self,
        state: BlocksState,
        parent: Option<NodeId>,
        action: Option<(Action, String)>,
        depth: u32,
        target_match: bool,
    ) -> NodeId {
        let id = self.nodes.len();
        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(p)) {
            p.children.push(id);
        }
        let (action, description) = match action {
            Some((a, d)) => (Some(a), Some(d)),
            None => (None, None),
        };
        self.nodes.push(Node {
            id,
            parent,
            children: Vec::new(),
            action,
            description,
            depth,
            target_match,
            state,
        });
        id
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids from the root down to `id`, inclusive. Empty for an unknown id.
    #[must_use]
    pub fn lineage(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.nodes.get(id).map(|n| n.id);
        while let Some(cur) = current {
            chain.push(cur);
            current = self.nodes[cur].parent;
        }
        chain.reverse();
        chain
    }

    /// Steps from the root to `id`, in root-to-node order.
    #[must_use]
    pub fn reconstruct_path(&self, id: NodeId) -> SolutionPath {
        SolutionPath::new(
            self.lineage(id)
                .into_iter()
                .filter_map(|n| {
                    let node = &self.nodes[n];
                    Some(Step {
                        action: node.action?,
                        description: node.description.clone()?,
                    })
                })
                .collect(),
        )
    }

    /// Ids of all target-matching nodes, ascending.
    pub fn target_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().filter(|n| n.target_match).map(|n| n.id)
    }
}
