//! Graph export document: the handoff to external renderers.

use serde::{Deserialize, Serialize};

use blocks_kernel::canon::hash::{canonical_hash, ContentHash, DOMAIN_GRAPH_EXPORT};
use blocks_kernel::canon::json::{to_canonical_bytes, CanonError};
use blocks_kernel::canon::key::state_fingerprint;
use blocks_kernel::domain::object::ObjectRecord;
use blocks_kernel::operators::action::Action;

use crate::analysis::GraphStats;
use crate::recorder::{NodeId, Recorder};

/// One exported node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub depth: u32,
    pub action: Option<Action>,
    pub description: Option<String>,
    pub target_match: bool,
    pub state_fingerprint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Vec<ObjectRecord>>,
}

/// The full arena plus its statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<ExportNode>,
    pub stats: GraphStats,
}

impl GraphExport {
    /// Export every node, in id order. `include_states` adds the object
    /// records of each node.
    #[must_use]
    pub fn from_recorder(recorder: &Recorder, include_states: bool) -> Self {
        let nodes = recorder
            .nodes()
            .iter()
            .map(|n| ExportNode {
                id: n.id,
                parent: n.parent,
                children: n.children.clone(),
                depth: n.depth,
                action: n.action,
                description: n.description.clone(),
                target_match: n.target_match,
                state_fingerprint: state_fingerprint(&n.state).as_str().to_string(),
                state: include_states.then(|| n.state.to_records()),
            })
            .collect();
        Self {
            nodes,
            stats: GraphStats::of(recorder),
        }
    }

    /// Canonical JSON bytes (sorted keys, compact).
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if the document does not serialize.
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>, CanonError> {
        to_canonical_bytes(self)
    }

    /// Content hash of the canonical bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if the document does not serialize.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(DOMAIN_GRAPH_EXPORT, &self.to_canonical_bytes()?))
    }
}

impl Recorder {
    /// Serialize the full arena for external visualization.
    #[must_use]
    pub fn export_graph(&self, include_states: bool) -> GraphExport {
        GraphExport::from_recorder(self, include_states)
    }
}
