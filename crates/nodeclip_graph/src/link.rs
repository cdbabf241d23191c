// SPDX-License-Identifier: MIT OR Apache-2.0
//! Link (edge) definitions for the in-memory host.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkId(pub Uuid);

impl LinkId {
    /// Create a new random link ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LinkId {
    fn default() -> Self {
        Self::new()
    }
}

/// A link from an output socket to an input socket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Unique link ID
    pub id: LinkId,
    /// Source node
    pub from_node: NodeId,
    /// Identifier of the source output socket
    pub from_socket: String,
    /// Target node
    pub to_node: NodeId,
    /// Identifier of the target input socket
    pub to_socket: String,
}

impl Link {
    /// Create a new link
    pub fn new(
        from_node: NodeId,
        from_socket: impl Into<String>,
        to_node: NodeId,
        to_socket: impl Into<String>,
    ) -> Self {
        Self {
            id: LinkId::new(),
            from_node,
            from_socket: from_socket.into(),
            to_node,
            to_socket: to_socket.into(),
        }
    }

    /// Check if this link ends at a specific input socket
    pub fn targets(&self, node_id: NodeId, socket: &str) -> bool {
        self.to_node == node_id && self.to_socket == socket
    }
}
