// SPDX-License-Identifier: MIT OR Apache-2.0
//! Codec errors and decode warnings.

use nodeclip_graph::{HostError, UnknownTypeName};
use std::fmt;

/// Fatal codec error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    /// A node name resolves to no type and no tag was given
    #[error(transparent)]
    UnknownTypeName(#[from] UnknownTypeName),

    /// The text is not a valid document
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// The graph to encode does not exist
    #[error("Graph not found: {0}")]
    GraphNotFound(String),

    /// A node name collides with a graph-level key and would not read back
    #[error("Node name {node} in {graph} is reserved")]
    ReservedNodeName {
        /// Graph name
        graph: String,
        /// Offending node
        node: String,
    },

    /// The host refused an operation
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Why a link token could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkFailure {
    /// No node of that name in the graph
    UnknownNode,
    /// The source node has fewer outputs
    OutputOutOfRange(usize),
}

impl fmt::Display for LinkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode => write!(f, "unknown source node"),
            Self::OutputOutOfRange(count) => write!(f, "source node has {count} outputs"),
        }
    }
}

/// Non-fatal problem met while decoding; the directive is skipped
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeWarning {
    /// A link token names no node or no output
    #[error("{graph}/{node}: link {reference} into {socket} skipped: {reason}")]
    LinkResolutionFailure {
        /// Graph name
        graph: String,
        /// Target node
        node: String,
        /// Target input key
        socket: String,
        /// The link token as written
        reference: String,
        /// Failure reason
        reason: LinkFailure,
    },

    /// The node has no such input
    #[error("{graph}/{node}: no input {socket}")]
    UnknownSocket {
        /// Graph name
        graph: String,
        /// Node name
        node: String,
        /// Input key as written
        socket: String,
    },

    /// `node_tree` names a graph that does not exist
    #[error("{graph}/{node}: subgraph {subgraph} not found, instance left unbound")]
    UnresolvedSubgraph {
        /// Graph name
        graph: String,
        /// Node name
        node: String,
        /// Missing subgraph
        subgraph: String,
    },

    /// An object/material literal names nothing in the host
    #[error("{graph}/{node}: {socket} references missing {name}")]
    UnresolvedReference {
        /// Graph name
        graph: String,
        /// Node name
        node: String,
        /// Input key
        socket: String,
        /// Referenced name
        name: String,
    },

    /// The node type declares no such property
    #[error("{graph}/{node}: unknown property {property}")]
    UnknownProperty {
        /// Graph name
        graph: String,
        /// Node name
        node: String,
        /// Property name
        property: String,
    },

    /// A literal does not fit its socket or property
    #[error("{graph}/{node}: invalid value for {key}: {reason}")]
    InvalidValue {
        /// Graph name
        graph: String,
        /// Node name
        node: String,
        /// Property or input key
        key: String,
        /// What was wrong
        reason: String,
    },
}
