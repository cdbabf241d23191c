// SPDX-License-Identifier: MIT OR Apache-2.0
//! Compact link references: `~Source`, `~Source/2`, `~A;B/1`.
//!
//! The output index is left out when the source node has a single output.
//! A missing index reads as output 0.

use nodeclip_graph::SocketInfo;
use std::fmt;

/// Marks an input value as a list of link references
pub const LINK_PREFIX: char = '~';
/// Separates references into the same input
pub const LINK_SEPARATOR: char = ';';

/// Reference to a source node output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    /// Source node name
    pub node: String,
    /// Output index, `None` when written without one
    pub output: Option<usize>,
}

impl LinkRef {
    /// Build the reference for a link leaving `socket` of the named node.
    ///
    /// Outputs are matched by identifier; `None` when no output has it.
    pub fn encode(node: &str, outputs: &[SocketInfo], socket: &str) -> Option<Self> {
        let index = outputs.iter().position(|s| s.identifier == socket)?;
        // A slash in the name would read back as an index separator
        let output = if outputs.len() == 1 && !node.contains('/') {
            None
        } else {
            Some(index)
        };
        Some(Self {
            node: node.to_string(),
            output,
        })
    }

    /// Parse one token. A trailing `/N` is an index only when `N` is a number.
    pub fn parse(token: &str) -> Self {
        if let Some((node, index)) = token.rsplit_once('/') {
            if let Ok(index) = index.parse::<usize>() {
                return Self {
                    node: node.to_string(),
                    output: Some(index),
                };
            }
        }
        Self {
            node: token.to_string(),
            output: None,
        }
    }

    /// Output index, defaulting to 0
    pub fn index(&self) -> usize {
        self.output.unwrap_or(0)
    }
}

impl fmt::Display for LinkRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.output {
            Some(index) => write!(f, "{}/{}", self.node, index),
            None => write!(f, "{}", self.node),
        }
    }
}

/// Join references into an input value: `~A;B/1`
pub fn format_links(refs: &[LinkRef]) -> String {
    let tokens: Vec<String> = refs.iter().map(LinkRef::to_string).collect();
    let separator = LINK_SEPARATOR.to_string();
    format!("{LINK_PREFIX}{}", tokens.join(separator.as_str()))
}

/// Split an input value into references, or `None` if it is not a link list
pub fn parse_links(value: &str) -> Option<Vec<LinkRef>> {
    let list = value.strip_prefix(LINK_PREFIX)?;
    Some(
        list.split(LINK_SEPARATOR)
            .filter(|token| !token.is_empty())
            .map(LinkRef::parse)
            .collect(),
    )
}

/// Rejoin tokens split on the separator when together they name a node.
///
/// The longest run of tokens that forms a known source name wins, so
/// `~A;B/0` links from a node called `A;B` when one exists.
pub fn regroup(refs: &[LinkRef], is_node: impl Fn(&str) -> bool) -> Vec<LinkRef> {
    let mut grouped = Vec::with_capacity(refs.len());
    let mut start = 0;
    while start < refs.len() {
        let joined = (start + 2..=refs.len()).rev().find_map(|end| {
            let tokens: Vec<String> = refs[start..end].iter().map(LinkRef::to_string).collect();
            let link = LinkRef::parse(&tokens.join(LINK_SEPARATOR.to_string().as_str()));
            is_node(&link.node).then_some((end, link))
        });
        let (end, link) = joined.unwrap_or_else(|| (start + 1, refs[start].clone()));
        grouped.push(link);
        start = end;
    }
    grouped
}
