// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph to text.
//!
//! A document holds one block per graph: every subgraph reachable from the
//! root is written before the graphs that instantiate it, and the root comes
//! last. Inside a block, nodes are sorted by layout so re-encoding an
//! unchanged graph gives the same text.

use crate::document::{INPUTS_KEY, OUTPUTS_KEY};
use crate::error::CodecError;
use crate::link_ref::{format_links, LinkRef};
use crate::literal::{
    format_bool, format_float, format_int, format_int_list, format_list, format_str, format_value,
    CURVE_DIGITS, PROPERTY_DIGITS, SOCKET_DIGITS,
};
use crate::options::EncodeOptions;
use nodeclip_graph::registry::{GROUP_INPUT, GROUP_INSTANCE, GROUP_OUTPUT};
use nodeclip_graph::schema::MAPPING_PROPERTY;
use nodeclip_graph::{minimal_type_annotation, GraphAccessor, InterfaceSocket, NodeInfo, SocketSide};
use std::collections::{HashMap, HashSet};

/// Input names too generic to address a socket by
pub const AMBIGUOUS_INPUT_NAMES: &[&str] = &["Vector", "Value"];

/// Encode `root` and every subgraph it reaches
pub fn encode<A: GraphAccessor>(
    host: &A,
    root: &str,
    options: &EncodeOptions,
) -> Result<String, CodecError> {
    Encoder::new(host, *options).encode(root)
}

/// Layout sort key: left to right, then top to bottom
pub fn layout_key(info: &NodeInfo) -> f64 {
    match info.type_tag.as_str() {
        GROUP_INPUT => f64::NEG_INFINITY,
        GROUP_OUTPUT => f64::INFINITY,
        _ => info.location[0] - info.location[1] / 4.0,
    }
}

/// Writes graphs of one host as text
pub struct Encoder<'a, A: GraphAccessor> {
    host: &'a A,
    options: EncodeOptions,
    lines: Vec<String>,
}

impl<'a, A: GraphAccessor> Encoder<'a, A> {
    /// Create an encoder
    pub fn new(host: &'a A, options: EncodeOptions) -> Self {
        Self {
            host,
            options,
            lines: Vec::new(),
        }
    }

    /// Encode `root` and its subgraphs
    pub fn encode(mut self, root: &str) -> Result<String, CodecError> {
        if !self.host.has_graph(root) {
            return Err(CodecError::GraphNotFound(root.to_string()));
        }
        let graphs = self.dependency_order(root)?;
        tracing::debug!("Encoding {} graph(s) from {root}", graphs.len());

        for graph in &graphs {
            self.write_graph(graph)?;
        }
        tracing::info!("Encoded {root}: {} graph(s), {} line(s)", graphs.len(), self.lines.len());
        Ok(self.lines.join("\n"))
    }

    /// Graphs reachable from `root`, each after every graph it instantiates.
    ///
    /// Read backwards this is the discovery order starting at `root`.
    pub fn dependency_order(&self, root: &str) -> Result<Vec<String>, CodecError> {
        let mut visited = HashSet::new();
        let mut order = Vec::new();
        self.visit(root, &mut visited, &mut order)?;
        Ok(order)
    }

    fn visit(
        &self,
        graph: &str,
        visited: &mut HashSet<String>,
        order: &mut Vec<String>,
    ) -> Result<(), CodecError> {
        if !visited.insert(graph.to_string()) {
            return Ok(());
        }
        for node in self.host.nodes(graph)? {
            let info = self.host.node_info(graph, node)?;
            // Unresolvable references end the branch
            if let Some(sub) = info.node_tree.filter(|sub| self.host.has_graph(sub)) {
                self.visit(&sub, visited, order)?;
            }
        }
        order.push(graph.to_string());
        Ok(())
    }

    fn write_graph(&mut self, graph: &str) -> Result<(), CodecError> {
        self.lines.push(format!("{}:", format_str(graph)));

        for (heading, side) in [(INPUTS_KEY, SocketSide::Input), (OUTPUTS_KEY, SocketSide::Output)] {
            let ports = self.host.interface(graph, side)?;
            if ports.is_empty() {
                continue;
            }
            self.lines.push(format!("  {heading}:"));
            for port in &ports {
                self.lines.push(format!(
                    "    {}: {}",
                    format_str(&port.identifier),
                    format_str(&interface_declaration(port))
                ));
            }
        }

        let mut nodes = Vec::new();
        for key in self.host.nodes(graph)? {
            let info = self.host.node_info(graph, key)?;
            if info.is_active_output == Some(false) {
                continue;
            }
            if info.name == INPUTS_KEY || info.name == OUTPUTS_KEY {
                return Err(CodecError::ReservedNodeName {
                    graph: graph.to_string(),
                    node: info.name,
                });
            }
            nodes.push((key, info));
        }
        nodes.sort_by(|(_, a), (_, b)| layout_key(a).total_cmp(&layout_key(b)));

        let names: HashMap<A::NodeKey, String> = nodes
            .iter()
            .map(|(key, info)| (*key, info.name.clone()))
            .collect();
        for (key, info) in &nodes {
            self.write_node(graph, *key, info, &names)?;
        }
        Ok(())
    }

    fn write_node(
        &mut self,
        graph: &str,
        key: A::NodeKey,
        info: &NodeInfo,
        names: &HashMap<A::NodeKey, String>,
    ) -> Result<(), CodecError> {
        let host = self.host;
        self.lines.push(format!("  {}:", format_str(&info.name)));

        let type_tag = if self.options.include_explicit_types {
            Some(info.type_tag.as_str())
        } else {
            minimal_type_annotation(&info.name, &info.type_tag)
        };
        if let Some(tag) = type_tag {
            self.attr("bl_idname", format_str(tag));
        }
        if !self.options.omit_cosmetic && !info.label.is_empty() {
            self.attr("label", format_str(&info.label));
        }
        if let Some(tree) = &info.node_tree {
            self.attr("node_tree", format_str(tree));
        }
        self.attr("location", format_int_list(&info.location));
        if !self.options.omit_cosmetic {
            self.attr("width", format_int(info.width));
        }
        if info.hide {
            self.attr("hide", format_bool(true).to_string());
        }
        if info.use_custom_color {
            self.attr("color", format_list(&info.color, PROPERTY_DIGITS));
        }

        for (name, value) in host.node_properties(graph, key)? {
            if name == MAPPING_PROPERTY {
                self.lines.push(format!("    {MAPPING_PROPERTY}:"));
                for point in host.curve_points(graph, key)? {
                    self.lines.push(format!(
                        "    - {}, {}, {}",
                        point.handle_type,
                        format_float(point.location[0], CURVE_DIGITS),
                        format_float(point.location[1], CURVE_DIGITS)
                    ));
                }
            } else if let Some(text) = format_value(&value, PROPERTY_DIGITS) {
                self.attr(&name, text);
            }
        }

        let inputs = self.inputs(graph, key, info, names)?;
        if !inputs.is_empty() {
            self.lines.push("    inputs:".to_string());
            for (socket, value) in inputs {
                self.lines.push(format!("      {socket}: {value}"));
            }
        }
        Ok(())
    }

    /// `(key, value)` pairs of the `inputs:` section
    fn inputs(
        &self,
        graph: &str,
        key: A::NodeKey,
        info: &NodeInfo,
        names: &HashMap<A::NodeKey, String>,
    ) -> Result<Vec<(String, String)>, CodecError> {
        let sockets = self.host.sockets(graph, key, SocketSide::Input)?;
        let is_instance = info.type_tag == GROUP_INSTANCE || info.node_tree.is_some();
        let mut name_counts: HashMap<&str, usize> = HashMap::new();
        for socket in &sockets {
            *name_counts.entry(socket.name.as_str()).or_default() += 1;
        }

        let mut entries = Vec::new();
        for (index, socket) in sockets.iter().enumerate() {
            let by_index = is_instance
                || AMBIGUOUS_INPUT_NAMES.contains(&socket.name.as_str())
                || name_counts.get(socket.name.as_str()).copied().unwrap_or(0) > 1;
            let socket_key = if by_index {
                index.to_string()
            } else {
                format_str(&socket.name)
            };

            let mut refs = Vec::new();
            for source in self.host.links_into(graph, key, index)? {
                let Some(source_name) = names.get(&source.node) else {
                    tracing::warn!("{graph}/{}: link from a node outside the graph dropped", info.name);
                    continue;
                };
                let outputs = self.host.sockets(graph, source.node, SocketSide::Output)?;
                match LinkRef::encode(source_name, &outputs, &source.socket) {
                    Some(link) => refs.push(link),
                    None => tracing::warn!(
                        "{graph}/{}: source socket {} missing on {source_name}",
                        info.name,
                        source.socket
                    ),
                }
            }

            if !refs.is_empty() {
                entries.push((socket_key, format_str(&format_links(&refs))));
            } else if let Some(text) = socket
                .default
                .as_ref()
                .and_then(|value| format_value(value, SOCKET_DIGITS))
            {
                entries.push((socket_key, text));
            }
        }
        Ok(entries)
    }

    fn attr(&mut self, name: &str, value: String) {
        self.lines.push(format!("    {name}: {value}"));
    }
}

/// `Name/SocketType[, default, min, max]`
fn interface_declaration(port: &InterfaceSocket) -> String {
    match (&port.range, port.is_factor()) {
        (Some(range), true) => format!(
            "{}/{}, {}, {}, {}",
            port.name,
            port.socket_type,
            format_float(range.default, SOCKET_DIGITS),
            format_float(range.min, SOCKET_DIGITS),
            format_float(range.max, SOCKET_DIGITS)
        ),
        _ => format!("{}/{}", port.name, port.socket_type),
    }
}
