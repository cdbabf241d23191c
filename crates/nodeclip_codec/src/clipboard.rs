// SPDX-License-Identifier: MIT OR Apache-2.0
//! Copy and paste of an object's node graph.

use crate::decoder::{decode_document, DecodeReport};
use crate::document::Document;
use crate::encoder::encode;
use crate::error::CodecError;
use crate::options::EncodeOptions;
use nodeclip_graph::{GraphAccessor, HostError};

/// Name of the graph created for objects without one
pub const DEFAULT_GRAPH_NAME: &str = "Geometry Nodes";

/// Clipboard operation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClipboardError {
    /// The object does not exist
    #[error("No object named {0}")]
    NoObject(String),

    /// The object has no node graph to copy
    #[error("Object {0} has no node graph")]
    NoNodeGraph(String),

    /// Encoding or decoding failed
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The host refused an operation
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Encode the graph of an object's node modifier
pub fn copy<A: GraphAccessor>(
    host: &A,
    object: &str,
    options: &EncodeOptions,
) -> Result<String, ClipboardError> {
    if !host.object_exists(object) {
        return Err(ClipboardError::NoObject(object.to_string()));
    }
    let Some(Some(graph)) = host.modifier_graph(object)? else {
        return Err(ClipboardError::NoNodeGraph(object.to_string()));
    };
    tracing::debug!("Copying {graph} from {object}");
    Ok(encode(host, &graph, options)?)
}

/// Decode `text` onto an object, giving it a node modifier and graph first
/// when it has none.
///
/// A fresh graph that no document block ends up using is removed again.
pub fn paste<A: GraphAccessor>(
    host: &mut A,
    object: &str,
    text: &str,
) -> Result<DecodeReport, ClipboardError> {
    if !host.object_exists(object) {
        return Err(ClipboardError::NoObject(object.to_string()));
    }
    let document = Document::parse(text)?;
    let mut fresh = None;
    match host.modifier_graph(object)? {
        Some(Some(_)) => {}
        binding => {
            if binding.is_none() {
                host.add_node_modifier(object)?;
            }
            let graph = host.create_graph(DEFAULT_GRAPH_NAME)?;
            host.set_modifier_graph(object, &graph)?;
            tracing::debug!("Prepared {object} with empty graph {graph}");
            fresh = Some(graph);
        }
    }
    tracing::debug!("Pasting onto {object}");
    let report = decode_document(host, &document, Some(object))?;
    if let Some(graph) = fresh {
        if !report.graphs.iter().any(|g| g.name == graph) {
            host.remove_graph(&graph)?;
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use nodeclip_graph::Scene;

    #[test]
    fn test_copy_paste_between_objects() {
        let mut scene = fixtures::sample_scene();
        let text = copy(&scene, "Plane", &EncodeOptions::default()).unwrap();

        scene.add_object("Other");
        let report = paste(&mut scene, "Other", &text).unwrap();
        assert_eq!(report.attached.as_deref(), Some("Main"));
        assert_eq!(scene.modifier_graph("Other").unwrap(), Some(Some("Main".to_string())));
        assert_eq!(copy(&scene, "Other", &EncodeOptions::default()).unwrap(), text);
        // The placeholder graph made for Other is not left behind
        assert!(!scene.has_graph(DEFAULT_GRAPH_NAME));
        assert_eq!(scene.node_groups.len(), 2);
    }

    #[test]
    fn test_copy_errors() {
        let mut scene = Scene::new();
        assert_eq!(
            copy(&scene, "Nope", &EncodeOptions::default()),
            Err(ClipboardError::NoObject("Nope".into()))
        );
        scene.add_object("Bare");
        assert_eq!(
            copy(&scene, "Bare", &EncodeOptions::default()),
            Err(ClipboardError::NoNodeGraph("Bare".into()))
        );
        scene.add_node_modifier("Bare").unwrap();
        assert_eq!(
            copy(&scene, "Bare", &EncodeOptions::default()),
            Err(ClipboardError::NoNodeGraph("Bare".into()))
        );
    }

    #[test]
    fn test_paste_onto_bare_object() {
        let text = copy(&fixtures::cube_scene(), "Cube", &EncodeOptions::compact()).unwrap();
        let mut scene = Scene::new();
        scene.add_object("Bare");

        let report = paste(&mut scene, "Bare", &text).unwrap();
        assert!(report.warnings.is_empty());
        assert_eq!(report.attached.as_deref(), Some("Geometry Nodes"));
        assert_eq!(scene.group("Geometry Nodes").unwrap().node_count(), 2);
        assert_eq!(scene.objects["Bare"].modifiers.len(), 1);
    }

    #[test]
    fn test_paste_errors() {
        let mut scene = Scene::new();
        assert_eq!(
            paste(&mut scene, "Nope", "G:\n  Cube: {}"),
            Err(ClipboardError::NoObject("Nope".into()))
        );
        scene.add_object("Plane");
        assert!(matches!(
            paste(&mut scene, "Plane", "not: [valid"),
            Err(ClipboardError::Codec(CodecError::MalformedDocument(_)))
        ));
        // Rejected before the object is touched
        assert!(scene.objects["Plane"].modifiers.is_empty());
    }
}
