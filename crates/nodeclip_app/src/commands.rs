// SPDX-License-Identifier: MIT OR Apache-2.0
//! The `copy`, `paste` and `inspect` commands.

use crate::config::{load_scene, save_scene};
use crate::error::AppError;
use nodeclip_codec::{copy, paste, DecodeReport, EncodeOptions};
use nodeclip_graph::{GraphAccessor, Scene};
use std::fmt::Write as _;
use std::io::Read;
use std::path::Path;

/// Encode an object's graph from a scene file
pub fn copy_command(
    scene_path: &Path,
    object: &str,
    options: &EncodeOptions,
    output: Option<&Path>,
) -> Result<(), AppError> {
    let scene = load_scene(scene_path)?;
    let text = copy(&scene, object, options)?;
    match output {
        Some(path) => {
            std::fs::write(path, &text).map_err(|e| AppError::io(path, e))?;
            tracing::info!("Copied {object} to {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// Decode text onto an object and write the scene file back
pub fn paste_command(scene_path: &Path, object: &str, input: Option<&Path>) -> Result<(), AppError> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| AppError::io(Path::new("<stdin>"), e))?;
            text
        }
    };

    let mut scene = load_scene(scene_path)?;
    let report = paste(&mut scene, object, &text)?;
    save_scene(&scene, scene_path)?;
    print!("{}", paste_summary(object, &report));
    Ok(())
}

/// Describe the scene's graphs and modifier bindings
pub fn inspect_command(scene_path: &Path) -> Result<(), AppError> {
    let scene = load_scene(scene_path)?;
    print!("{}", inspect(&scene));
    Ok(())
}

/// Human-readable outcome of a paste
pub fn paste_summary(object: &str, report: &DecodeReport) -> String {
    let mut out = String::new();
    for graph in &report.graphs {
        let _ = writeln!(out, "{}: {} nodes, {} links", graph.name, graph.nodes, graph.links);
    }
    if let Some(root) = &report.attached {
        let _ = writeln!(out, "{object} -> {root}");
    }
    for warning in &report.warnings {
        let _ = writeln!(out, "warning: {warning}");
    }
    out
}

/// Human-readable listing of a scene
pub fn inspect(scene: &Scene) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Graphs:");
    for (name, group) in &scene.node_groups {
        let _ = writeln!(
            out,
            "  {name}: {} nodes, {} links, {} inputs, {} outputs",
            group.node_count(),
            group.link_count(),
            group.inputs.len(),
            group.outputs.len()
        );
    }
    let _ = writeln!(out, "Objects:");
    for name in scene.objects.keys() {
        let binding = match scene.modifier_graph(name) {
            Ok(Some(Some(graph))) => graph,
            Ok(Some(None)) => "(empty modifier)".to_string(),
            _ => "(no modifier)".to_string(),
        };
        let _ = writeln!(out, "  {name}: {binding}");
    }
    out
}
