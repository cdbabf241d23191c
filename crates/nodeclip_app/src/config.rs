// SPDX-License-Identifier: MIT OR Apache-2.0
//! Settings file and scene snapshots, both stored as RON.

use crate::error::AppError;
use nodeclip_codec::EncodeOptions;
use nodeclip_graph::Scene;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Log filter used when neither the config nor `RUST_LOG` sets one
pub const DEFAULT_LOG_FILTER: &str = "nodeclip_app=info,nodeclip_codec=info,nodeclip_graph=warn";

/// Command line settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Encoder options applied by `copy`
    pub encode: EncodeOptions,
    /// `tracing` filter directives
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            encode: EncodeOptions::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
        ron::from_str(&content).map_err(|e| AppError::Format {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// Read a scene snapshot
pub fn load_scene(path: &Path) -> Result<Scene, AppError> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    let scene: Scene = ron::from_str(&content).map_err(|e| AppError::Format {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    tracing::debug!(
        "Loaded {}: {} object(s), {} graph(s)",
        path.display(),
        scene.objects.len(),
        scene.node_groups.len()
    );
    Ok(scene)
}

/// Write a scene snapshot
pub fn save_scene(scene: &Scene, path: &Path) -> Result<(), AppError> {
    write_ron(scene, path)?;
    tracing::debug!("Saved {}", path.display());
    Ok(())
}

fn write_ron<T: Serialize>(value: &T, path: &Path) -> Result<(), AppError> {
    let config = ron::ser::PrettyConfig::default()
        .struct_names(true)
        .enumerate_arrays(false);
    let content = ron::ser::to_string_pretty(value, config).map_err(|e| AppError::Format {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    std::fs::write(path, content).map_err(|e| AppError::io(path, e))
}
