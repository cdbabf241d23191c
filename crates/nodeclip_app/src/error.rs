// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command line errors.

use nodeclip_codec::ClipboardError;
use std::path::Path;

/// Errors reported by the `nodeclip` commands
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Reading or writing a file failed
    #[error("{path}: {source}")]
    Io {
        /// File involved
        path: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// A settings or scene file could not be (de)serialized
    #[error("{path}: {message}")]
    Format {
        /// File involved
        path: String,
        /// Parser message
        message: String,
    },

    /// Copy or paste failed
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

impl AppError {
    /// Wrap an I/O error with the file it concerns
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
