// SPDX-License-Identifier: MIT OR Apache-2.0
//! Encoder configuration.

use serde::{Deserialize, Serialize};

/// Options recognised by the encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Leave out labels and widths
    pub omit_cosmetic: bool,
    /// Write every node's type tag, even when its name implies it
    pub include_explicit_types: bool,
}

impl EncodeOptions {
    /// Options producing the smallest document
    pub fn compact() -> Self {
        Self {
            omit_cosmetic: true,
            include_explicit_types: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = EncodeOptions::default();
        assert!(!options.omit_cosmetic);
        assert!(!options.include_explicit_types);
    }

    #[test]
    fn test_partial_ron() {
        let options: EncodeOptions = ron::from_str("(include_explicit_types: true)").unwrap();
        assert!(options.include_explicit_types);
        assert!(!options.omit_cosmetic);
    }
}
