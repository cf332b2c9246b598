//! Configuration options for a cleaning pass.
//!
//! The `CleanOptions` struct is immutable for the duration of a pass and
//! decides which structural rewrites the cleaner performs.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration options for a cleaning pass.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for a pass that only normalizes attributes and whitespace.
///
/// # Example
///
/// ```rust
/// use rs_domclean::CleanOptions;
///
/// // Use defaults
/// let options = CleanOptions::default();
///
/// // Customize specific fields
/// let options = CleanOptions {
///     remove_comments: true,
///     ..CleanOptions::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct CleanOptions {
    /// Remove every comment node.
    ///
    /// When the comment sits right after a non-empty text node, a single
    /// space is appended to that text so the words around the comment do
    /// not run together.
    ///
    /// Default: `false`
    pub remove_comments: bool,

    /// Remove whitespace-only text nodes and elements that have neither
    /// attributes nor non-whitespace text content.
    ///
    /// Text inside `pre`, `code`, `script`, `style` and `textarea` is never
    /// removed by this option.
    ///
    /// Default: `false`
    pub remove_empty_elements: bool,

    /// Collapse a whitespace run that contains a newline to `\n` instead of
    /// a single space.
    ///
    /// Default: `false`
    pub keep_new_lines: bool,
}

impl CleanOptions {
    /// Preset that strips everything the pass can strip: comments, empty
    /// elements, and newlines.
    #[must_use]
    pub fn minify() -> Self {
        Self {
            remove_comments: true,
            remove_empty_elements: true,
            keep_new_lines: false,
        }
    }

    /// Load options from a JSON object. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the input is not a valid options object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
