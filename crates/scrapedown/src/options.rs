//! Conversion options shared by the converter and page assembly.

use serde::{Deserialize, Serialize};

/// What optional content to include in the Markdown output.
///
/// `include_links` and `include_images` are read by the per-element
/// converter. `include_title`, `include_url` and `include_meta` only affect
/// page assembly. `filename` is a naming hint for callers that save the
/// output; conversion never looks at it.
///
/// Serialized with camelCase keys (`includeLinks`, ...), so settings saved by
/// the browser popup load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionOptions {
    /// Emit `[text](href)` instead of bare link text
    pub include_links: bool,

    /// Emit `![alt](src)` instead of dropping images
    pub include_images: bool,

    /// Prepend `# <title>`
    pub include_title: bool,

    /// Prepend `**URL:** <url>`
    pub include_url: bool,

    /// Prepend a "Meta Information" section
    pub include_meta: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            include_links: true,
            include_images: true,
            include_title: true,
            include_url: true,
            include_meta: false,
            filename: None,
        }
    }
}

impl ConversionOptions {
    /// Every toggle off: bare text only, no front matter.
    pub fn plain() -> Self {
        Self {
            include_links: false,
            include_images: false,
            include_title: false,
            include_url: false,
            include_meta: false,
            filename: None,
        }
    }
}
