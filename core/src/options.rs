use serde::{Deserialize, Serialize};

use crate::common::RgbaColor;
use crate::object::HostInfo;
use crate::path::normalize_root_prefix;

/// Default limit on the number of segments in a hierarchy path.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Color given to referenced materials that expose no color property.
pub const DEFAULT_MATERIAL_COLOR: RgbaColor = RgbaColor::rgb(0.7, 0.7, 0.7);

/// Controls how a pattern is materialized.
///
/// ```
/// use pattern_import::ImportOptions;
///
/// let options = ImportOptions::new().with_root_prefix("Imported").with_max_depth(64);
/// assert_eq!(options.root_prefix(), "Imported/");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Prepended to every normalized instance path so several imports can
    /// coexist in one scene.
    pub root_prefix: String,
    /// Host identity passed to the importer with every evaluation.
    pub host: HostInfo,
    /// Deeper hierarchy paths are skipped with a warning.
    pub max_depth: usize,
    pub default_color: RgbaColor,
}

impl ImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The root prefix, normalized and ending in `/` unless empty.
    pub fn root_prefix(&self) -> String {
        normalize_root_prefix(&self.root_prefix)
    }

    pub fn with_root_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.root_prefix = prefix.into();
        self
    }

    pub fn with_host(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.host = HostInfo {
            name: name.into(),
            version: version.into(),
        };
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_default_color(mut self, color: RgbaColor) -> Self {
        self.default_color = color;
        self
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            root_prefix: String::new(),
            host: HostInfo::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            default_color: DEFAULT_MATERIAL_COLOR,
        }
    }
}
