use crate::config::default_filename_template;

use serde::{Deserialize, Serialize};

/// Destination naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Template for the renamed recording. The extension is always `.avi`.
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            filename_template: default_filename_template(),
        }
    }
}
