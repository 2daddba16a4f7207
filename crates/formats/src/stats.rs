use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ContentError, read_file};

/// Summary of the render run that produced the tiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderStats {
    #[serde(default, deserialize_with = "foundation::text::lenient_string")]
    pub tectonicus_version: String,
    #[serde(default, deserialize_with = "foundation::text::lenient_string")]
    pub render_time: String,
    #[serde(default)]
    pub rendered_on_date: String,
    #[serde(default)]
    pub rendered_on_time: String,
    #[serde(default, deserialize_with = "foundation::text::lenient_u64")]
    pub peak_memory_bytes: u64,
}

impl RenderStats {
    pub fn from_json_str(payload: &str) -> Result<Self, ContentError> {
        serde_json::from_str(payload).map_err(ContentError::parse("render stats"))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        Self::from_json_str(&read_file(path.as_ref())?)
    }

    /// Peak memory in MiB with one decimal, e.g. `"512.0"`.
    pub fn peak_memory_mb(&self) -> String {
        format!("{:.1}", self.peak_memory_bytes as f64 / 1024.0 / 1024.0)
    }
}
