//! Requested response formats.

use serde::{Deserialize, Serialize};

/// Requested response format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Free-form text (the default when no format is requested).
    Text,
    /// The response content must be syntactically valid JSON with no
    /// surrounding prose or markup.
    JsonObject,
}

impl ResponseFormat {
    /// Whether this format demands JSON-only output.
    pub fn wants_json(&self) -> bool {
        matches!(self, Self::JsonObject)
    }
}
