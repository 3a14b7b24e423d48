//! Accept/reject payloads sent to whoever applies the change.

use crate::config::DiffConfig;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAction {
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Unified,
    Split,
}

/// What the user was looking at when they decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffActionData {
    pub file_path: String,
    pub original_content: String,
    pub modified_content: String,
    pub view_mode: ViewMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffActionPayload {
    pub action: DiffAction,
    pub file_path: String,
    pub original_content: String,
    pub modified_content: String,
    pub view_mode: ViewMode,
    /// UTC, millisecond precision, e.g. `2024-01-15T10:30:00.000Z`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl DiffActionPayload {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Package an action for transport.
///
/// Paths and content are passed through as-is; checking them is up to the caller.
pub fn build_diff_action_payload(
    action: DiffAction,
    data: DiffActionData,
    config: &DiffConfig,
) -> DiffActionPayload {
    let timestamp = config
        .include_timestamp
        .then(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

    DiffActionPayload {
        action,
        file_path: data.file_path,
        original_content: data.original_content,
        modified_content: data.modified_content,
        view_mode: data.view_mode,
        timestamp,
    }
}
