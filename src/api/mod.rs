//! Wire types for the assistant backend API.
//!
//! The backend exposes two JSON endpoints: `POST /chat` taking a message
//! and returning one assistant reply, and `GET /health`. Reply payloads
//! are deserialized leniently; anything the backend omits simply stays
//! `None` and downstream presentation logic decides what to show.

use serde::{Deserialize, Serialize};

use crate::core::dataset::TabularDataset;

/// Request body for `POST /chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

/// One assistant reply, as served by the backend.
///
/// `reply` is the conversational text. A structured `dataset` and/or a
/// `chart` request may ride along with it; their mere presence is what
/// drives presentation, not anything in the text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AssistantReply {
    #[serde(default)]
    pub reply: String,
    #[serde(default)]
    pub dataset: Option<TabularDataset>,
    #[serde(default)]
    pub chart: Option<ChartPayload>,
}

/// Chart request attached to a reply. Field names follow the backend's
/// camelCase convention.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChartPayload {
    /// Rows to plot. When absent, the reply's own dataset is plotted.
    #[serde(default)]
    pub data: Option<TabularDataset>,
    #[serde(default, rename = "xKey")]
    pub x_key: Option<String>,
    #[serde(default, rename = "yKey")]
    pub y_key: Option<String>,
    /// Chart style; `"line"` selects a line chart, anything else a bar chart.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
}
