use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Work item enqueued for every upload and consumed by the queue worker
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingMessage {
    pub video_id: String,
    pub title: String,
    pub user_id: String,
    pub blob_name: String,
    pub timestamp: DateTime<Utc>,
}

impl ProcessingMessage {
    /// Encode for the queue transport: JSON, then base64 text
    pub fn to_transport(&self) -> Result<String> {
        let json = serde_json::to_vec(self)?;
        Ok(BASE64.encode(json))
    }

    /// Decode a transport-encoded message
    pub fn from_transport(text: &str) -> Result<Self> {
        let json = BASE64.decode(text)?;
        Ok(serde_json::from_slice(&json)?)
    }
}
