use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::DesignDocument;

/// Business entity a design document and profile belong to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(pub String);

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persistence boundary for design documents.
///
/// `load` hands back the raw stored payload so malformed or legacy documents
/// can be tolerated during decoding; `save` always receives a full document.
/// Writes are last-write-wins.
pub trait DesignStore: Send + Sync {
    fn load(&self, store_id: &StoreId) -> Result<Option<Value>, StoreError>;
    fn save(&self, store_id: &StoreId, document: &DesignDocument) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("design store unavailable: {0}")]
    Unavailable(String),
    #[error("design document rejected: {0}")]
    Rejected(String),
}

/// Read-only source of store profiles consumed by the renderer.
pub trait ProfileSource: Send + Sync {
    fn profile(&self, store_id: &StoreId) -> Result<Option<Value>, ProfileSourceError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileSourceError {
    #[error("profile source unavailable: {0}")]
    Unavailable(String),
}
