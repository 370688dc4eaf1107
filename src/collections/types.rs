//! Types returned by the collections endpoints

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier the server assigned to a collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(String);

impl CollectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An existing collection as reported by `GET /api/collections`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionRecord {
    pub id: CollectionId,

    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub system: bool,

    /// Field definitions, kept untyped
    #[serde(default)]
    pub schema: serde_json::Value,
}

/// One page of the collection listing
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionList {
    #[serde(default)]
    pub page: u32,

    #[serde(default)]
    pub per_page: u32,

    #[serde(default)]
    pub total_items: u32,

    #[serde(default)]
    pub items: Vec<CollectionRecord>,
}
