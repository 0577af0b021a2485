//! Remote file/folder records as returned by the storage provider listing call.

use crate::types::NodeID;
use serde::{Deserialize, Deserializer, Serialize};

/// One file or folder entry from a listing page.
///
/// Field names follow the Drive v3 wire shape. Missing or `null` fields
/// deserialize to empty values so a malformed record is normalized rather
/// than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRecord {
    pub id: NodeID,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Provider-specific type marker (a MIME type for Drive).
    #[serde(
        rename = "mimeType",
        default,
        deserialize_with = "null_as_default"
    )]
    pub kind_hint: String,

    /// Parent folder identifiers, in provider order.
    #[serde(rename = "parents", default, deserialize_with = "null_as_default")]
    pub parent_ids: Vec<NodeID>,

    /// Shared drive the record lives in, if any.
    #[serde(rename = "driveId", default, skip_serializing_if = "Option::is_none")]
    pub drive_id: Option<String>,
}

impl RemoteRecord {
    pub fn new(id: impl Into<NodeID>, name: impl Into<String>, kind_hint: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind_hint: kind_hint.into(),
            parent_ids: Vec::new(),
            drive_id: None,
        }
    }

    pub fn folder(id: impl Into<NodeID>, name: impl Into<String>) -> Self {
        Self::new(id, name, crate::types::FOLDER_KIND_HINT)
    }

    pub fn file(id: impl Into<NodeID>, name: impl Into<String>) -> Self {
        Self::new(id, name, "application/octet-stream")
    }

    pub fn with_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeID>,
    {
        self.parent_ids = parents.into_iter().map(Into::into).collect();
        self
    }

    pub fn in_drive(mut self, drive_id: impl Into<String>) -> Self {
        self.drive_id = Some(drive_id.into());
        self
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
