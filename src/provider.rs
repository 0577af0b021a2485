//! Storage provider integration.
//!
//! The tree core never talks to the network. Everything it consumes comes
//! through [`StorageClient`]: one bounded page of records for the selected
//! root and the list of alternative roots (shared drives).

pub mod drive;
pub mod static_records;

pub use drive::DriveClient;
pub use static_records::StaticRecords;

use crate::auth::AccessToken;
use crate::error::ApiError;
use crate::tree::RemoteRecord;
use crate::types::MY_DRIVE_ROOT_ID;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which top-level container the forest is built relative to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum RootSelector {
    #[default]
    MyDrive,
    Shared(String),
}

impl RootSelector {
    /// Identifier records use as the parent of top-level entries.
    pub fn root_id(&self) -> &str {
        match self {
            RootSelector::MyDrive => MY_DRIVE_ROOT_ID,
            RootSelector::Shared(id) => id,
        }
    }

    pub fn drive_id(&self) -> Option<&str> {
        match self {
            RootSelector::MyDrive => None,
            RootSelector::Shared(id) => Some(id),
        }
    }

    /// Empty ids and the personal root id both mean My Drive.
    pub fn from_persisted(value: Option<String>) -> Self {
        match value {
            Some(id) if !id.trim().is_empty() && id != MY_DRIVE_ROOT_ID => {
                RootSelector::Shared(id)
            }
            _ => RootSelector::MyDrive,
        }
    }

    pub fn to_persisted(&self) -> Option<String> {
        self.drive_id().map(str::to_string)
    }
}

impl fmt::Display for RootSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootSelector::MyDrive => f.write_str("My Drive"),
            RootSelector::Shared(id) => write!(f, "shared drive {}", id),
        }
    }
}

/// An alternative root the user may select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootOption {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Source of record batches and root options.
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Fetch a single bounded page of records for `root`.
    async fn fetch_records(
        &self,
        token: Option<&AccessToken>,
        root: &RootSelector,
    ) -> Result<Vec<RemoteRecord>, ApiError>;

    /// Enumerate shared roots. Callers treat failure as non-essential.
    async fn fetch_root_options(
        &self,
        token: Option<&AccessToken>,
    ) -> Result<Vec<RootOption>, ApiError>;

    /// Whether calls need a signed-in user.
    fn requires_token(&self) -> bool {
        true
    }

    /// Short human-readable label for status output.
    fn label(&self) -> String;
}
