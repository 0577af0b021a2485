//! Records loaded from a local JSON listing instead of the network.

use crate::auth::AccessToken;
use crate::error::ApiError;
use crate::provider::{RootOption, RootSelector, StorageClient};
use crate::tree::RemoteRecord;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListingFile {
    Records(Vec<RemoteRecord>),
    Listing {
        #[serde(default)]
        files: Vec<RemoteRecord>,
        #[serde(default)]
        drives: Vec<RootOption>,
    },
}

/// Storage client over a fixed record batch.
///
/// Records carrying a `driveId` belong to that shared drive; the rest belong
/// to My Drive.
#[derive(Debug, Clone, Default)]
pub struct StaticRecords {
    records: Vec<RemoteRecord>,
    drives: Vec<RootOption>,
    source: Option<PathBuf>,
}

impl StaticRecords {
    pub fn new(records: Vec<RemoteRecord>) -> Self {
        Self {
            records,
            drives: Vec::new(),
            source: None,
        }
    }

    /// Load a bare record array or a `{ "files": [...], "drives": [...] }` listing.
    pub fn from_file(path: &Path) -> Result<Self, ApiError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to read records file {}: {}",
                path.display(),
                e
            ))
        })?;
        let parsed: ListingFile = serde_json::from_str(&content).map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to parse records file {}: {}",
                path.display(),
                e
            ))
        })?;
        let (records, drives) = match parsed {
            ListingFile::Records(records) => (records, Vec::new()),
            ListingFile::Listing { files, drives } => (files, drives),
        };
        Ok(Self {
            records,
            drives,
            source: Some(path.to_path_buf()),
        })
    }

    pub fn records(&self) -> &[RemoteRecord] {
        &self.records
    }
}

#[async_trait]
impl StorageClient for StaticRecords {
    async fn fetch_records(
        &self,
        _token: Option<&AccessToken>,
        root: &RootSelector,
    ) -> Result<Vec<RemoteRecord>, ApiError> {
        let drive_id = root.drive_id();
        Ok(self
            .records
            .iter()
            .filter(|r| r.drive_id.as_deref() == drive_id)
            .cloned()
            .collect())
    }

    async fn fetch_root_options(
        &self,
        _token: Option<&AccessToken>,
    ) -> Result<Vec<RootOption>, ApiError> {
        Ok(self.drives.clone())
    }

    fn requires_token(&self) -> bool {
        false
    }

    fn label(&self) -> String {
        match &self.source {
            Some(path) => format!("file {}", path.display()),
            None => "in-memory records".to_string(),
        }
    }
}
