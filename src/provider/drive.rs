//! Google Drive v3 storage client.
//!
//! Read-only: one page of file metadata per call, plus the shared drive list.

use crate::auth::AccessToken;
use crate::config::DriveConfig;
use crate::error::ApiError;
use crate::provider::{RootOption, RootSelector, StorageClient};
use crate::tree::RemoteRecord;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

const FILE_FIELDS: &str = "files(id,name,mimeType,parents,driveId),nextPageToken";
const DRIVE_FIELDS: &str = "drives(id,name)";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    files: Vec<RemoteRecord>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DriveList {
    #[serde(default)]
    drives: Vec<RootOption>,
}

/// HTTP client for the Drive API.
pub struct DriveClient {
    client: reqwest::Client,
    config: DriveConfig,
}

impl DriveClient {
    pub fn new(config: DriveConfig) -> Result<Self, ApiError> {
        config.validate().map_err(ApiError::ConfigError)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::ConnectionFailed(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    /// Query parameters for the single-page file listing of `root`.
    pub fn files_query(root: &RootSelector, page_size: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("pageSize", page_size.to_string()),
            ("fields", FILE_FIELDS.to_string()),
            ("includeItemsFromAllDrives", "true".to_string()),
            ("supportsAllDrives", "true".to_string()),
            ("orderBy", "folder,name_natural".to_string()),
        ];
        match root.drive_id() {
            Some(drive_id) => {
                params.push(("driveId", drive_id.to_string()));
                params.push(("corpora", "drive".to_string()));
            }
            None => params.push(("corpora", "user".to_string())),
        }
        params
    }

    /// Query parameters for the shared drive listing.
    pub fn drives_query(page_size: u32) -> Vec<(&'static str, String)> {
        vec![
            ("pageSize", page_size.to_string()),
            ("fields", DRIVE_FIELDS.to_string()),
        ]
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&AccessToken>,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let token = token.ok_or_else(|| ApiError::Auth("Not signed in".to_string()))?;

        let response = self
            .client
            .get(self.endpoint(path))
            .header(AUTHORIZATION, format!("Bearer {}", token.secret()))
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::ConnectionFailed(format!("Failed to parse {} response: {}", path, e)))
    }
}

#[async_trait]
impl StorageClient for DriveClient {
    async fn fetch_records(
        &self,
        token: Option<&AccessToken>,
        root: &RootSelector,
    ) -> Result<Vec<RemoteRecord>, ApiError> {
        let query = Self::files_query(root, self.config.page_size);
        let list: FileList = self.get_json("files", token, &query).await?;
        if list.next_page_token.is_some() {
            debug!(
                root = %root,
                page_size = self.config.page_size,
                "Listing truncated to the first page"
            );
        }
        info!(root = %root, records = list.files.len(), "Fetched drive records");
        Ok(list.files)
    }

    async fn fetch_root_options(
        &self,
        token: Option<&AccessToken>,
    ) -> Result<Vec<RootOption>, ApiError> {
        let query = Self::drives_query(self.config.drives_page_size);
        let list: DriveList = self.get_json("drives", token, &query).await?;
        Ok(list.drives)
    }

    fn label(&self) -> String {
        format!("Google Drive ({})", self.config.api_base)
    }
}
