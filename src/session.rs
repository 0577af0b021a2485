//! Session orchestration: token lifecycle, record fetches and recompute.
//!
//! The session owns the last fetched record batch. Every view is recomputed
//! from that batch, the selected root and the current query.

use crate::auth::{AccessToken, TokenSource};
use crate::error::ApiError;
use crate::pipeline::{recompute, Recomputed};
use crate::provider::{RootOption, RootSelector, StorageClient};
use crate::state::AppState;
use crate::tree::RemoteRecord;
use std::sync::Arc;

pub struct Session {
    client: Arc<dyn StorageClient>,
    tokens: Arc<dyn TokenSource>,
    token: Option<AccessToken>,
    records: Vec<RemoteRecord>,
    state: AppState,
}

impl Session {
    pub fn new(
        client: Arc<dyn StorageClient>,
        tokens: Arc<dyn TokenSource>,
        state: AppState,
    ) -> Self {
        Self {
            client,
            tokens,
            token: None,
            records: Vec::new(),
            state,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply a state transition. A root change drops the records fetched
    /// for the previous root.
    pub fn update(&mut self, transition: impl FnOnce(AppState) -> AppState) {
        let previous_root = self.state.root.clone();
        self.state = transition(std::mem::take(&mut self.state));
        if self.state.root != previous_root {
            self.records.clear();
        }
    }

    pub fn records(&self) -> &[RemoteRecord] {
        &self.records
    }

    pub fn client_label(&self) -> String {
        self.client.label()
    }

    /// True when fetches can proceed: a token is held or none is needed.
    pub fn is_signed_in(&self) -> bool {
        self.token.is_some() || !self.client.requires_token()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Interactive sign-in.
    pub async fn sign_in(&mut self) -> Result<(), ApiError> {
        let token = self
            .tokens
            .acquire_token(true)
            .await?
            .ok_or_else(|| ApiError::Auth("No token returned".to_string()))?;
        tracing::info!("Signed in");
        self.token = Some(token);
        Ok(())
    }

    /// Silent restore of a cached credential. Returns whether a token was found.
    pub async fn resume(&mut self) -> bool {
        match self.tokens.acquire_token(false).await {
            Ok(Some(token)) => {
                tracing::debug!("Restored session");
                self.token = Some(token);
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("Silent sign-in failed: {}", e);
                false
            }
        }
    }

    /// Revoke the token if held. Always ends signed out with no records.
    pub async fn sign_out(&mut self) {
        if let Some(token) = self.token.take() {
            if let Err(e) = self.tokens.revoke_token(&token).await {
                tracing::warn!("Token revocation failed: {}", e);
            }
        }
        self.records.clear();
    }

    /// Fetch records for the selected root. Returns how many arrived.
    ///
    /// Signed out clears the records without a fetch. A failed fetch keeps
    /// the previous batch.
    pub async fn refresh(&mut self) -> Result<usize, ApiError> {
        if !self.is_signed_in() {
            self.records.clear();
            return Ok(0);
        }
        let records = self
            .client
            .fetch_records(self.token.as_ref(), &self.state.root)
            .await?;
        tracing::debug!(root = %self.state.root, count = records.len(), "Records refreshed");
        self.records = records;
        Ok(self.records.len())
    }

    /// Shared roots for the root picker. Failures are logged and yield an empty list.
    pub async fn root_options(&self) -> Vec<RootOption> {
        if !self.is_signed_in() {
            return Vec::new();
        }
        match self.client.fetch_root_options(self.token.as_ref()).await {
            Ok(options) => options,
            Err(e) => {
                tracing::warn!("Failed to load shared drives: {}", e);
                Vec::new()
            }
        }
    }

    pub fn view(&self) -> Recomputed {
        recompute(&self.records, self.state.root.root_id(), &self.state.query)
    }

    pub fn selected_root(&self) -> &RootSelector {
        &self.state.root
    }
}
