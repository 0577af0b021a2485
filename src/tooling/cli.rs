//! CLI Tooling
//!
//! Command-line interface for browsing a Drive hierarchy. Each invocation
//! restores the session silently, applies one state transition, persists
//! preferences and renders the result.

use crate::auth::{CachedTokenSource, TerminalPrompt, TokenCache, TokenSource};
use crate::config::{ConfigLoader, DocstreeConfig};
use crate::error::ApiError;
use crate::preferences::{PreferenceStore, XdgPreferenceStore};
use crate::provider::{DriveClient, RootSelector, StaticRecords, StorageClient};
use crate::render::{
    format_favorites_json, format_favorites_text, format_roots_json, format_roots_text,
    format_status_json, format_status_text, format_tree_json, format_tree_text, RenderStyle,
    StatusReport,
};
use crate::session::Session;
use crate::state::{AppState, Theme};
use crate::tree::flatten;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Docstree CLI - Browse a Drive folder hierarchy as a tree
#[derive(Parser)]
#[command(name = "docstree")]
#[command(about = "Browse Google Drive files and folders as a searchable tree")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Read records from a local JSON listing instead of the Drive API
    #[arg(long, global = true)]
    pub records: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Sign in and cache an access token
    SignIn,
    /// Revoke the cached token and sign out
    SignOut,
    /// Show session and preference status
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the file tree for the selected root
    Tree {
        /// Case-insensitive name filter
        #[arg(long, short)]
        query: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the tree filtered by name
    Search {
        query: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List My Drive and the shared drives
    Roots {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Select the root the tree is built from
    Root {
        /// Shared drive id ("root" selects My Drive)
        #[arg(required_unless_present = "clear", conflicts_with = "clear")]
        id: Option<String>,
        /// Go back to My Drive
        #[arg(long)]
        clear: bool,
    },
    /// Set the color theme, or toggle it when omitted
    Theme { theme: Option<String> },
    /// Manage favorites
    Favorite {
        #[command(subcommand)]
        command: FavoriteCommands,
    },
    /// Print the merged configuration
    Config,
}

#[derive(Subcommand, Debug, Clone)]
pub enum FavoriteCommands {
    /// Favorite a file or folder from the current tree
    Add { id: String },
    /// Remove a favorite
    Remove { id: String },
    /// List favorites
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_format(format: &str) -> Result<OutputFormat, ApiError> {
    match format {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(ApiError::ConfigError(format!(
            "Invalid format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

/// CLI context for executing commands
pub struct CliContext {
    config: DocstreeConfig,
    preferences: Arc<dyn PreferenceStore>,
    preferences_path: Option<PathBuf>,
    client: Arc<dyn StorageClient>,
    tokens: Arc<dyn TokenSource>,
    color: bool,
}

impl CliContext {
    /// Create a context from the layered config, XDG preferences and token cache.
    ///
    /// `records_path` swaps the Drive client for a local listing.
    pub fn new(config_path: Option<PathBuf>, records_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = ConfigLoader::resolve(config_path.as_deref())?;
        let preferences = XdgPreferenceStore::new()?;
        let preferences_path = preferences.path().to_path_buf();

        let client: Arc<dyn StorageClient> = match records_path {
            Some(path) => Arc::new(StaticRecords::from_file(&path)?),
            None => Arc::new(DriveClient::new(config.drive.clone())?),
        };
        let tokens = CachedTokenSource::new(TokenCache::new()?, Box::new(TerminalPrompt));
        let color = config.ui.color && std::io::stdout().is_terminal();

        Ok(Self {
            config,
            preferences: Arc::new(preferences),
            preferences_path: Some(preferences_path),
            client,
            tokens: Arc::new(tokens),
            color,
        })
    }

    /// Assemble a context from explicit parts.
    pub fn from_parts(
        config: DocstreeConfig,
        preferences: Arc<dyn PreferenceStore>,
        client: Arc<dyn StorageClient>,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        let color = config.ui.color;
        Self {
            config,
            preferences,
            preferences_path: None,
            client,
            tokens,
            color,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn config(&self) -> &DocstreeConfig {
        &self.config
    }

    /// Execute a CLI command on a fresh runtime.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(ApiError::ConfigError(
                "Cannot run a CLI command from within an async runtime".to_string(),
            ));
        }
        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| ApiError::ConfigError(format!("Failed to create runtime: {}", e)))?;
        rt.block_on(self.execute_async(command))
    }

    /// Execute a CLI command on the caller's runtime.
    pub async fn execute_async(&self, command: &Commands) -> Result<String, ApiError> {
        let state = AppState::load(self.preferences.as_ref(), self.config.ui.default_theme);
        let mut session = Session::new(Arc::clone(&self.client), Arc::clone(&self.tokens), state);

        match command {
            Commands::SignIn => self.handle_sign_in(&mut session).await,
            Commands::SignOut => self.handle_sign_out(&mut session).await,
            Commands::Status { format } => {
                let format = parse_format(format)?;
                session.resume().await;
                self.handle_status(&session, format)
            }
            Commands::Tree { query, format } => {
                let format = parse_format(format)?;
                self.handle_tree(&mut session, query.as_deref().unwrap_or(""), format)
                    .await
            }
            Commands::Search { query, format } => {
                let format = parse_format(format)?;
                self.handle_tree(&mut session, query, format).await
            }
            Commands::Roots { format } => {
                let format = parse_format(format)?;
                self.handle_roots(&mut session, format).await
            }
            Commands::Root { id, clear } => {
                let root = if *clear {
                    RootSelector::MyDrive
                } else {
                    RootSelector::from_persisted(id.clone())
                };
                self.handle_root(&mut session, root)
            }
            Commands::Theme { theme } => self.handle_theme(&mut session, theme.as_deref()),
            Commands::Favorite { command } => self.handle_favorite(&mut session, command).await,
            Commands::Config => self
                .config
                .to_toml_string()
                .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e))),
        }
    }

    fn style(&self, state: &AppState) -> RenderStyle {
        RenderStyle::new(state.theme, self.color)
    }

    fn persist(&self, session: &Session) -> Result<(), ApiError> {
        session.state().save(self.preferences.as_ref())
    }

    async fn require_records(&self, session: &mut Session) -> Result<(), ApiError> {
        session.resume().await;
        if !session.is_signed_in() {
            return Err(ApiError::Auth("Not signed in".to_string()));
        }
        session.refresh().await?;
        Ok(())
    }

    async fn handle_sign_in(&self, session: &mut Session) -> Result<String, ApiError> {
        if !self.client.requires_token() {
            return Ok(format!(
                "No sign-in needed for {}.",
                session.client_label()
            ));
        }
        session.sign_in().await?;
        Ok("Signed in. Run `docstree tree` to browse your files.".to_string())
    }

    async fn handle_sign_out(&self, session: &mut Session) -> Result<String, ApiError> {
        if !session.resume().await {
            return Ok("Already signed out.".to_string());
        }
        session.sign_out().await;
        info!("Signed out");
        Ok("Signed out.".to_string())
    }

    fn handle_status(&self, session: &Session, format: OutputFormat) -> Result<String, ApiError> {
        let state = session.state();
        let status = StatusReport {
            signed_in: session.is_signed_in(),
            source: session.client_label(),
            root: state.root.to_persisted(),
            theme: state.theme,
            favorites: state.favorites.len(),
            preferences_path: self
                .preferences_path
                .as_ref()
                .map(|p| p.display().to_string()),
        };
        match format {
            OutputFormat::Text => Ok(format_status_text(&status, &self.style(state))),
            OutputFormat::Json => format_status_json(&status),
        }
    }

    async fn handle_tree(
        &self,
        session: &mut Session,
        query: &str,
        format: OutputFormat,
    ) -> Result<String, ApiError> {
        self.require_records(session).await?;
        session.update(|s| s.with_query(query));
        let view = session.view();
        if view.report.unreachable > 0 {
            info!(
                unreachable = view.report.unreachable,
                "Some records sit outside the selected root"
            );
        }
        let state = session.state();
        match format {
            OutputFormat::Text => Ok(format_tree_text(&view, state, &self.style(state))),
            OutputFormat::Json => format_tree_json(&view, state),
        }
    }

    async fn handle_roots(
        &self,
        session: &mut Session,
        format: OutputFormat,
    ) -> Result<String, ApiError> {
        session.resume().await;
        let options = session.root_options().await;
        let state = session.state();
        match format {
            OutputFormat::Text => Ok(format_roots_text(
                &options,
                &state.root,
                &self.style(state),
            )),
            OutputFormat::Json => format_roots_json(&options, &state.root),
        }
    }

    fn handle_root(&self, session: &mut Session, root: RootSelector) -> Result<String, ApiError> {
        session.update(|s| s.with_root(root));
        self.persist(session)?;
        Ok(format!("Selected root: {}", session.selected_root()))
    }

    fn handle_theme(&self, session: &mut Session, theme: Option<&str>) -> Result<String, ApiError> {
        match theme {
            Some(raw) => {
                let theme: Theme = raw.parse()?;
                session.update(|s| s.with_theme(theme));
            }
            None => session.update(AppState::toggle_theme),
        }
        self.persist(session)?;
        Ok(format!("Theme: {}", session.state().theme))
    }

    async fn handle_favorite(
        &self,
        session: &mut Session,
        command: &FavoriteCommands,
    ) -> Result<String, ApiError> {
        match command {
            FavoriteCommands::Add { id } => {
                self.require_records(session).await?;
                let view = session.view();
                let node = flatten(&view.forest)
                    .into_iter()
                    .find(|n| &n.id == id)
                    .ok_or_else(|| ApiError::NodeNotFound(id.clone()))?
                    .clone();
                if session.state().is_favorite(id) {
                    return Ok(format!("Already a favorite: {}", node.name));
                }
                session.update(|s| s.add_favorite(&node));
                self.persist(session)?;
                Ok(format!("Added favorite: {}", node.name))
            }
            FavoriteCommands::Remove { id } => {
                if !session.state().is_favorite(id) {
                    return Err(ApiError::NodeNotFound(id.clone()));
                }
                session.update(|s| s.remove_favorite(id));
                self.persist(session)?;
                Ok(format!("Removed favorite: {}", id))
            }
            FavoriteCommands::List { format } => {
                let state = session.state();
                match parse_format(format)? {
                    OutputFormat::Text => {
                        Ok(format_favorites_text(&state.favorites, &self.style(state)))
                    }
                    OutputFormat::Json => format_favorites_json(&state.favorites),
                }
            }
        }
    }
}
