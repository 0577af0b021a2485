//! Format forests, roots, favorites and status as terminal text or JSON.

use crate::error::ApiError;
use crate::pipeline::Recomputed;
use crate::provider::{RootOption, RootSelector};
use crate::state::{AppState, FavoriteEntry, Theme};
use crate::tree::{NameQuery, Node};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;

/// How text output is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    pub theme: Theme,
    pub color: bool,
}

impl RenderStyle {
    pub fn new(theme: Theme, color: bool) -> Self {
        Self { theme, color }
    }

    pub fn plain() -> Self {
        Self::new(Theme::default(), false)
    }

    fn folder(&self, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        match self.theme {
            Theme::Dark => text.bright_cyan().bold().to_string(),
            Theme::Light => text.blue().bold().to_string(),
        }
    }

    fn file(&self, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        match self.theme {
            Theme::Dark => text.bright_white().to_string(),
            Theme::Light => text.black().to_string(),
        }
    }

    fn matched(&self, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        match self.theme {
            Theme::Dark => text.black().on_yellow().to_string(),
            Theme::Light => text.black().on_bright_yellow().to_string(),
        }
    }

    fn muted(&self, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        text.dimmed().to_string()
    }

    fn heading(&self, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        text.bold().underline().to_string()
    }
}

/// Human-readable forest listing with counts.
pub fn format_tree_text(view: &Recomputed, state: &AppState, style: &RenderStyle) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        style.heading(&format!("Drive files ({})", state.root))
    ));

    if view.filtered.is_empty() {
        if view.forest.is_empty() {
            out.push_str("No files returned yet.\n");
        } else {
            out.push_str(&format!("No matches for '{}'.\n", state.query));
        }
    } else {
        let query = NameQuery::parse(&state.query);
        let mut lines = Vec::new();
        let last = view.filtered.len() - 1;
        for (i, node) in view.filtered.iter().enumerate() {
            push_node_lines(&mut lines, node, "", i == last, state, query.as_ref(), style);
        }
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
    }

    out.push('\n');
    if NameQuery::parse(&state.query).is_some() {
        out.push_str(&format!("{} of {} items\n", view.count, view.total));
    } else {
        out.push_str(&format!("{} items\n", view.count));
    }
    out
}

fn push_node_lines(
    lines: &mut Vec<String>,
    node: &Node,
    prefix: &str,
    is_last: bool,
    state: &AppState,
    query: Option<&NameQuery>,
    style: &RenderStyle,
) {
    let connector = if is_last { "└── " } else { "├── " };
    let icon = if node.is_folder() { "📁" } else { "📄" };
    let star = if state.is_favorite(&node.id) { " ★" } else { "" };
    let name = highlight_name(&node.name, node.is_folder(), query, style);
    lines.push(format!(
        "{}{}{} {}{} {}",
        style.muted(prefix),
        style.muted(connector),
        icon,
        name,
        star,
        style.muted(&format!("[{}]", node.id))
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
    if let Some(last) = node.children.len().checked_sub(1) {
        for (i, child) in node.children.iter().enumerate() {
            push_node_lines(lines, child, &child_prefix, i == last, state, query, style);
        }
    }
}

fn highlight_name(
    name: &str,
    is_folder: bool,
    query: Option<&NameQuery>,
    style: &RenderStyle,
) -> String {
    let base = |text: &str| {
        if is_folder {
            style.folder(text)
        } else {
            style.file(text)
        }
    };
    let Some(query) = query else {
        return base(name);
    };
    if !query.matches(name) {
        return base(name);
    }
    let (lower, origin) = lowercase_with_origins(name);
    let span = lower.find(query.needle()).and_then(|start| {
        let from = *origin.get(start)?;
        let last = *origin.get(start + query.needle().len() - 1)?;
        let to = last + name[last..].chars().next()?.len_utf8();
        Some((from, to))
    });
    match span {
        Some((from, to)) => format!(
            "{}{}{}",
            base(&name[..from]),
            style.matched(&name[from..to]),
            base(&name[to..])
        ),
        None => style.matched(name),
    }
}

/// Lowercases `name` one char at a time, recording for every byte of the
/// result the byte offset of the source char it came from.
fn lowercase_with_origins(name: &str) -> (String, Vec<usize>) {
    let mut lower = String::with_capacity(name.len());
    let mut origin = Vec::with_capacity(name.len());
    for (offset, c) in name.char_indices() {
        for folded in c.to_lowercase() {
            lower.push(folded);
            origin.resize(lower.len(), offset);
        }
    }
    (lower, origin)
}

#[derive(Serialize)]
struct TreeJson<'a> {
    root: Option<String>,
    root_id: &'a str,
    query: &'a str,
    count: usize,
    total: usize,
    tree: &'a [Node],
}

/// Machine-readable forest listing.
pub fn format_tree_json(view: &Recomputed, state: &AppState) -> Result<String, ApiError> {
    let payload = TreeJson {
        root: state.root.to_persisted(),
        root_id: state.root.root_id(),
        query: &state.query,
        count: view.count,
        total: view.total,
        tree: &view.filtered,
    };
    to_pretty_json(&payload)
}

/// My Drive plus shared drives, marking the selected one.
pub fn format_roots_text(
    options: &[RootOption],
    selected: &RootSelector,
    style: &RenderStyle,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", style.heading("Roots")));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["", "Id", "Name"]);
    let mark = |on: bool| if on { "*" } else { "" };
    table.add_row(vec![
        mark(*selected == RootSelector::MyDrive).to_string(),
        String::new(),
        "My Drive".to_string(),
    ]);
    for option in options {
        table.add_row(vec![
            mark(selected.drive_id() == Some(option.id.as_str())).to_string(),
            option.id.clone(),
            option.name.clone(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!("Total: {} shared drives.\n", options.len()));
    out
}

pub fn format_roots_json(
    options: &[RootOption],
    selected: &RootSelector,
) -> Result<String, ApiError> {
    to_pretty_json(&json!({
        "selected": selected.to_persisted(),
        "roots": options,
    }))
}

pub fn format_favorites_text(favorites: &[FavoriteEntry], style: &RenderStyle) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", style.heading("Favorites")));
    if favorites.is_empty() {
        out.push_str("No favorites yet.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Kind", "Link"]);
    for favorite in favorites {
        let kind = if favorite.kind.is_folder() { "folder" } else { "file" };
        table.add_row(vec![
            favorite.name.clone(),
            kind.to_string(),
            favorite.link.clone(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!("Total: {} favorites.\n", favorites.len()));
    out
}

pub fn format_favorites_json(favorites: &[FavoriteEntry]) -> Result<String, ApiError> {
    to_pretty_json(&json!({ "favorites": favorites }))
}

/// Session and preference summary.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub signed_in: bool,
    pub source: String,
    pub root: Option<String>,
    pub theme: Theme,
    pub favorites: usize,
    pub preferences_path: Option<String>,
}

pub fn format_status_text(status: &StatusReport, style: &RenderStyle) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", style.heading("Docstree")));
    let connection = if status.signed_in {
        "Connected"
    } else {
        "Signed out"
    };
    out.push_str(&format!("  Session: {}\n", connection));
    out.push_str(&format!("  Source: {}\n", status.source));
    out.push_str(&format!(
        "  Root: {}\n",
        RootSelector::from_persisted(status.root.clone())
    ));
    out.push_str(&format!("  Theme: {}\n", status.theme));
    out.push_str(&format!("  Favorites: {}\n", status.favorites));
    if let Some(ref path) = status.preferences_path {
        out.push_str(&format!("  Preferences: {}\n", path));
    }
    out
}

pub fn format_status_json(status: &StatusReport) -> Result<String, ApiError> {
    to_pretty_json(status)
}

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::ConfigError(format!("Failed to serialize output: {}", e)))
}
