//! Docstree: Drive Hierarchy Browser
//!
//! Rebuilds the folder hierarchy of a cloud drive from the flat,
//! parent-referencing records its listing API returns, filters it by name and
//! flattens it for display. The tree core in [`tree`] and [`pipeline`] is pure;
//! authentication, the storage provider, preferences and the CLI sit around it.

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod preferences;
pub mod provider;
pub mod render;
pub mod session;
pub mod state;
pub mod tooling;
pub mod tree;
pub mod types;
