//! Core types shared across the docstree crate.

/// NodeID: provider-assigned identifier of a file or folder record
pub type NodeID = String;

/// Kind hint the storage provider uses to mark a folder record
pub const FOLDER_KIND_HINT: &str = "application/vnd.google-apps.folder";

/// Root identifier of the personal drive ("My Drive")
pub const MY_DRIVE_ROOT_ID: &str = "root";
