use serde_json::json;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

static ENV_LOCK: Mutex<()> = Mutex::new(());

const REDIRECTED: &[&str] = &[
    "HOME",
    "XDG_CONFIG_HOME",
    "XDG_DATA_HOME",
    "XDG_STATE_HOME",
    "DOCSTREE_ACCESS_TOKEN",
];

/// Run `f` with every XDG directory inside `temp_dir`.
pub fn with_xdg_env<F: FnOnce()>(temp_dir: &TempDir, f: F) {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let saved: Vec<(&str, Option<String>)> = REDIRECTED
        .iter()
        .map(|name| (*name, std::env::var(name).ok()))
        .collect();

    let root = temp_dir.path();
    std::env::set_var("HOME", root.join("home"));
    std::env::set_var("XDG_CONFIG_HOME", root.join("config"));
    std::env::set_var("XDG_DATA_HOME", root.join("data"));
    std::env::set_var("XDG_STATE_HOME", root.join("state"));
    std::env::remove_var("DOCSTREE_ACCESS_TOKEN");

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

    for (name, value) in saved {
        match value {
            Some(value) => std::env::set_var(name, value),
            None => std::env::remove_var(name),
        }
    }
    if let Err(panic) = result {
        std::panic::resume_unwind(panic);
    }
}

/// My Drive plus one shared drive, in the listing API's wire shape.
pub fn write_listing(temp_dir: &TempDir) -> PathBuf {
    let listing = json!({
        "files": [
            {"id": "d1", "name": "Docs", "mimeType": "application/vnd.google-apps.folder"},
            {"id": "f1", "name": "Report.pdf", "mimeType": "application/pdf", "parents": ["d1"]},
            {"id": "f2", "name": "notes.txt", "mimeType": "text/plain", "parents": ["d1"]},
            {"id": "d2", "name": "Engineering", "mimeType": "application/vnd.google-apps.folder", "parents": ["root"]},
            {"id": "f3", "name": "Design Review.gdoc", "mimeType": "application/vnd.google-apps.document", "parents": ["d2", "d1"]},
            {"id": "t1", "name": "Roadmap", "mimeType": "application/vnd.google-apps.document", "parents": ["0AB"], "driveId": "0AB"}
        ],
        "drives": [
            {"id": "0AB", "name": "Team"}
        ]
    });
    let path = temp_dir.path().join("listing.json");
    std::fs::write(&path, serde_json::to_string_pretty(&listing).unwrap()).unwrap();
    path
}
