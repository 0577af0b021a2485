use docstree::error::ApiError;
use docstree::tooling::cli::{CliContext, Commands, FavoriteCommands};
use tempfile::TempDir;

use crate::integration::support::{with_xdg_env, write_listing};

fn context(temp_dir: &TempDir) -> CliContext {
    let listing = write_listing(temp_dir);
    CliContext::new(None, Some(listing)).unwrap().with_color(false)
}

fn tree_json(cli: &CliContext, query: Option<&str>) -> serde_json::Value {
    let output = cli
        .execute(&Commands::Tree {
            query: query.map(str::to_string),
            format: "json".to_string(),
        })
        .unwrap();
    serde_json::from_str(&output).unwrap()
}

#[test]
fn tree_json_contract_has_required_fields() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let cli = context(&temp_dir);
        let parsed = tree_json(&cli, None);

        assert_eq!(parsed["root_id"], "root");
        assert!(parsed["root"].is_null());
        assert_eq!(parsed["query"], "");
        assert_eq!(parsed["count"], 6);
        assert_eq!(parsed["total"], 6);

        let tree = parsed["tree"].as_array().expect("tree array should exist");
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0]["name"], "Docs");
        assert_eq!(tree[0]["kind"], "folder");
        assert_eq!(
            tree[0]["link"],
            "https://drive.google.com/drive/folders/d1"
        );
        let docs_children: Vec<&str> = tree[0]["children"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(docs_children, vec!["Report.pdf", "notes.txt", "Design Review.gdoc"]);
        assert_eq!(tree[1]["children"][0]["id"], "f3");
        assert!(tree[0]["children"][0].get("children").is_none());
    });
}

#[test]
fn search_keeps_ancestors_and_counts_matches() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let cli = context(&temp_dir);

        let parsed = tree_json(&cli, Some("REVIEW"));
        assert_eq!(parsed["count"], 4);
        assert_eq!(parsed["total"], 6);
        let tree = parsed["tree"].as_array().unwrap();
        assert_eq!(tree.len(), 2);
        for folder in tree {
            let children = folder["children"].as_array().unwrap();
            assert_eq!(children.len(), 1);
            assert_eq!(children[0]["name"], "Design Review.gdoc");
        }

        let text = cli
            .execute(&Commands::Search {
                query: "report".to_string(),
                format: "text".to_string(),
            })
            .unwrap();
        assert!(text.contains("Docs"));
        assert!(text.contains("Report.pdf"));
        assert!(!text.contains("notes.txt"));
        assert!(text.contains("2 of 6 items"));
    });
}

#[test]
fn folder_match_keeps_whole_subtree() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let cli = context(&temp_dir);
        let parsed = tree_json(&cli, Some("docs"));
        assert_eq!(parsed["count"], 4);
        assert_eq!(parsed["tree"][0]["children"].as_array().unwrap().len(), 3);
    });
}

#[test]
fn root_selection_persists_and_scopes_the_tree() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let cli = context(&temp_dir);

        let roots = cli
            .execute(&Commands::Roots {
                format: "json".to_string(),
            })
            .unwrap();
        let roots: serde_json::Value = serde_json::from_str(&roots).unwrap();
        assert!(roots["selected"].is_null());
        assert_eq!(roots["roots"][0]["id"], "0AB");

        let message = cli
            .execute(&Commands::Root {
                id: Some("0AB".to_string()),
                clear: false,
            })
            .unwrap();
        assert!(message.contains("0AB"));

        // A fresh context reads the persisted selection.
        let cli = context(&temp_dir);
        let parsed = tree_json(&cli, None);
        assert_eq!(parsed["root"], "0AB");
        assert_eq!(parsed["root_id"], "0AB");
        assert_eq!(parsed["count"], 1);
        assert_eq!(parsed["tree"][0]["name"], "Roadmap");

        cli.execute(&Commands::Root {
            id: None,
            clear: true,
        })
        .unwrap();
        assert_eq!(tree_json(&cli, None)["count"], 6);
    });
}

#[test]
fn theme_is_written_to_the_preferences_file() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let cli = context(&temp_dir);
        assert_eq!(
            cli.execute(&Commands::Theme {
                theme: Some("light".to_string())
            })
            .unwrap(),
            "Theme: light"
        );
        assert_eq!(
            cli.execute(&Commands::Theme { theme: None }).unwrap(),
            "Theme: dark"
        );

        let prefs = temp_dir
            .path()
            .join("data")
            .join("docstree")
            .join("preferences.json");
        let stored: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(prefs).unwrap()).unwrap();
        assert_eq!(stored["theme"], "\"dark\"");

        let err = cli
            .execute(&Commands::Theme {
                theme: Some("sepia".to_string()),
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::ConfigError(_)));
    });
}

#[test]
fn favorites_add_list_remove_contract() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let cli = context(&temp_dir);
        let added = cli
            .execute(&Commands::Favorite {
                command: FavoriteCommands::Add {
                    id: "d2".to_string(),
                },
            })
            .unwrap();
        assert_eq!(added, "Added favorite: Engineering");

        let listed = cli
            .execute(&Commands::Favorite {
                command: FavoriteCommands::List {
                    format: "json".to_string(),
                },
            })
            .unwrap();
        let listed: serde_json::Value = serde_json::from_str(&listed).unwrap();
        let favorites = listed["favorites"].as_array().unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0]["id"], "d2");
        assert_eq!(favorites[0]["kind"], "folder");
        assert!(favorites[0].get("children").is_none());

        let text = cli
            .execute(&Commands::Tree {
                query: None,
                format: "text".to_string(),
            })
            .unwrap();
        assert!(text.contains("Engineering ★"));

        cli.execute(&Commands::Favorite {
            command: FavoriteCommands::Remove {
                id: "d2".to_string(),
            },
        })
        .unwrap();
        let err = cli
            .execute(&Commands::Favorite {
                command: FavoriteCommands::Remove {
                    id: "d2".to_string(),
                },
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::NodeNotFound(_)));
    });
}

#[test]
fn status_json_contract_has_required_fields() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let cli = context(&temp_dir);
        let output = cli
            .execute(&Commands::Status {
                format: "json".to_string(),
            })
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["signed_in"], true);
        assert!(parsed["source"].as_str().unwrap().contains("listing.json"));
        assert!(parsed["root"].is_null());
        assert_eq!(parsed["theme"], "dark");
        assert_eq!(parsed["favorites"], 0);
        assert!(parsed["preferences_path"]
            .as_str()
            .unwrap()
            .ends_with("preferences.json"));
    });
}

#[test]
fn explicit_config_file_overrides_defaults() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let config_path = temp_dir.path().join("custom.toml");
        std::fs::write(
            &config_path,
            "[drive]\npage_size = 500\n\n[ui]\ndefault_theme = \"light\"\n",
        )
        .unwrap();
        let listing = write_listing(&temp_dir);
        let cli = CliContext::new(Some(config_path), Some(listing))
            .unwrap()
            .with_color(false);

        let rendered = cli.execute(&Commands::Config).unwrap();
        assert!(rendered.contains("page_size = 500"));
        assert_eq!(cli.config().drive.page_size, 500);

        let status = cli
            .execute(&Commands::Status {
                format: "text".to_string(),
            })
            .unwrap();
        assert!(status.contains("Theme: light"));
    });
}

#[test]
fn invalid_config_file_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let config_path = temp_dir.path().join("bad.toml");
        std::fs::write(&config_path, "[drive]\npage_size = 0\n").unwrap();
        let err = CliContext::new(Some(config_path), None).err().unwrap();
        assert!(matches!(err, ApiError::ConfigError(_)));
    });
}

#[test]
fn unknown_output_format_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let cli = context(&temp_dir);
        let err = cli
            .execute(&Commands::Roots {
                format: "yaml".to_string(),
            })
            .unwrap_err();
        assert!(err.to_string().contains("Invalid format"));
    });
}

#[test]
fn drive_client_without_token_reports_not_signed_in() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let cli = CliContext::new(None, None).unwrap().with_color(false);
        let err = cli
            .execute(&Commands::Tree {
                query: None,
                format: "text".to_string(),
            })
            .unwrap_err();
        assert!(err.is_auth());

        let status = cli
            .execute(&Commands::Status {
                format: "text".to_string(),
            })
            .unwrap();
        assert!(status.contains("Signed out"));
        assert_eq!(
            cli.execute(&Commands::SignOut).unwrap(),
            "Already signed out."
        );
    });
}
