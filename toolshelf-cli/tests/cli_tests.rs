use clap::Parser;
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::TempDir;
use toolshelf_cli::{open_directory, run, Args, BundleAction, Command};
use toolshelf_directory::DirectoryError;
use toolshelf_types::{ToolId, ViewMode};

const CATALOG_JSON: &str = r#"[
    {"id":"json-formatter","name":"JSON Formatter","description":"Pretty-print JSON","url":"https://json.example","category":"Dev Utilities"},
    {"id":"diff-checker","name":"Diff Checker","description":"Compare two texts","url":"https://diff.example","category":"Formatters"},
    {"id":"color-picker","name":"Color Picker","description":"Pick colors","url":"https://color.example","category":"Design"}
]"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("tools.json"), CATALOG_JSON).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> String {
        self.dir.path().join(name).display().to_string()
    }

    fn args(&self, command: &[&str]) -> Args {
        let storage = self.path("toolshelf.db");
        let catalog = self.path("tools.json");
        let mut argv = vec!["toolshelf", "--storage", &storage, "--catalog", &catalog];
        argv.extend_from_slice(command);
        Args::try_parse_from(argv).unwrap()
    }

    /// Runs one invocation from a fresh process-like state.
    async fn exec(&self, command: &[&str]) -> anyhow::Result<String> {
        let args = self.args(command);
        let mut directory = open_directory(&args)?;
        let mut out = Vec::new();
        run(&mut directory, args.command, &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }
}

fn id(slug: &str) -> ToolId {
    ToolId::parse(slug).unwrap()
}

// ── Argument parsing ─────────────────────────────────────────────

#[test]
fn parses_global_flags_and_subcommands() {
    let args =
        Args::try_parse_from(["toolshelf", "-v", "bundle", "add", "json-formatter"]).unwrap();
    assert!(args.verbose);
    assert_eq!(args.storage, Path::new("toolshelf.db"));
    assert_eq!(
        args.command,
        Command::Bundle {
            action: BundleAction::Add {
                id: id("json-formatter")
            }
        }
    );

    let args = Args::try_parse_from(["toolshelf", "view-mode", "list"]).unwrap();
    assert_eq!(
        args.command,
        Command::ViewMode {
            mode: Some(ViewMode::List)
        }
    );
}

#[test]
fn rejects_malformed_ids_and_modes() {
    assert!(Args::try_parse_from(["toolshelf", "favorite", "Not A Slug"]).is_err());
    assert!(Args::try_parse_from(["toolshelf", "view-mode", "carousel"]).is_err());
}

// ── Commands ─────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn search_prints_matching_tools() {
    let ws = Workspace::new();
    let out = ws.exec(&["search", "JSON"]).await.unwrap();
    assert!(out.contains("JSON Formatter"));
    assert!(!out.contains("Diff Checker"));

    let out = ws.exec(&["search", "nothing-matches"]).await.unwrap();
    assert_eq!(out, "No tools found.\n");
}

#[tokio::test]
async fn favorites_persist_between_invocations() {
    let ws = Workspace::new();
    assert_eq!(
        ws.exec(&["favorite", "diff-checker"]).await.unwrap(),
        "diff-checker: favorited\n"
    );

    let out = ws.exec(&["list", "--favorites"]).await.unwrap();
    assert!(out.starts_with("* Diff Checker [Formatters]"));
    assert!(!out.contains("JSON Formatter"));

    assert_eq!(
        ws.exec(&["favorite", "diff-checker"]).await.unwrap(),
        "diff-checker: unfavorited\n"
    );
    assert_eq!(
        ws.exec(&["list", "--favorites"]).await.unwrap(),
        "No tools found.\n"
    );
}

#[tokio::test]
async fn unknown_tool_is_an_error() {
    let ws = Workspace::new();
    let err = ws.exec(&["save", "missing-tool"]).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DirectoryError>(),
        Some(DirectoryError::UnknownTool(_))
    ));
}

#[tokio::test]
async fn bundle_round_trip() {
    let ws = Workspace::new();
    ws.exec(&["bundle", "add", "color-picker"]).await.unwrap();
    ws.exec(&["bundle", "add", "json-formatter"]).await.unwrap();

    let out = ws.exec(&["bundle", "show"]).await.unwrap();
    assert_eq!(
        out,
        "[1/4] Color Picker  https://color.example\n\
         [2/4] JSON Formatter  https://json.example\n"
    );

    assert_eq!(
        ws.exec(&["bundle", "remove", "diff-checker"]).await.unwrap(),
        "diff-checker is not in the bundle\n"
    );
    ws.exec(&["bundle", "clear"]).await.unwrap();
    assert_eq!(ws.exec(&["bundle", "show"]).await.unwrap(), "");
}

#[tokio::test]
async fn view_mode_and_categories() {
    let ws = Workspace::new();
    assert_eq!(ws.exec(&["view-mode"]).await.unwrap(), "grid\n");
    assert_eq!(ws.exec(&["view-mode", "list"]).await.unwrap(), "list\n");
    assert_eq!(ws.exec(&["view-mode"]).await.unwrap(), "list\n");

    let out = ws.exec(&["list", "--category", "Design"]).await.unwrap();
    assert_eq!(out.lines().count(), 1);
    assert!(out.contains("Color Picker"));

    let out = ws.exec(&["categories"]).await.unwrap();
    assert_eq!(
        out,
        "   1  Design\n   1  Dev Utilities\n   1  Formatters\n"
    );
}

#[tokio::test]
async fn invalid_config_file_is_reported() {
    let ws = Workspace::new();
    std::fs::write(ws.dir.path().join("config.json"), r#"{"bundle_limit":0}"#).unwrap();
    let config = ws.path("config.json");
    let storage = ws.path("toolshelf.db");
    let args = Args::try_parse_from([
        "toolshelf",
        "--storage",
        &storage,
        "--config",
        &config,
        "categories",
    ])
    .unwrap();
    assert!(open_directory(&args).is_err());
}
