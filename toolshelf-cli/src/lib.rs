//! Command-line front end over [`ToolDirectory`].
//!
//! The binary only parses [`Args`] and installs logging; everything else lives
//! here so it can be driven from tests.

use std::{io::Write, path::PathBuf, sync::Arc};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use toolshelf_directory::{Catalog, DirectoryConfig, ToolDirectory, ToolFilter};
use toolshelf_storage::{Origin, SqliteStorage};
use toolshelf_types::{Tool, ToolId, ViewMode};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "toolshelf")]
#[command(about = "Browse, search and organize a directory of web tools")]
pub struct Args {
    /// Path to the durable storage file
    #[arg(short, long, default_value = "toolshelf.db")]
    pub storage: PathBuf,

    /// JSON file listing the catalogue's tools
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// JSON directory configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Search the catalogue
    Search { query: String },
    /// List tools, optionally narrowed
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        favorites: bool,
    },
    /// List categories with tool counts
    Categories,
    /// Star or unstar a tool
    Favorite { id: ToolId },
    /// Save or unsave a tool
    Save { id: ToolId },
    /// Manage the side-by-side bundle
    Bundle {
        #[command(subcommand)]
        action: BundleAction,
    },
    /// Show or set the catalogue layout
    ViewMode { mode: Option<ViewMode> },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum BundleAction {
    Add { id: ToolId },
    Remove { id: ToolId },
    Clear,
    Show,
}

/// Opens the SQLite-backed store and builds the directory over it.
pub fn open_directory(args: &Args) -> Result<ToolDirectory> {
    let config = match &args.config {
        Some(path) => DirectoryConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => DirectoryConfig::default(),
    };
    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("loading catalogue from {}", path.display()))?,
        None => Catalog::default(),
    };

    let backend = SqliteStorage::open(&args.storage)
        .with_context(|| format!("opening storage at {}", args.storage.display()))?;
    let origin = Origin::with_event_capacity(Arc::new(backend), config.notification_capacity);
    info!("Using storage at {}", args.storage.display());

    Ok(ToolDirectory::init(config, origin.open_context(), catalog)?)
}

/// Runs one subcommand, writing its report to `out`.
pub async fn run(
    directory: &mut ToolDirectory,
    command: Command,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Search { query } => {
            directory.set_query(query);
            directory.settle_search().await;
            debug!("cache stats: {:?}", directory.search().cache_stats());
            let tools = directory.visible_tools(&ToolFilter::default());
            print_tools(directory, &tools, out)?;
        }
        Command::List {
            category,
            favorites,
        } => {
            let filter = ToolFilter {
                category,
                favorites_only: favorites,
            };
            let tools = directory.visible_tools(&filter);
            print_tools(directory, &tools, out)?;
        }
        Command::Categories => {
            for category in directory.categories() {
                writeln!(out, "{:>4}  {}", category.count, category.name)?;
            }
        }
        Command::Favorite { id } => {
            let starred = directory.toggle_favorite(&id)?;
            writeln!(out, "{id}: {}", if starred { "favorited" } else { "unfavorited" })?;
        }
        Command::Save { id } => {
            let saved = directory.toggle_saved(&id)?;
            writeln!(out, "{id}: {}", if saved { "saved" } else { "unsaved" })?;
        }
        Command::Bundle { action } => match action {
            BundleAction::Add { id } => {
                directory.add_to_bundle(&id)?;
                writeln!(out, "{id}: added to bundle")?;
            }
            BundleAction::Remove { id } => {
                if directory.remove_from_bundle(&id) {
                    writeln!(out, "{id}: removed from bundle")?;
                } else {
                    writeln!(out, "{id} is not in the bundle")?;
                }
            }
            BundleAction::Clear => {
                directory.clear_bundle();
                writeln!(out, "bundle cleared")?;
            }
            BundleAction::Show => {
                let limit = directory.bundle().limit();
                for (pane, tool) in directory.bundle_panes().iter().enumerate() {
                    writeln!(out, "[{}/{}] {}  {}", pane + 1, limit, tool.name, tool.url)?;
                }
            }
        },
        Command::ViewMode { mode } => {
            if let Some(mode) = mode {
                directory.preferences_mut().set_view_mode(mode);
            }
            writeln!(out, "{}", directory.preferences().view_mode())?;
        }
    }
    Ok(())
}

fn print_tools(directory: &ToolDirectory, tools: &[Tool], out: &mut impl Write) -> Result<()> {
    if tools.is_empty() {
        writeln!(out, "No tools found.")?;
        return Ok(());
    }
    let mode = directory.preferences().view_mode();
    for tool in tools {
        let star = if directory.favorites().contains(&tool.id) { "*" } else { " " };
        match mode {
            ViewMode::List => {
                writeln!(out, "{star} {:<24} {:<16} {}", tool.name, tool.category, tool.url)?
            }
            ViewMode::Grid => {
                writeln!(out, "{star} {} [{}]", tool.name, tool.category)?;
                writeln!(out, "    {}", tool.description)?;
                writeln!(out, "    {}", tool.url)?;
            }
        }
    }
    Ok(())
}
