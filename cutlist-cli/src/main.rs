//! cutlist - CLI for cutlist conversion, part colors and saved projects.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cutlist_core::config::{DEFAULT_STORE_FILE, STORE_ENV_VAR};
use cutlist_core::model::folder_path;
use cutlist_core::{
    build_color_map, flatten, regroup, validate_parts, CompactPart, DatabaseCutlistGroup,
    JsonFileStore, Placement, ProjectUpdate, SavedCutlistData, SavedProjectRepository,
    StoreConfig,
};

/// Convert, color and organise cutlists.
#[derive(Parser, Debug)]
#[command(name = "cutlist")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Saved project store (JSON document)
    #[arg(long, global = true, env = STORE_ENV_VAR, default_value = DEFAULT_STORE_FILE)]
    store: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// JSON input/output paths. `-` or no path means stdin/stdout.
#[derive(clap::Args, Debug)]
struct Io {
    /// Input JSON file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Flatten stored groups into an editable part list
    Flatten(Io),
    /// Regroup an editable part list into save groups
    Regroup(Io),
    /// Assign colors to the parts of packed placements
    Colors(Io),
    /// Check an editable part list
    Validate(Io),
    /// Manage folders
    #[command(subcommand)]
    Folder(FolderCommand),
    /// Manage saved projects
    #[command(subcommand)]
    Project(ProjectCommand),
}

#[derive(Subcommand, Debug)]
enum FolderCommand {
    /// Create a folder
    Create {
        name: String,
        #[arg(long)]
        parent: Option<String>,
    },
    /// Rename a folder
    Rename { id: String, name: String },
    /// Delete a folder; its projects move to the root
    Delete { id: String },
    /// Print the folder tree
    Tree,
}

#[derive(Subcommand, Debug)]
enum ProjectCommand {
    /// List saved projects, newest first
    List,
    /// Print one project and log its folder path
    Show { id: String },
    /// Save a snapshot as a new project
    Save {
        name: String,
        /// Snapshot JSON (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(long)]
        folder: Option<String>,
    },
    /// Rename, move or replace the snapshot of a project
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// Target folder id
        #[arg(long, conflicts_with = "root")]
        folder: Option<String>,
        /// Move to the root
        #[arg(long)]
        root: bool,
        /// Replacement snapshot JSON
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Delete a project
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Flatten(io) => {
            let groups: Vec<DatabaseCutlistGroup> = read_json(io.input.as_deref())?;
            let parts = flatten(&groups);
            info!("Flattened {} group(s) into {} part(s)", groups.len(), parts.len());
            write_json(io.output.as_deref(), &parts)
        }
        Command::Regroup(io) => {
            let parts: Vec<CompactPart> = read_json(io.input.as_deref())?;
            let groups = regroup(&parts);
            info!("Regrouped {} part(s) into {} group(s)", parts.len(), groups.len());
            write_json(io.output.as_deref(), &groups)
        }
        Command::Colors(io) => {
            let placements: Vec<Placement> = read_json(io.input.as_deref())?;
            write_json(io.output.as_deref(), &build_color_map(&placements))
        }
        Command::Validate(io) => {
            let parts: Vec<CompactPart> = read_json(io.input.as_deref())?;
            let validation = validate_parts(&parts);

            for warning in &validation.warnings {
                warn!("{}", warning);
            }

            for err in &validation.errors {
                error!("{}", err);
            }

            if !validation.passed {
                anyhow::bail!("Validation failed");
            }
            info!("Validation passed");
            Ok(())
        }
        Command::Folder(command) => run_folder(open_repository(&args.store).await?, command).await,
        Command::Project(command) => {
            run_project(open_repository(&args.store).await?, command).await
        }
    }
}

type Repository = SavedProjectRepository<JsonFileStore>;

async fn open_repository(path: &Path) -> Result<Repository> {
    let repo = SavedProjectRepository::new(JsonFileStore::new(StoreConfig::new(path)));
    if !repo.refresh().await {
        anyhow::bail!("Failed to load store {}", path.display());
    }
    Ok(repo)
}

async fn run_folder(repo: Repository, command: FolderCommand) -> Result<()> {
    match command {
        FolderCommand::Create { name, parent } => {
            let folder = repo
                .create_folder(&name, parent.as_deref())
                .await
                .context("Failed to create folder")?;
            info!("Created folder {}", folder.id);
            write_json(None, &folder)
        }
        FolderCommand::Rename { id, name } => {
            ensure(repo.rename_folder(&id, &name).await, "rename folder", &id)
        }
        FolderCommand::Delete { id } => {
            ensure(repo.delete_folder(&id).await, "delete folder", &id)
        }
        FolderCommand::Tree => write_json(None, &repo.tree().await),
    }
}

async fn run_project(repo: Repository, command: ProjectCommand) -> Result<()> {
    match command {
        ProjectCommand::List => write_json(None, &repo.projects().await),
        ProjectCommand::Show { id } => {
            let project = repo
                .project(&id)
                .await
                .with_context(|| format!("Project not found: {}", id))?;
            if let Some(folder_id) = &project.folder_id {
                let folders = repo.folders().await;
                let path: Vec<&str> = folder_path(&folders, folder_id)
                    .into_iter()
                    .map(|f| f.name.as_str())
                    .collect();
                info!("Folder: {}", path.join(" / "));
            }
            write_json(None, &project)
        }
        ProjectCommand::Save {
            name,
            input,
            folder,
        } => {
            let data: SavedCutlistData = read_json(input.as_deref())?;
            let project = repo
                .save_project(&name, &data, folder.as_deref())
                .await
                .context("Failed to save project")?;
            info!("Saved project {}", project.id);
            write_json(None, &project)
        }
        ProjectCommand::Update {
            id,
            name,
            folder,
            root,
            input,
        } => {
            let folder_id = if root { Some(None) } else { folder.map(Some) };
            let data = match input {
                Some(path) => Some(read_json::<SavedCutlistData>(Some(&path))?),
                None => None,
            };
            let update = ProjectUpdate {
                name,
                folder_id,
                data,
            };
            if update.is_empty() {
                warn!("Nothing to update");
                return Ok(());
            }
            ensure(repo.update_project(&id, &update).await, "update project", &id)
        }
        ProjectCommand::Delete { id } => {
            ensure(repo.delete_project(&id).await, "delete project", &id)
        }
    }
}

fn ensure(succeeded: bool, operation: &str, id: &str) -> Result<()> {
    if !succeeded {
        anyhow::bail!("Failed to {} {}", operation, id);
    }
    info!("Done: {} {}", operation, id);
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: Option<&Path>) -> Result<T> {
    let content = match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };
    serde_json::from_str(&content).context("Invalid JSON input")
}

fn write_json<T: Serialize + ?Sized>(path: Option<&Path>, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) if path != Path::new("-") => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Generated: {}", path.display());
        }
        _ => println!("{}", json),
    }
    Ok(())
}
