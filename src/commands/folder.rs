//! Folder management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use brainbox_auth::permissions::{RouteGuard, require_modify};
use brainbox_client::dto::{CreateFolderRequest, FolderQuery, UpdateFolderRequest};
use brainbox_core::error::AppError;
use brainbox_core::result::AppResult;
use brainbox_entity::file::File;
use brainbox_entity::folder::Folder;

use super::{Context, ListArgs};
use crate::output::{self, OutputFormat, or_dash};

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// List folders
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Only names containing this fragment
        #[arg(long)]
        name: Option<String>,
        /// Only folders owned by this username
        #[arg(long)]
        username: Option<String>,
    },
    /// Show a folder and its files
    Show {
        /// Folder ID
        id: i64,
    },
    /// Create a folder owned by the logged-in user
    Add {
        /// Folder name
        name: String,
        /// Parent folder ID
        #[arg(long)]
        parent: Option<i64>,
    },
    /// Rename or move a folder
    Edit {
        /// Folder ID
        id: i64,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New parent folder ID
        #[arg(long)]
        parent: Option<i64>,
    },
    /// Delete a folder
    Delete {
        /// Folder ID
        id: i64,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
}

/// Folder display row for table output
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    /// Row number
    #[tabled(rename = "#")]
    no: u64,
    /// Folder ID
    id: i64,
    /// Name
    name: String,
    /// Owner
    owner: String,
    /// Parent folder
    parent: String,
    /// Files
    files: String,
    /// Created at
    created_at: String,
}

impl FolderRow {
    fn new(no: u64, folder: &Folder) -> Self {
        Self {
            no,
            id: folder.id,
            name: folder.name.clone(),
            owner: folder.user.label(),
            parent: or_dash(folder.parent_folder),
            files: or_dash(folder.num_files),
            created_at: or_dash(folder.created_at.map(|t| t.format("%Y-%m-%d %H:%M"))),
        }
    }
}

/// A file inside a folder's detail view
#[derive(Debug, Serialize, Tabled)]
struct FolderFileRow {
    /// File ID
    id: i64,
    /// Name
    name: String,
    /// Characters
    chars: usize,
}

impl From<&File> for FolderFileRow {
    fn from(file: &File) -> Self {
        Self {
            id: file.id,
            name: file.name.clone(),
            chars: file.char_count(),
        }
    }
}

/// Execute folder commands
pub async fn execute(args: &FolderArgs, ctx: &Context) -> AppResult<()> {
    match &args.command {
        FolderCommand::List {
            list,
            name,
            username,
        } => {
            ctx.enter(&RouteGuard::everyone(), "folders")?;
            let query = FolderQuery {
                page: list.page_request(),
                name: name.clone(),
                username: username.clone(),
            };
            let page = ctx.client.list_folders(&query).await?;
            super::show_page(page, list, ctx.format, FolderRow::new);
        }
        FolderCommand::Show { id } => {
            ctx.enter(&RouteGuard::everyone(), &format!("folder/{id}"))?;
            let folder = ctx.client.get_folder(*id).await?;
            match ctx.format {
                OutputFormat::Json => output::print_item(&folder, ctx.format),
                OutputFormat::Table => {
                    output::print_kv("ID", &folder.id.to_string());
                    output::print_kv("Name", &folder.name);
                    output::print_kv("Owner", &folder.user.label());
                    output::print_kv("Parent", &or_dash(folder.parent_folder));
                    let files: Vec<FolderFileRow> =
                        folder.files.iter().map(FolderFileRow::from).collect();
                    output::print_list(&files, ctx.format);
                }
            }
        }
        FolderCommand::Add { name, parent } => {
            let identity = ctx.enter(&RouteGuard::members(), "folders/add")?;
            let request = CreateFolderRequest {
                name: name.clone(),
                user: super::require_user_id(&identity)?,
                parent_folder: *parent,
            };
            let folder = ctx.client.create_folder(&request).await?;
            output::print_success(&format!(
                "Folder '{}' created (id: {})",
                folder.name, folder.id
            ));
        }
        FolderCommand::Edit { id, name, parent } => {
            let identity = ctx.enter(&RouteGuard::members(), &format!("folder/{id}/edit"))?;
            let changes = UpdateFolderRequest {
                name: name.clone(),
                parent_folder: *parent,
            };
            if changes.is_empty() {
                return Err(AppError::validation("Nothing to change; pass --name or --parent"));
            }
            if *parent == Some(*id) {
                return Err(AppError::validation("A folder cannot be its own parent"));
            }

            let folder = ctx.client.get_folder(*id).await?;
            require_modify(&identity, &folder, "folder")?;

            let updated = ctx.client.update_folder(*id, &changes).await?;
            output::print_success(&format!("Folder '{}' updated", updated.name));
        }
        FolderCommand::Delete { id, force } => {
            let identity = ctx.enter(&RouteGuard::members(), &format!("folder/{id}/delete"))?;
            let folder = ctx.client.get_folder(*id).await?;
            require_modify(&identity, &folder, "folder")?;

            if !super::confirm(&format!("Delete folder '{}'?", folder.name), *force)? {
                println!("Cancelled.");
                return Ok(());
            }

            ctx.client.delete_folder(*id).await?;
            output::print_success(&format!("Folder '{}' deleted", folder.name));
        }
    }

    Ok(())
}
