//! File management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use brainbox_auth::permissions::{RouteGuard, require_modify};
use brainbox_client::dto::{CreateFileRequest, UpdateFileRequest};
use brainbox_core::error::AppError;
use brainbox_core::result::AppResult;
use brainbox_entity::file::File;
use brainbox_entity::share::SharedFile;

use super::{Context, ListArgs};
use crate::output::{self, OutputFormat, or_dash};

/// Arguments for file commands
#[derive(Debug, Args)]
pub struct FileArgs {
    /// File subcommand
    #[command(subcommand)]
    pub command: FileCommand,
}

/// File subcommands
#[derive(Debug, Subcommand)]
pub enum FileCommand {
    /// List files
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show a file, its content and who it is shared with
    Show {
        /// File ID
        id: i64,
    },
    /// Create a file owned by the logged-in user
    Add {
        /// File name
        name: String,
        /// Text content
        #[arg(long, conflicts_with = "from")]
        content: Option<String>,
        /// Read the content from a local file
        #[arg(long)]
        from: Option<String>,
        /// Containing folder ID
        #[arg(long)]
        folder: Option<i64>,
    },
    /// Change a file's name, content or folder
    Edit {
        /// File ID
        id: i64,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New content
        #[arg(long, conflicts_with = "from")]
        content: Option<String>,
        /// Read the new content from a local file
        #[arg(long)]
        from: Option<String>,
        /// New folder ID
        #[arg(long)]
        folder: Option<i64>,
    },
    /// Delete a file
    Delete {
        /// File ID
        id: i64,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
}

/// File display row for table output
#[derive(Debug, Serialize, Tabled)]
struct FileRow {
    /// Row number
    #[tabled(rename = "#")]
    no: u64,
    /// File ID
    id: i64,
    /// Name
    name: String,
    /// Owner
    owner: String,
    /// Folder
    folder: String,
    /// Characters
    chars: usize,
    /// Created at
    created_at: String,
}

impl FileRow {
    fn new(no: u64, file: &File) -> Self {
        Self {
            no,
            id: file.id,
            name: file.name.clone(),
            owner: file.user.label(),
            folder: or_dash(file.folder.as_ref().map(|f| f.label())),
            chars: file.char_count(),
            created_at: or_dash(file.created_at.map(|t| t.format("%Y-%m-%d %H:%M"))),
        }
    }
}

/// A share in a file's detail view
#[derive(Debug, Serialize, Tabled)]
struct ShareRow {
    /// User
    user: String,
    /// Permission
    permission: String,
}

impl From<&SharedFile> for ShareRow {
    fn from(share: &SharedFile) -> Self {
        Self {
            user: share.user.label(),
            permission: share.permission.label().to_string(),
        }
    }
}

/// Resolve `--content` / `--from` into the content to send.
async fn read_content(content: &Option<String>, from: &Option<String>) -> AppResult<Option<String>> {
    match (content, from) {
        (Some(text), _) => Ok(Some(text.clone())),
        (None, Some(path)) => tokio::fs::read_to_string(path)
            .await
            .map(Some)
            .map_err(|e| AppError::validation(format!("Failed to read '{}': {}", path, e))),
        (None, None) => Ok(None),
    }
}

/// Execute file commands
pub async fn execute(args: &FileArgs, ctx: &Context) -> AppResult<()> {
    match &args.command {
        FileCommand::List { list } => {
            ctx.enter(&RouteGuard::everyone(), "files")?;
            let page = ctx.client.list_files(list.page_request()).await?;
            super::show_page(page, list, ctx.format, FileRow::new);
        }
        FileCommand::Show { id } => {
            ctx.enter(&RouteGuard::everyone(), &format!("file/{id}"))?;
            let file = ctx.client.get_file(*id).await?;
            match ctx.format {
                OutputFormat::Json => output::print_item(&file, ctx.format),
                OutputFormat::Table => {
                    output::print_kv("ID", &file.id.to_string());
                    output::print_kv("Name", &file.name);
                    output::print_kv("Owner", &file.user.label());
                    output::print_kv("Folder", &or_dash(file.folder.as_ref().map(|f| f.label())));
                    output::print_kv("Characters", &file.char_count().to_string());
                    println!();
                    println!("{}", file.content);
                    println!();
                    let shares: Vec<ShareRow> = file.shared_users.iter().map(ShareRow::from).collect();
                    output::print_list(&shares, ctx.format);
                }
            }
        }
        FileCommand::Add {
            name,
            content,
            from,
            folder,
        } => {
            let identity = ctx.enter(&RouteGuard::members(), "files/add")?;
            let request = CreateFileRequest {
                name: name.clone(),
                content: read_content(content, from).await?.unwrap_or_default(),
                user: super::require_user_id(&identity)?,
                folder: *folder,
            };
            let file = ctx.client.create_file(&request).await?;
            output::print_success(&format!("File '{}' created (id: {})", file.name, file.id));
        }
        FileCommand::Edit {
            id,
            name,
            content,
            from,
            folder,
        } => {
            let identity = ctx.enter(&RouteGuard::members(), &format!("file/{id}/edit"))?;
            let changes = UpdateFileRequest {
                name: name.clone(),
                content: read_content(content, from).await?,
                folder: *folder,
            };
            if changes.is_empty() {
                return Err(AppError::validation(
                    "Nothing to change; pass --name, --content, --from or --folder",
                ));
            }

            let file = ctx.client.get_file(*id).await?;
            require_modify(&identity, &file, "file")?;

            let updated = ctx.client.update_file(*id, &changes).await?;
            output::print_success(&format!("File '{}' updated", updated.name));
        }
        FileCommand::Delete { id, force } => {
            let identity = ctx.enter(&RouteGuard::members(), &format!("file/{id}/delete"))?;
            let file = ctx.client.get_file(*id).await?;
            require_modify(&identity, &file, "file")?;

            if !super::confirm(&format!("Delete file '{}'?", file.name), *force)? {
                println!("Cancelled.");
                return Ok(());
            }

            ctx.client.delete_file(*id).await?;
            output::print_success(&format!("File '{}' deleted", file.name));
        }
    }

    Ok(())
}
