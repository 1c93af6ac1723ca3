//! Statistics commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use brainbox_auth::permissions::RouteGuard;
use brainbox_core::result::AppResult;
use brainbox_entity::statistics::{FolderByNumFiles, FolderBySharedUsers, UserByWrittenChars};

use super::{Context, ListArgs};

/// Arguments for statistics commands
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Statistics subcommand
    #[command(subcommand)]
    pub command: StatsCommand,
}

/// Statistics subcommands
#[derive(Debug, Subcommand)]
pub enum StatsCommand {
    /// Users ranked by characters written
    UsersByChars {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Folders ranked by number of files
    FoldersByFiles {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Folders ranked by number of users their files are shared with
    FoldersBySharedUsers {
        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct CharsRow {
    #[tabled(rename = "#")]
    no: u64,
    id: i64,
    username: String,
    email: String,
    written_chars: i64,
}

#[derive(Debug, Serialize, Tabled)]
struct FilesRow {
    #[tabled(rename = "#")]
    no: u64,
    id: i64,
    name: String,
    num_files: i64,
}

#[derive(Debug, Serialize, Tabled)]
struct SharedUsersRow {
    #[tabled(rename = "#")]
    no: u64,
    id: i64,
    name: String,
    num_shared_users: i64,
}

/// Execute statistics commands
pub async fn execute(args: &StatsArgs, ctx: &Context) -> AppResult<()> {
    match &args.command {
        StatsCommand::UsersByChars { list } => {
            ctx.enter(&RouteGuard::everyone(), "statistics/users-by-chars-written")?;
            let page = ctx.client.users_by_written_chars(list.page_request()).await?;
            super::show_page(page, list, ctx.format, |no, row: &UserByWrittenChars| CharsRow {
                no,
                id: row.id,
                username: row.username.clone(),
                email: row.email.clone(),
                written_chars: row.written_chars.unwrap_or(0),
            });
        }
        StatsCommand::FoldersByFiles { list } => {
            ctx.enter(&RouteGuard::everyone(), "statistics/folders-by-num-files")?;
            let page = ctx.client.folders_by_num_files(list.page_request()).await?;
            super::show_page(page, list, ctx.format, |no, row: &FolderByNumFiles| FilesRow {
                no,
                id: row.id,
                name: row.name.clone(),
                num_files: row.num_files,
            });
        }
        StatsCommand::FoldersBySharedUsers { list } => {
            ctx.enter(&RouteGuard::everyone(), "statistics/folders-by-shared-users")?;
            let page = ctx.client.folders_by_shared_users(list.page_request()).await?;
            super::show_page(page, list, ctx.format, |no, row: &FolderBySharedUsers| {
                SharedUsersRow {
                    no,
                    id: row.id,
                    name: row.name.clone(),
                    num_shared_users: row.num_shared_users,
                }
            });
        }
    }

    Ok(())
}
