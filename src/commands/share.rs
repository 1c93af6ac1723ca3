//! File sharing commands.

use clap::{Args, Subcommand};

use brainbox_auth::permissions::{RouteGuard, require_modify};
use brainbox_core::result::AppResult;
use brainbox_entity::share::SharePermission;

use super::Context;
use crate::output;

/// Arguments for share commands
#[derive(Debug, Args)]
pub struct ShareArgs {
    /// Share subcommand
    #[command(subcommand)]
    pub command: ShareCommand,
}

/// Share subcommands
#[derive(Debug, Subcommand)]
pub enum ShareCommand {
    /// Share a file with a user
    Add {
        /// File ID
        file: i64,
        /// User ID receiving access
        user: i64,
        /// Permission: R (read-only) or RW (read-write)
        #[arg(long, default_value = "R")]
        permission: String,
    },
    /// Change the permission of an existing share
    Update {
        /// File ID
        file: i64,
        /// User ID
        user: i64,
        /// Permission: R (read-only) or RW (read-write)
        permission: String,
    },
    /// Revoke a user's access to a file
    Remove {
        /// File ID
        file: i64,
        /// User ID
        user: i64,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
}

/// Execute share commands
pub async fn execute(args: &ShareArgs, ctx: &Context) -> AppResult<()> {
    match &args.command {
        ShareCommand::Add {
            file,
            user,
            permission,
        } => {
            ctx.enter(&RouteGuard::members(), &format!("file/{file}/shared-users/add"))?;
            let permission: SharePermission = permission.parse()?;

            ctx.client.share_file(*file, *user, permission).await?;
            output::print_success(&format!(
                "File {file} shared with user {user} ({permission})"
            ));
        }
        ShareCommand::Update {
            file,
            user,
            permission,
        } => {
            let identity = ctx.enter(
                &RouteGuard::members(),
                &format!("file/{file}/shared-user/{user}/edit"),
            )?;
            let permission: SharePermission = permission.parse()?;

            let target = ctx.client.get_file(*file).await?;
            require_modify(&identity, &target, "file")?;

            ctx.client.update_share(*file, *user, permission).await?;
            output::print_success(&format!(
                "User {user} now has {permission} access to '{}'",
                target.name
            ));
        }
        ShareCommand::Remove { file, user, force } => {
            let identity = ctx.enter(
                &RouteGuard::members(),
                &format!("file/{file}/shared-user/{user}/delete"),
            )?;
            let target = ctx.client.get_file(*file).await?;
            require_modify(&identity, &target, "file")?;

            let prompt = format!("Revoke user {user}'s access to '{}'?", target.name);
            if !super::confirm(&prompt, *force)? {
                println!("Cancelled.");
                return Ok(());
            }

            ctx.client.remove_share(*file, *user).await?;
            output::print_success(&format!("User {user} no longer has access to '{}'", target.name));
        }
    }

    Ok(())
}
