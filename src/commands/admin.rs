//! Admin dashboard commands.

use clap::{Args, Subcommand};

use brainbox_auth::permissions::{RouteGuard, require_admin};
use brainbox_client::BulkTarget;
use brainbox_core::result::AppResult;

use super::Context;
use crate::output;

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Change the page size the backend uses for every list
    PageSize {
        /// New page size (at least 1)
        size: u64,
    },
    /// Delete every folder, file or share
    Purge {
        /// folders, files or shared-files
        target: String,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// Fill folders, files or shares with generated data
    Populate {
        /// folders, files or shared-files
        target: String,
    },
}

/// Execute admin commands
pub async fn execute(args: &AdminArgs, ctx: &Context) -> AppResult<()> {
    let identity = ctx.enter(&RouteGuard::admin_only(), "admin")?;
    require_admin(&identity)?;

    match &args.command {
        AdminCommand::PageSize { size } => {
            ctx.client.set_page_size(*size).await?;
            output::print_success(&format!("Backend page size set to {size}"));
        }
        AdminCommand::Purge { target, force } => {
            let target: BulkTarget = target.parse()?;
            if !super::confirm(&format!("Delete ALL {target}? This cannot be undone"), *force)? {
                println!("Cancelled.");
                return Ok(());
            }
            ctx.client.purge(target).await?;
            output::print_success(&format!("All {target} deleted"));
        }
        AdminCommand::Populate { target } => {
            let target: BulkTarget = target.parse()?;
            ctx.client.populate(target).await?;
            output::print_success(&format!("{target} populated"));
        }
    }

    Ok(())
}
