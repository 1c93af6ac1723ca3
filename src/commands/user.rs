//! User management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use brainbox_auth::permissions::{RouteGuard, require_admin, require_modify};
use brainbox_client::dto::{RegisterRequest, UpdateUserRequest, UserQuery};
use brainbox_core::error::AppError;
use brainbox_core::result::AppResult;
use brainbox_entity::user::{Role, User};

use super::{Context, ListArgs};
use crate::output::{self, or_dash};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List users
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Only usernames containing this fragment
        #[arg(long)]
        username: Option<String>,
        /// Only users created in this year
        #[arg(long)]
        year: Option<i32>,
        /// Include the personal file count column
        #[arg(long)]
        agg: bool,
    },
    /// Show one user
    Show {
        /// User ID
        id: i64,
    },
    /// Create an account (admin)
    Add {
        /// Username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,
        /// Email (prompted when omitted)
        #[arg(short, long)]
        email: Option<String>,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Change a user's username or email
    Edit {
        /// User ID
        id: i64,
        /// New username
        #[arg(short, long)]
        username: Option<String>,
        /// New email
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Delete a user
    Delete {
        /// User ID
        id: i64,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// Change a user's role (admin)
    SetRole {
        /// User ID
        id: i64,
        /// New role: User, Moderator or Admin
        role: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// Row number
    #[tabled(rename = "#")]
    no: u64,
    /// User ID
    id: i64,
    /// Username
    username: String,
    /// Email
    email: String,
    /// Role
    role: String,
    /// Personal files
    files: String,
    /// Created at
    created_at: String,
}

impl UserRow {
    fn new(no: u64, user: &User) -> Self {
        Self {
            no,
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.to_string(),
            files: or_dash(user.num_personal_files),
            created_at: or_dash(user.created_at.map(|t| t.format("%Y-%m-%d %H:%M"))),
        }
    }
}

/// Execute user commands
pub async fn execute(args: &UserArgs, ctx: &Context) -> AppResult<()> {
    match &args.command {
        UserCommand::List {
            list,
            username,
            year,
            agg,
        } => {
            ctx.enter(&RouteGuard::everyone(), "users")?;
            let query = UserQuery {
                page: list.page_request(),
                username: username.clone(),
                year: *year,
                agg: *agg,
            };
            let page = ctx.client.list_users(&query).await?;
            super::show_page(page, list, ctx.format, UserRow::new);
        }
        UserCommand::Show { id } => {
            ctx.enter(&RouteGuard::everyone(), &format!("user/{id}"))?;
            let user = ctx.client.get_user(*id).await?;
            output::print_item(&user, ctx.format);
        }
        UserCommand::Add {
            username,
            email,
            password,
        } => {
            let identity = ctx.enter(&RouteGuard::admin_only(), "users/add")?;
            require_admin(&identity)?;

            let request = RegisterRequest {
                username: super::prompt_text(username, "Username")?,
                email: super::prompt_text(email, "Email")?,
                password: super::prompt_password(password, true)?,
            };
            let user = ctx.client.create_user(&request).await?;
            output::print_success(&format!(
                "User '{}' created (id: {})",
                user.username, user.id
            ));
        }
        UserCommand::Edit {
            id,
            username,
            email,
        } => {
            let identity = ctx.enter(&RouteGuard::members(), &format!("user/{id}/edit"))?;
            let changes = UpdateUserRequest {
                username: username.clone(),
                email: email.clone(),
            };
            if changes.is_empty() {
                return Err(AppError::validation("Nothing to change; pass --username or --email"));
            }

            let user = ctx.client.get_user(*id).await?;
            require_modify(&identity, &user, "user")?;

            let updated = ctx.client.update_user(*id, &changes).await?;
            output::print_success(&format!("User '{}' updated", updated.username));
        }
        UserCommand::Delete { id, force } => {
            let identity = ctx.enter(&RouteGuard::members(), &format!("user/{id}/delete"))?;
            let user = ctx.client.get_user(*id).await?;
            require_modify(&identity, &user, "user")?;

            if !super::confirm(&format!("Delete user '{}'?", user.username), *force)? {
                println!("Cancelled.");
                return Ok(());
            }

            ctx.client.delete_user(*id).await?;
            output::print_success(&format!("User '{}' deleted", user.username));

            if identity.user_id == Some(*id) {
                tracing::info!(user_id = id, "Deleted own account, logging out");
                ctx.client.logout().await?;
                output::print_warning("You deleted your own account and have been logged out");
            }
        }
        UserCommand::SetRole { id, role } => {
            let identity = ctx.enter(&RouteGuard::admin_only(), "admin")?;
            require_admin(&identity)?;

            let role: Role = role.parse()?;
            if role.is_guest() {
                return Err(AppError::validation(
                    "Accounts cannot be demoted to Guest; choose User, Moderator or Admin",
                ));
            }

            ctx.client.set_user_role(*id, role).await?;
            output::print_success(&format!("User {id} is now {role}"));
        }
    }

    Ok(())
}
