//! Console command definitions and dispatch.

pub mod admin;
pub mod config;
pub mod file;
pub mod folder;
pub mod session;
pub mod share;
pub mod stats;
pub mod user;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use brainbox_auth::permissions::RouteGuard;
use brainbox_auth::session::{Identity, SessionManager};
use brainbox_client::{ApiClient, HttpTokenRefresher};
use brainbox_core::config::AppConfig;
use brainbox_core::error::AppError;
use brainbox_core::result::AppResult;
use brainbox_core::types::{Page, PageRequest, SortState, Sortable};

use crate::output::{self, OutputFormat};

/// BrainBox — administrative console for the BrainBox backend
#[derive(Debug, Parser)]
#[command(name = "brainbox", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding `default.toml` and per-environment overlays
    #[arg(short, long, default_value = "config", global = true)]
    pub config_dir: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Configuration management
    Config(config::ConfigArgs),
    #[command(flatten)]
    Backend(BackendCommand),
}

/// Commands that talk to the backend under the stored session
#[derive(Debug, Subcommand)]
pub enum BackendCommand {
    /// Log in and store the session tokens
    Login(session::LoginArgs),
    /// Log out and forget the stored tokens
    Logout,
    /// Show the current identity
    Whoami,
    /// Register a new account
    Register(session::RegisterArgs),
    /// Confirm a registration with the emailed code
    Confirm {
        /// Confirmation code
        code: String,
    },
    /// User management
    User(user::UserArgs),
    /// Folder management
    Folder(folder::FolderArgs),
    /// File management
    File(file::FileArgs),
    /// File sharing
    Share(share::ShareArgs),
    /// Aggregate statistics
    Stats(stats::StatsArgs),
    /// Admin dashboard operations
    Admin(admin::AdminArgs),
}

impl Cli {
    /// Execute the command.
    ///
    /// Configuration commands run offline; everything else first restores
    /// the stored session and connects to the backend.
    pub async fn execute(&self, app_config: AppConfig) -> AppResult<()> {
        match &self.command {
            Commands::Config(args) => config::execute(args, &app_config, self.format),
            Commands::Backend(command) => {
                let ctx = Context::connect(&app_config, self.format).await?;
                command.execute(&ctx).await
            }
        }
    }
}

impl BackendCommand {
    /// Execute the command against a connected context.
    pub async fn execute(&self, ctx: &Context) -> AppResult<()> {
        match self {
            Self::Login(args) => session::login(ctx, args).await,
            Self::Logout => session::logout(ctx).await,
            Self::Whoami => session::whoami(ctx).await,
            Self::Register(args) => session::register(ctx, args).await,
            Self::Confirm { code } => session::confirm(ctx, code).await,
            Self::User(args) => user::execute(args, ctx).await,
            Self::Folder(args) => folder::execute(args, ctx).await,
            Self::File(args) => file::execute(args, ctx).await,
            Self::Share(args) => share::execute(args, ctx).await,
            Self::Stats(args) => stats::execute(args, ctx).await,
            Self::Admin(args) => admin::execute(args, ctx).await,
        }
    }
}

/// Everything a backend command needs: the API client with the session
/// behind it, and the output format.
#[derive(Debug)]
pub struct Context {
    /// Backend client.
    pub client: ApiClient,
    /// Output format.
    pub format: OutputFormat,
}

impl Context {
    /// Restore the stored session and build the client.
    pub async fn connect(config: &AppConfig, format: OutputFormat) -> AppResult<Self> {
        let store = brainbox_auth::store::from_config(&config.session);
        let refresher = Arc::new(HttpTokenRefresher::new(&config.api)?);
        let session = Arc::new(SessionManager::restore(store, refresher).await);
        let client = ApiClient::new(&config.api, session)?;

        tracing::debug!(
            base_url = %client.base_url(),
            authenticated = client.session().identity().authenticated,
            "Console context ready"
        );

        Ok(Self { client, format })
    }

    /// The current identity.
    pub fn identity(&self) -> Identity {
        self.client.session().identity()
    }

    /// Enter the route at `path` under `guard`, returning the identity that
    /// was admitted.
    pub fn enter(&self, guard: &RouteGuard, path: &str) -> AppResult<Identity> {
        let identity = self.identity();
        guard.require(&identity, path)?;
        Ok(identity)
    }
}

/// Paging and sorting flags shared by list commands.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(short, long, default_value_t = 1)]
    pub page: u64,

    /// Items per page (backend default when omitted)
    #[arg(long)]
    pub page_size: Option<u64>,

    /// Sort the page by a column; repeat the same column to flip to
    /// descending, and a third time to reset
    #[arg(short, long = "sort", value_name = "COLUMN")]
    pub sort: Vec<String>,
}

impl ListArgs {
    /// The page to fetch.
    pub fn page_request(&self) -> PageRequest {
        match self.page_size {
            Some(size) => PageRequest::sized(self.page, size),
            None => PageRequest::new(self.page),
        }
    }

    /// The sort state reached by selecting each `--sort` column in turn.
    pub fn sort_state(&self) -> SortState {
        let mut state = SortState::default();
        for column in &self.sort {
            state.toggle(column);
        }
        state
    }
}

/// Sort a fetched page, number its rows and print it.
pub fn show_page<T, R, F>(mut page: Page<T>, args: &ListArgs, format: OutputFormat, to_row: F)
where
    T: Sortable,
    R: Serialize + Tabled,
    F: Fn(u64, &T) -> R,
{
    args.sort_state().apply(&mut page.results);
    let request = args.page_request();
    let rows: Vec<R> = page
        .results
        .iter()
        .enumerate()
        .map(|(index, item)| to_row(page.row_number(request.page, index), item))
        .collect();
    output::print_page(&page, request.page, &rows, format);
}

/// Ask before a destructive action unless `force` is set.
pub fn confirm(prompt: &str, force: bool) -> AppResult<bool> {
    if force {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {}", e)))
}

/// Prompt for a value that was not given on the command line.
pub fn prompt_text(value: &Option<String>, prompt: &str) -> AppResult<String> {
    match value {
        Some(v) => Ok(v.clone()),
        None => dialoguer::Input::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {}", e))),
    }
}

/// Prompt for a password that was not given on the command line.
pub fn prompt_password(value: &Option<String>, confirm: bool) -> AppResult<String> {
    match value {
        Some(v) => Ok(v.clone()),
        None => {
            let mut prompt = dialoguer::Password::new().with_prompt("Password");
            if confirm {
                prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
            }
            prompt
                .interact()
                .map_err(|e| AppError::internal(format!("Input error: {}", e)))
        }
    }
}

/// The logged-in user's id, required by commands that create resources.
pub fn require_user_id(identity: &Identity) -> AppResult<i64> {
    identity
        .user_id
        .ok_or_else(|| AppError::authentication("The session carries no user id"))
}
