//! Login, logout and registration commands.

use clap::Args;
use serde::Serialize;

use brainbox_auth::permissions::RouteGuard;
use brainbox_auth::session::SessionState;
use brainbox_client::dto::{LoginRequest, RegisterRequest};
use brainbox_core::error::AppError;
use brainbox_core::result::AppResult;
use brainbox_entity::user::Role;

use super::Context;
use crate::output::{self, OutputFormat};

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email (prompted when omitted)
    #[arg(short, long)]
    pub email: Option<String>,
    /// Password (prompted when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

/// Arguments for `register`
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Desired username (prompted when omitted)
    #[arg(short, long)]
    pub username: Option<String>,
    /// Account email (prompted when omitted)
    #[arg(short, long)]
    pub email: Option<String>,
    /// Password (prompted when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

/// What `whoami` reports.
#[derive(Debug, Serialize)]
struct WhoamiView {
    state: SessionState,
    user_id: Option<i64>,
    role: Role,
    session_valid: bool,
}

/// Log in with email and password.
pub async fn login(ctx: &Context, args: &LoginArgs) -> AppResult<()> {
    ctx.enter(&RouteGuard::guests_only(), "login")?;

    let credentials = LoginRequest {
        email: super::prompt_text(&args.email, "Email")?,
        password: super::prompt_password(&args.password, false)?,
    };
    let identity = ctx.client.login(&credentials).await?;

    output::print_success(&format!(
        "Logged in as user {} ({})",
        output::or_dash(identity.user_id),
        identity.user_role
    ));
    Ok(())
}

/// Forget the stored session.
pub async fn logout(ctx: &Context) -> AppResult<()> {
    if !ctx.identity().authenticated {
        output::print_warning("Not logged in");
    }
    ctx.client.logout().await?;
    output::print_success("Logged out");
    Ok(())
}

/// Report the current identity, refreshing an expired access token first.
pub async fn whoami(ctx: &Context) -> AppResult<()> {
    let session_valid = ctx.client.session().check_auth().await;
    let identity = ctx.identity();

    let view = WhoamiView {
        state: identity.state(),
        user_id: identity.user_id,
        role: identity.user_role,
        session_valid,
    };

    match ctx.format {
        OutputFormat::Json => output::print_item(&view, ctx.format),
        OutputFormat::Table => {
            if identity.authenticated {
                output::print_kv("User", &output::or_dash(identity.user_id));
                output::print_kv("Role", identity.user_role.as_str());
                if !session_valid {
                    output::print_warning("Session expired; run `brainbox login`");
                }
            } else {
                println!("Not logged in.");
            }
        }
    }
    Ok(())
}

/// Register a new account. The backend emails a confirmation code.
pub async fn register(ctx: &Context, args: &RegisterArgs) -> AppResult<()> {
    ctx.enter(&RouteGuard::guests_only(), "register")?;

    let registration = RegisterRequest {
        username: super::prompt_text(&args.username, "Username")?,
        email: super::prompt_text(&args.email, "Email")?,
        password: super::prompt_password(&args.password, true)?,
    };
    let response = ctx.client.register(&registration).await?;

    output::print_success(&format!(
        "Registration for '{}' submitted; check {} for the confirmation code",
        registration.username, registration.email
    ));
    if ctx.format == OutputFormat::Json && !response.is_null() {
        output::print_item(&response, ctx.format);
    }
    Ok(())
}

/// Confirm a registration.
pub async fn confirm(ctx: &Context, code: &str) -> AppResult<()> {
    ctx.enter(&RouteGuard::guests_only(), "register/confirm")?;

    let code = code.trim();
    if code.is_empty() {
        return Err(AppError::validation("Confirmation code is required"));
    }
    let response = ctx.client.confirm_registration(code).await?;

    output::print_success("Registration confirmed; you can now log in");
    if ctx.format == OutputFormat::Json && !response.is_null() {
        output::print_item(&response, ctx.format);
    }
    Ok(())
}
