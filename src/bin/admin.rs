//! CLI administration tool for shorty.
//!
//! Provides commands for managing accounts, viewing statistics, and
//! checking the database without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create an account
//! cargo run --bin admin -- user create --email ops@example.com
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `JWT_SECRET` (required for `user create`): token signing secret

use shorty::application::services::AuthService;
use shorty::infrastructure::persistence::PgUserRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shorty.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Account management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new account
    Create {
        /// Account email
        #[arg(short, long)]
        email: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches account management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    match action {
        UserAction::Create { email, yes } => create_user(pool, email, yes).await?,
    }

    Ok(())
}

/// Creates a new account with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for email (or use provided)
/// 2. Prompt for password with confirmation
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Register via the auth service (argon2 hash, uniqueness check)
/// 5. Display the issued bearer token
async fn create_user(pool: &PgPool, email: Option<String>, skip_confirm: bool) -> Result<()> {
    println!("{}", "Create account".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Create account for {}?", email))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".yellow());
            return Ok(());
        }
    }

    let jwt_secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));
    let auth = AuthService::new(repo, jwt_secret);

    let (user, token) = auth
        .register(&email, &password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create account: {e}"))?;

    println!();
    println!("{} Account created", "OK".green().bold());
    println!("  Id:    {}", user.id.to_string().cyan());
    println!("  Email: {}", user.email.cyan());
    println!();
    println!("Bearer token (valid 24h):");
    println!("  {}", token.bright_yellow());

    Ok(())
}

/// Shows link, click, and account counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;
    let clicks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM link_clicks")
        .fetch_one(pool)
        .await?;
    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    let active: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM links WHERE active AND (expires_at IS NULL OR expires_at > NOW())",
    )
    .fetch_one(pool)
    .await?;

    println!("  Links:    {} ({} active)", links.to_string().cyan(), active);
    println!("  Clicks:   {}", clicks.to_string().cyan());
    println!("  Accounts: {}", users.to_string().cyan());

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{} Database connection OK", "OK".green().bold());
            println!("  {}", version.dimmed());
        }
    }

    Ok(())
}
