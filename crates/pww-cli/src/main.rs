//! # pwwctl entry point
//!
//! Parses command-line arguments, builds the HTTP collaborators, and
//! dispatches to the subcommand workflows.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pww_cli::context::{default_identity_file, load_identity};
use pww_cli::manage_user::{run_manage_user, ManageUserArgs};
use pww_cli::new_user::{run_new_user, NewUserArgs};
use pww_cli::{CommandContext, Console, OutputFormat};
use pww_client::config::parse_url;
use pww_client::{BlockingClient, ClientConfig};

/// pwwctl: user administration for the CMS web service.
///
/// Manages contractor attributes of existing users and creates new accounts,
/// including identity generation, email verification, and testnet paywall
/// payment.
#[derive(Parser, Debug)]
#[command(name = "pwwctl", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Web server URL (overrides PWW_HOST).
    #[arg(long, global = true)]
    host: Option<String>,

    /// Testnet faucet URL (overrides PWW_FAUCET_URL).
    #[arg(long, global = true)]
    faucet_url: Option<String>,

    /// Identity file (overrides PWW_IDENTITY_FILE).
    #[arg(long, global = true)]
    identity_file: Option<PathBuf>,

    /// Accept self-signed TLS certificates.
    #[arg(long, global = true)]
    skip_verify: bool,

    /// Print replies as single-line JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Update a user's domain, contractor type, and supervisors (admin only).
    #[command(name = "manageuser")]
    ManageUser(ManageUserArgs),

    /// Create a new user account.
    #[command(name = "newuser")]
    NewUser(NewUserArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // stdout carries replies only.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    tracing::debug!("pwwctl v{} starting", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ClientConfig::from_env().context("invalid client configuration")?;
    if let Some(host) = &cli.host {
        config.host = parse_url("--host", host)?;
    }
    if let Some(faucet_url) = &cli.faucet_url {
        config.faucet_url = parse_url("--faucet-url", faucet_url)?;
    }
    config.skip_verify |= cli.skip_verify;
    tracing::debug!(?config, "resolved client configuration");

    let identity_file = cli.identity_file.clone().unwrap_or_else(default_identity_file);
    let identity = load_identity(&identity_file);
    let client = BlockingClient::new(&config).context("failed to build HTTP client")?;

    let ctx = CommandContext {
        api: &client,
        faucet: &client,
        identity: identity.as_ref(),
        identity_file: &identity_file,
        format: if cli.json {
            OutputFormat::Compact
        } else {
            OutputFormat::Pretty
        },
    };

    match &cli.command {
        Commands::ManageUser(args) => {
            let mut console = Console::new(io::stdin().lock(), io::stdout());
            run_manage_user(args, &ctx, &mut console)?;
        }
        Commands::NewUser(args) => {
            run_new_user(args, &ctx, &mut io::stdout().lock())?;
        }
    }
    Ok(())
}
