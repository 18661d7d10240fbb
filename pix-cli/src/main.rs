//! Pix CLI
//!
//! Command-line interface for the Pix key directory and transfer API.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use pix_client::config::{self, parse_timeout_secs};
use pix_client::{ClientError, PixClient, RouteStyle, Settings};
use pix_types::{
    Amount, KeyInfo, KeyScheme, PixError, PixTransport, TransferRequest, TransferResult,
    TransferStatus,
};

#[derive(Parser)]
#[command(name = "pix")]
#[command(author, version, about = "Pix key lookup and transfer client", long_about = None)]
struct Cli {
    /// Base URL of the Pix service
    #[arg(long, global = true, env = config::BASE_URL_VAR, default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = config::TIMEOUT_VAR, default_value = config::DEFAULT_TIMEOUT_SECS)]
    timeout: String,

    /// Route family, "keys" or "search"
    #[arg(long, global = true, env = config::ROUTES_VAR, default_value = config::DEFAULT_ROUTES)]
    routes: String,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a Pix key
    Search {
        /// Pix key (CPF, CNPJ, phone, email or random key)
        key: String,
    },
    /// Transfer money to a Pix key
    Transfer {
        /// Sender account
        sender: String,
        /// Recipient Pix key
        recipient: String,
        /// Amount in reais, e.g. 10.50
        #[arg(allow_negative_numbers = true)]
        value: String,
        /// Idempotency key; a random one is generated when omitted
        #[arg(long)]
        idempotency_key: Option<String>,
    },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("✗ {:#}", err);
            exit_code(&err)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info,pix_client=debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// 1 for Pix failures, 2 for everything else (transport, config, input).
fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<ClientError>() {
        Some(ClientError::Pix(_)) => ExitCode::from(1),
        _ => ExitCode::from(2),
    }
}

/// Flags win over `PIX_*` variables, which win over the defaults.
fn load_settings(cli: &Cli) -> Result<Settings> {
    let timeout = parse_timeout_secs(&cli.timeout)?;
    let routes: RouteStyle = cli.routes.parse()?;
    let settings = Settings::new(&cli.base_url, timeout)
        .context("invalid Pix configuration")?
        .with_routes(routes);
    Ok(settings)
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(&cli)?;
    tracing::debug!(
        base_url = %settings.base_url(),
        timeout = ?settings.timeout(),
        routes = %settings.routes(),
        "loaded settings"
    );

    let client = PixClient::new(settings)?;

    match cli.command {
        Commands::Search { key } => search(&client, &key, cli.json),
        Commands::Transfer {
            sender,
            recipient,
            value,
            idempotency_key,
        } => {
            let amount: Amount = value
                .parse()
                .with_context(|| format!("invalid amount {:?}", value))?;
            let idempotency_key = idempotency_key.unwrap_or_else(|| {
                let key = Uuid::new_v4().to_string();
                eprintln!("Idempotency key: {}", key);
                key
            });
            let req =
                TransferRequest::new(sender, recipient, amount).with_idempotency_key(idempotency_key);
            transfer(&client, req, cli.json)
        }
    }
}

fn search<T: PixTransport>(client: &PixClient<T>, key: &str, json: bool) -> Result<()> {
    let info = client.lookup_key(key)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }
    println!("{}", key_line(&info));
    Ok(())
}

fn key_line(info: &KeyInfo) -> String {
    match KeyScheme::detect(&info.key) {
        Some(scheme) => format!("✓ {} – {} ({} key)", info.account_name, info.bank, scheme),
        None => format!("✓ {} – {}", info.account_name, info.bank),
    }
}

fn transfer<T: PixTransport>(client: &PixClient<T>, req: TransferRequest, json: bool) -> Result<()> {
    let result = client.transfer(req)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", transfer_line(&result));
    }
    if result.status == TransferStatus::Failed {
        // The record the service reported, as it was decoded.
        let detail = serde_json::to_string(&result)?;
        return Err(ClientError::Pix(PixError::TransferFailed(detail)).into());
    }
    Ok(())
}

fn transfer_line(result: &TransferResult) -> String {
    let mark = match result.status {
        TransferStatus::Success => "✓",
        TransferStatus::Failed => "✗",
    };
    format!(
        "{} TX {} – {} → {}  R$ {}",
        mark, result.tx_id, result.sender, result.recipient, result.amount
    )
}
