//! Terraform provider entry point for Pinto DNS
//!
//! Reads one JSON request from stdin, runs it against the Pinto API and
//! writes the JSON response to stdout. Logs go to stderr.
//!
//! Provider settings come from `--config` (the provider block as JSON),
//! then from flags, then from `PINTO_*` environment variables.

mod protocol;
mod server;

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use pinto_core::config::{
    ENV_API_KEY, ENV_BASE_URL, ENV_CLIENT_ID, ENV_CLIENT_SCOPE, ENV_CLIENT_SECRET,
    ENV_CREDENTIALS_ID, ENV_ENVIRONMENT, ENV_PROVIDER, ENV_TOKEN_URL,
};
use pinto_core::{PintoProvider, ProviderContext, ProviderSettings};
use protocol::{Request, Response};
use server::{DEFAULT_DEADLINE_SECS, ProviderServer};
use tokio::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "terraform-provider-pinto", version, about)]
struct Args {
    /// Provider block as a JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Request file (stdin when omitted)
    #[arg(long)]
    request: Option<PathBuf>,

    /// Deadline for one request in seconds
    #[arg(long, default_value_t = DEFAULT_DEADLINE_SECS)]
    deadline_secs: u64,

    #[arg(long, env = ENV_BASE_URL)]
    base_url: Option<String>,
    #[arg(long, env = ENV_TOKEN_URL)]
    token_url: Option<String>,
    #[arg(long, env = ENV_CLIENT_ID)]
    client_id: Option<String>,
    #[arg(long, env = ENV_CLIENT_SECRET, hide_env_values = true)]
    client_secret: Option<String>,
    /// Comma-separated OAuth scopes
    #[arg(long, env = ENV_CLIENT_SCOPE)]
    client_scope: Option<String>,
    #[arg(long, env = ENV_API_KEY, hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, env = ENV_CREDENTIALS_ID)]
    credentials_id: Option<String>,
    /// Default DNS backend
    #[arg(long, env = ENV_PROVIDER)]
    pinto_provider: Option<String>,
    /// Default environment
    #[arg(long, env = ENV_ENVIRONMENT)]
    pinto_environment: Option<String>,
}

impl Args {
    /// Flag (or environment) value for a `PINTO_*` key.
    fn lookup(&self, key: &str) -> Option<String> {
        let value = match key {
            ENV_BASE_URL => &self.base_url,
            ENV_TOKEN_URL => &self.token_url,
            ENV_CLIENT_ID => &self.client_id,
            ENV_CLIENT_SECRET => &self.client_secret,
            ENV_CLIENT_SCOPE => &self.client_scope,
            ENV_API_KEY => &self.api_key,
            ENV_CREDENTIALS_ID => &self.credentials_id,
            ENV_PROVIDER => &self.pinto_provider,
            ENV_ENVIRONMENT => &self.pinto_environment,
            _ => return None,
        };
        value.clone()
    }

    fn settings(&self) -> anyhow::Result<ProviderSettings> {
        let block = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing provider block {}", path.display()))?
            }
            None => ProviderSettings::default(),
        };
        Ok(block.with_env_defaults(|key| self.lookup(key)))
    }

    fn read_request(&self) -> anyhow::Result<Request> {
        let raw = match &self.request {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?,
            None => {
                let mut raw = String::new();
                std::io::stdin()
                    .read_to_string(&mut raw)
                    .context("reading request from stdin")?;
                raw
            }
        };
        serde_json::from_str(&raw).context("parsing request")
    }
}

async fn run(args: &Args) -> anyhow::Result<Response> {
    let request = args.read_request()?;
    let settings = args.settings()?;
    tracing::debug!("Provider settings: {settings:?}");

    let ctx = ProviderContext::configure(&settings).context("configuring provider")?;
    let server = ProviderServer::new(
        PintoProvider::new(Arc::new(ctx)),
        Duration::from_secs(args.deadline_secs),
    );
    Ok(server.handle(request).await)
}

fn write_response(response: &Response) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, response).context("writing response")?;
    writeln!(stdout).context("writing response")?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries the response, logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = Args::parse();

    let response = match run(&args).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("{e:#}");
            Response::error(pinto_core::Diagnostic {
                severity: "error",
                summary: format!("{e:#}"),
                detail: None,
            })
        }
    };

    if let Err(e) = write_response(&response) {
        tracing::error!("{e:#}");
        return ExitCode::FAILURE;
    }
    if response.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
