//! `podio-bridge` server entry point.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use bridge_traits::contacts::PhoneNumberLabel;
use clap::Parser;
use core_runtime::config::{EnvNaming, OAuth2Settings};
use core_runtime::logging::{init_logging, LogFormat, LogLevel, LoggingConfig};
use core_service::BridgeService;
use provider_podio::{ContactOptions, PhonelessContacts};
use tokio::signal;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "podio-bridge", version, about = "Podio CRM contact bridge")]
struct Cli {
    /// Environment variable naming for OAuth2 settings (generic, podio).
    #[arg(long, env = "BRIDGE_ENV_NAMING", default_value = "generic", value_parser = parse_env_naming)]
    env_naming: EnvNaming,

    /// What to do with contacts that have no phone number (drop, keep).
    #[arg(long, env = "BRIDGE_PHONELESS_CONTACTS", default_value = "drop", value_parser = parse_phoneless)]
    phoneless_contacts: PhonelessContacts,

    /// Leave phone numbers unlabeled instead of tagging them WORK.
    #[arg(long, env = "BRIDGE_UNLABELED_PHONES", default_value_t = false)]
    unlabeled_phones: bool,

    /// OAuth2 scope requested on the authorization URL.
    #[arg(long, env = "PODIO_OAUTH_SCOPE")]
    oauth_scope: Option<String>,

    /// Timeout for each outbound request, in seconds.
    #[arg(
        long,
        env = "BRIDGE_REQUEST_TIMEOUT_SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    request_timeout_secs: u64,

    /// Address to listen on.
    #[arg(long, env = "BRIDGE_LISTEN", default_value = "0.0.0.0:8080")]
    listen: SocketAddr,

    /// Log format (pretty, json, compact).
    #[arg(long, env = "BRIDGE_LOG_FORMAT", value_parser = parse_log_format)]
    log_format: Option<LogFormat>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "BRIDGE_LOG_LEVEL", default_value = "info", value_parser = parse_log_level)]
    log_level: LogLevel,
}

impl Cli {
    fn contact_options(&self) -> ContactOptions {
        let phone_label = if self.unlabeled_phones {
            None
        } else {
            Some(PhoneNumberLabel::Work)
        };

        ContactOptions::default()
            .with_phoneless_contacts(self.phoneless_contacts)
            .with_phone_label(phone_label)
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs))
    }

    fn logging_config(&self) -> LoggingConfig {
        let mut config = LoggingConfig::default().with_level(self.log_level);
        if let Some(format) = self.log_format {
            config = config.with_format(format);
        }
        if let Ok(filter) = std::env::var("RUST_LOG") {
            if !filter.trim().is_empty() {
                config = config.with_filter(filter);
            }
        }
        config
    }
}

fn parse_env_naming(s: &str) -> Result<EnvNaming, String> {
    EnvNaming::parse(s).ok_or_else(|| format!("unknown env naming `{s}` (expected generic or podio)"))
}

fn parse_phoneless(s: &str) -> Result<PhonelessContacts, String> {
    PhonelessContacts::parse(s).ok_or_else(|| format!("unknown value `{s}` (expected drop or keep)"))
}

fn parse_log_format(s: &str) -> Result<LogFormat, String> {
    LogFormat::parse(s).ok_or_else(|| format!("unknown log format `{s}`"))
}

fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    LogLevel::parse(s).ok_or_else(|| format!("unknown log level `{s}`"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real deployments set the environment directly.
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.logging_config()).context("failed to initialize logging")?;

    if let Ok(path) = dotenv {
        info!(path = %path.display(), "Loaded environment file");
    }

    let settings = OAuth2Settings::from_env(cli.env_naming).map_err(|e| {
        error!(error = %e, naming = %cli.env_naming, "OAuth2 configuration is incomplete");
        e
    })?;

    let service = BridgeService::podio(&settings, cli.contact_options(), cli.oauth_scope.clone())
        .context("failed to build bridge service")?;

    let listener = tokio::net::TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("failed to bind {}", cli.listen))?;

    info!(address = %listener.local_addr()?, "podio-bridge listening");

    axum::serve(listener, service.router())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("podio-bridge stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
