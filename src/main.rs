//! relay-proxy
//!
//! Serves one endpoint that fetches a fixed upstream page and relays it.
//!
//! ```text
//!     Client ── GET /proxy/google ──▶ ┌──────────────┐ ── GET ──▶ Upstream
//!                                     │ relay-proxy  │
//!     Client ◀── 200 text/html ────── └──────────────┘ ◀── body ──
//!                 or 500 "Error: ..."
//! ```

use std::path::PathBuf;

use clap::Parser;

use relay_proxy::config::{load_config, validate_config, ConfigError, RelayConfig};
use relay_proxy::lifecycle::startup;

#[derive(Parser)]
#[command(name = "relay-proxy")]
#[command(version, about = "Relays a fixed upstream page over HTTP", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<RelayConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => RelayConfig::default(),
        };

        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
            validate_config(&config).map_err(ConfigError::Validation)?;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;
    startup::run(config).await?;
    Ok(())
}
