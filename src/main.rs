//! vcsky-proxy
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!     Browser ───────────▶│  GET /            → dist/index.html + COOP/COEP
//!                         │  /vcsky/{path}    → https://cdn.dos.zone/vcsky/{path}
//!                         │  /vcbr/{path}     → https://br.cdn.dos.zone/vcsky/{path}
//!                         │  /{static path}   → dist/{static path}
//!                         └──────────────────────────────────────────────┘
//! ```

use clap::Parser;

use vcsky_proxy::lifecycle::startup;
use vcsky_proxy::observability;
use vcsky_proxy::ProxyConfig;

#[derive(Parser)]
#[command(name = "vcsky-proxy")]
#[command(about = "Static site server with same-origin CDN proxying", long_about = None)]
struct Cli {
    /// Interface to listen on.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = ProxyConfig::with_bind(&cli.host, cli.port);

    observability::init_logging(&config.observability);
    tracing::info!("vcsky-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await
}
