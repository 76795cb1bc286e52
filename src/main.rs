use anyhow::Result;
use clap::Parser;

use jobscout::cli::{self, Cli};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = cli
        .log_level()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid log directive"))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(directive))
        .init();

    cli::run(cli).await
}
