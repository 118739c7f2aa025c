//! E621 Client - a single-site desktop browser shell.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use browser::{app, ShellConfig};

// One worker thread hosts the presence reporter; the window runs on the main thread.
#[tokio::main(flavor = "multi_thread", worker_threads = 1)]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ShellConfig::default();
    info!("{} v{}", config.app_name, browser::VERSION);

    let profile = browser::open_profile(&config)?;
    let presence = browser::start_presence(&config);

    app::run(config, profile, presence)?;
    Ok(())
}
