//! auto-missions - entry point
//!
//! Loads the account and proxy lists, then runs mission cycles until Ctrl-C.

use auto_missions::{loader, AccountProcessor, Config, ProxyRotation, Scheduler, Terminal};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Accounts and requests run strictly one at a time, so one thread is enough.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async_main())
}

async fn async_main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auto_missions=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let terminal = Terminal::stdout();

    terminal.banner("AUTO MISSIONS", "Auto Complete Task");

    let use_proxy = match config.use_proxy {
        Some(answer) => answer,
        None => terminal.confirm("Use proxy? (y/n): ")?,
    };

    let proxies = if use_proxy {
        let list = loader::load_proxies(&config.proxy_file).await;
        if list.is_empty() {
            terminal.warn("Proxy not available, continuing without proxy.");
        }
        ProxyRotation::new(list)
    } else {
        ProxyRotation::direct()
    };

    let credentials = loader::load_credentials(&config.token_file).await?;
    info!(
        "Starting with {} accounts and {} proxies",
        credentials.len(),
        proxies.len()
    );

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                warn!("Shutdown requested");
                shutdown.cancel();
            }
            Err(e) => error!("Cannot listen for Ctrl-C: {}", e),
        }
    });

    let processor = AccountProcessor::new(&config, terminal.clone());
    let mut scheduler = Scheduler::new(
        credentials,
        proxies,
        processor,
        terminal.clone(),
        config.cycle_interval,
    )?;
    scheduler.run(&cancel).await;

    terminal.muted("Stopped.");
    Ok(())
}
