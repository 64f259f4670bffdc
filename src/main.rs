use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tokio_util::sync::CancellationToken;

use topographer::config::Opt;
use topographer::initialization::{init_logger, init_topographer};
use topographer::server;

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    init_logger(opt.log_level.clone().into()).context("Failed to initialize logger")?;

    let topographer = Arc::new(
        init_topographer(&opt)
            .await
            .context("Failed to initialize topographer")?,
    );

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown signal received");
                cancel.cancel();
            }
        });
    }

    let served = server::serve(opt.listen, Arc::clone(&topographer), cancel).await;

    // Even a failed accept loop must leave the providers shut down cleanly.
    topographer.shutdown().await;

    served
}
