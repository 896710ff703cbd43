use remindd::config::Config;
use remindd::logging::init_tracing;
use remindd::run_with_shutdown;

#[tokio::main]
async fn main() {
    init_tracing();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run_with_shutdown(config, shutdown_signal()).await {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
