use portal_server::{Config, Server, ServerState, init_logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    let _log_guards = init_logger(
        &config.log_level,
        config.is_production(),
        config.log_dir.as_deref(),
    )?;

    tracing::info!(
        port = config.http_port,
        environment = %config.environment,
        "Portal server starting"
    );

    let state = ServerState::initialize(&config)?;
    if let Err(e) = Server::new(config, state).run().await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    Ok(())
}
