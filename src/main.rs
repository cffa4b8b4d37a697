use multisite_domain_sync::{bootstrap, config, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;
    telemetry::init_tracing(&config.log_level, &config.log_format)?;
    config.print_summary();

    if let Err(e) = bootstrap::run(config).await {
        tracing::error!(error = %e, "Domain sync failed");
        return Err(e);
    }

    Ok(())
}
