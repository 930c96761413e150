use clap::Parser;
use ont_metasync::adapters::{command, irods, mlwh, IrodsProbe, MySqlProbe};
use ont_metasync::config::{resolve_db_url, EntrypointConfig};
use ont_metasync::core::readiness;
use ont_metasync::utils::monitor::HostMonitor;
use ont_metasync::utils::{logger, validation::Validate};
use std::time::Duration;

/// Test-harness container entrypoint. Waits for the iRODS service and the
/// warehouse MySQL database, prints diagnostic state, then either execs
/// the trailing command or runs the install and test commands.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = EntrypointConfig::parse();

    logger::init_cli_logger(config.verbose);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(2);
    }

    tracing::info!("🚀 Starting entrypoint, wait interval {}s", config.wait_interval);
    let interval = Duration::from_secs(config.wait_interval);

    let password = std::env::var("IRODS_PASSWORD").ok();
    let irods_probe = IrodsProbe::new(config.irods_home.clone(), password);
    readiness::wait_until_ready(&irods_probe, interval).await;

    let db_url = resolve_db_url(config.db.db_url.as_deref(), Some(&config.db.db_config))?;
    readiness::wait_until_ready(&MySqlProbe::new(db_url.clone()), interval).await;

    dump_diagnostics(&config.irods_home, &db_url).await?;

    // A trailing command replaces this process; exec only returns on failure.
    if !config.command.is_empty() {
        tracing::info!("▶️ exec {:?}", config.command);
        return Err(command::exec(&config.command).into());
    }

    tracing::info!("📦 Running install command: {}", config.install_command);
    if let Err(e) = command::run_shell(&config.install_command).await {
        tracing::error!("❌ Install command failed: {}", e);
        std::process::exit(e.exit_code());
    }

    tracing::info!("🧪 Running test command: {}", config.test_command);
    if let Err(e) = command::run_shell(&config.test_command).await {
        tracing::error!("❌ Test command failed: {}", e);
        std::process::exit(e.exit_code());
    }

    tracing::info!("✅ Test suite passed");
    Ok(())
}

async fn dump_diagnostics(irods_home: &str, db_url: &str) -> anyhow::Result<()> {
    let env_report = irods::ienv().await?;
    println!("{}", env_report.trim_end());

    let listing = irods::ils(irods_home).await?;
    println!("{}", listing.trim_end());

    let pool = mlwh::connect(db_url).await?;
    let version = mlwh::server_version(&pool).await?;
    tracing::info!("🛢 MySQL server version {}", version);
    pool.close().await;

    HostMonitor::new().log_snapshot();

    Ok(())
}
