use chrono::NaiveDateTime;
use clap::Parser;
use ont_metasync::adapters::{mlwh, IcommandsStore, IrodsProbe, MySqlProbe};
use ont_metasync::config::{resolve_db_url, DbArgs, SyncCli, SyncCommand};
use ont_metasync::core::{ont, readiness};
use ont_metasync::utils::{logger, validation::Validate};
use ont_metasync::{Result, SyncError};
use std::path::PathBuf;

fn parse_since(since: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(since, "%Y-%m-%dT%H:%M:%S").map_err(|e| {
        SyncError::InvalidConfigValueError {
            field: "since".to_string(),
            value: since.to_string(),
            reason: format!("Expected ISO-8601 date and time: {}", e),
        }
    })
}

fn db_url_of(db: &DbArgs) -> Result<String> {
    resolve_db_url(db.db_url.as_deref(), Some(&db.db_config))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = SyncCli::parse();

    logger::init_cli_logger(cli.verbose);

    if let Err(e) = cli.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(2);
    }

    match cli.command {
        SyncCommand::Annotate {
            db,
            path,
            experiment,
            slot,
        } => {
            let pool = mlwh::connect(&db_url_of(&db)?).await?;
            let store = IcommandsStore::new();
            let collection = PathBuf::from(&path);

            ont::annotate_results_collection(&pool, &store, &collection, &experiment, slot).await?;

            tracing::info!(
                "✅ Annotated {} for {} slot {}",
                collection.display(),
                experiment,
                slot
            );
        }

        SyncCommand::Recent {
            db,
            since,
            positions,
        } => {
            let since = parse_since(&since)?;
            let pool = mlwh::connect(&db_url_of(&db)?).await?;

            if positions {
                for (experiment, slot) in mlwh::find_recent_positions(&pool, since).await? {
                    println!("{}\t{}", experiment, slot);
                }
            } else {
                for experiment in mlwh::find_recent_experiments(&pool, since).await? {
                    println!("{}", experiment);
                }
            }
        }

        SyncCommand::Check { db, collection } => {
            let password = std::env::var("IRODS_PASSWORD").ok();
            let irods_ready =
                readiness::check_once(&IrodsProbe::new(collection, password)).await;
            let mysql_ready =
                readiness::check_once(&MySqlProbe::new(db_url_of(&db)?)).await;

            if !(irods_ready && mysql_ready) {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
