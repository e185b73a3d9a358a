//! Checks that the configured database is reachable and the profile table exists.

use anyhow::Context;
use profile_intake::infra::telemetry;
use profile_intake::storage::postgres::PROFILE_TABLE;
use profile_intake::{Config, PostgresProfileStore, ProfileStore, StoreBackend};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--create-table-if-missing]\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL\n\
         Optional:\n\
           DB_MAX_CONNECTIONS, RUST_LOG\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let create_if_missing = args.iter().any(|a| a == "--create-table-if-missing");

    let config = Config::from_env()?;
    telemetry::init_tracing()?;

    if config.store_backend == StoreBackend::Memory {
        tracing::info!("STORE_BACKEND=memory; nothing to check");
        return Ok(());
    }

    let store = PostgresProfileStore::connect(config.database_url()?, config.db_max_connections)
        .await
        .context("database is not reachable")?;
    store.ping().await.context("database ping failed")?;
    tracing::info!("database reachable");

    if store.table_exists().await? {
        tracing::info!(table = PROFILE_TABLE, "profile table exists");
    } else if create_if_missing {
        tracing::info!(table = PROFILE_TABLE, "profile table missing, creating it");
        store.ensure_schema().await?;
        if !store.table_exists().await? {
            return Err(anyhow::anyhow!("{PROFILE_TABLE} still missing after create"));
        }
        tracing::info!(table = PROFILE_TABLE, "profile table created");
    } else {
        return Err(anyhow::anyhow!(
            "{PROFILE_TABLE} does not exist. Re-run with --create-table-if-missing"
        ));
    }

    tracing::info!("preflight OK");
    Ok(())
}
