//! API server entry point.

use anyhow::Context;
use log::info;
use sitegen_api::{server, ServerConfig, ENV_FILE};
use sitegen_core::{init_logging, SqliteProjectStore};
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, env_file) = match ServerConfig::from_env_file(Path::new(ENV_FILE)) {
        Ok(config) => (config, "loaded"),
        Err(err) if err.not_found() => (ServerConfig::from_env(), "absent"),
        Err(err) => return Err(err).with_context(|| format!("failed to read {ENV_FILE}")),
    };
    init_logging(&config.log_level, config.log_dir.as_deref())
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")?;
    info!("event=config_load module=main status=ok env_file={env_file}");

    info!(
        "event=store_open module=main status=start db_path={}",
        config.db_path.display()
    );
    let store = SqliteProjectStore::open(&config.db_path).with_context(|| {
        format!(
            "failed to open project store at {}",
            config.db_path.display()
        )
    })?;

    server::serve(&config, Arc::new(store)).await?;
    Ok(())
}
