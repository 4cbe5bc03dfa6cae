use anyhow::{Context, Result};
use studyflow_store::SqliteBackend;
use studyflow_types::Tier;

use crate::args::Cli;
use crate::config::{resolve_data_dir, Config};
use crate::types::OutputFormat;

/// Resolved per-invocation context: who is calling, with which tier,
/// against which backend, and how to render results.
pub struct CliContext {
    pub user_id: String,
    pub tier: Tier,
    pub format: OutputFormat,
    pub backend: SqliteBackend,
}

impl CliContext {
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let config = Config::load_from(&data_dir.join("config.toml"))?;
        let user_id = cli.user.clone().unwrap_or(config.user);
        let tier = if cli.premium || config.premium {
            Tier::Premium
        } else {
            Tier::Free
        };

        let backend = SqliteBackend::open(&data_dir.join("studyflow.db"))
            .with_context(|| format!("Failed to open database in {}", data_dir.display()))?;

        Ok(Self {
            user_id,
            tier,
            format: cli.format,
            backend,
        })
    }
}
