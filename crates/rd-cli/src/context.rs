use std::path::PathBuf;

use anyhow::Context;
use rd_config::RdConfig;
use rd_db::service::RdService;

/// Everything a command needs: the open store, the config, and who is acting.
pub struct AppContext {
    pub project_root: PathBuf,
    pub config: RdConfig,
    pub service: RdService,
    pub actor: String,
}

impl AppContext {
    pub async fn init(
        project_root: PathBuf,
        config: RdConfig,
        actor: Option<&str>,
    ) -> anyhow::Result<Self> {
        let db_path = config.database_path(&project_root);
        if !config.database.is_in_memory() {
            if let Some(parent) = db_path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }

        let db_path = db_path
            .to_str()
            .context("database path is not valid UTF-8")?
            .to_string();
        let service = RdService::new_local(&db_path).await?;

        let actor = actor
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map_or_else(|| config.general.default_actor.clone(), String::from);

        Ok(Self {
            project_root,
            config,
            service,
            actor,
        })
    }
}
