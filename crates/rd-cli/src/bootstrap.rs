use std::path::Path;

use anyhow::Context;
use rd_config::RdConfig;

/// Load `.env` from the project root (if any), then the layered config.
pub fn load_config(project_root: &Path) -> anyhow::Result<RdConfig> {
    let env_path = project_root.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }

    let config: RdConfig = RdConfig::figment_for(project_root)
        .extract()
        .context("failed to read configuration")?;
    config.validate()?;
    tracing::debug!(root = %project_root.display(), db = %config.database.path, "configuration loaded");
    Ok(config)
}
