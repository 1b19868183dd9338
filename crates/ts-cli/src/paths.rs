//! OS-specific path resolution for configuration and credentials

use std::path::PathBuf;
use ts_types::{AppError, AppResult};

/// Get the configuration directory
///
/// Priority:
/// 1. Runtime override via `TUNESCOUT_ENV` environment variable: `~/.tunescout-{env}/`
/// 2. Development mode (debug builds): `~/.tunescout-dev/`
/// 3. Production mode (release builds): `~/.tunescout/`
pub fn config_dir() -> AppResult<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AppError::Config("Could not determine home directory".to_string()))?;

    // Runtime override via environment variable (for testing)
    if let Ok(env_suffix) = std::env::var("TUNESCOUT_ENV") {
        return Ok(home.join(format!(".tunescout-{}", env_suffix)));
    }

    #[cfg(debug_assertions)]
    let dir = home.join(".tunescout-dev");

    #[cfg(not(debug_assertions))]
    let dir = home.join(".tunescout");

    Ok(dir)
}

/// Get the configuration file path
pub fn config_file() -> AppResult<PathBuf> {
    Ok(config_dir()?.join("config.yaml"))
}

/// Get the credential storage file path
pub fn credentials_file() -> AppResult<PathBuf> {
    Ok(config_dir()?.join("credentials.json"))
}
