//! Database path resolution
//!
//! Priority:
//! 1. `--db <path>` flag
//! 2. `$COORDINATOR_DB`
//! 3. `[database] path` in the config file
//! 4. `coordinator.db` in the working directory

use crate::config::ToolConfig;
use std::path::{Path, PathBuf};

/// Environment variable naming the database file
pub const DB_ENV_VAR: &str = "COORDINATOR_DB";

/// Database file used when nothing else names one
pub const DEFAULT_DB_FILE: &str = "coordinator.db";

/// Resolve the database path from the flag, the environment and the config
pub fn resolve_db_path(explicit: Option<&Path>, config: &ToolConfig) -> PathBuf {
    let env = std::env::var_os(DB_ENV_VAR).map(PathBuf::from);
    resolve_with_env(explicit, env, config)
}

/// Same as [`resolve_db_path`] with the environment value passed in
pub fn resolve_with_env(explicit: Option<&Path>, env: Option<PathBuf>, config: &ToolConfig) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    // An exported but empty variable counts as unset
    if let Some(path) = env.filter(|p| !p.as_os_str().is_empty()) {
        return path;
    }

    if let Some(path) = &config.database.path {
        return path.clone();
    }

    PathBuf::from(DEFAULT_DB_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(path: &str) -> ToolConfig {
        let mut config = ToolConfig::default();
        config.database.path = Some(PathBuf::from(path));
        config
    }

    #[test]
    fn test_flag_wins() {
        let resolved = resolve_with_env(
            Some(Path::new("/flag.db")),
            Some(PathBuf::from("/env.db")),
            &config_with("/config.db"),
        );
        assert_eq!(resolved, PathBuf::from("/flag.db"));
    }

    #[test]
    fn test_env_before_config() {
        let resolved = resolve_with_env(None, Some(PathBuf::from("/env.db")), &config_with("/config.db"));
        assert_eq!(resolved, PathBuf::from("/env.db"));
    }

    #[test]
    fn test_empty_env_ignored() {
        let resolved = resolve_with_env(None, Some(PathBuf::new()), &config_with("/config.db"));
        assert_eq!(resolved, PathBuf::from("/config.db"));
    }

    #[test]
    fn test_defaults_to_working_directory_file() {
        let resolved = resolve_with_env(None, None, &ToolConfig::default());
        assert_eq!(resolved, PathBuf::from("coordinator.db"));
    }
}
