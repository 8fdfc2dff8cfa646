use std::path::{Path, PathBuf};

use crate::error::AppError;

pub const DEFAULT_SESSION_TTL_SECS: u64 = 86_400;

/// Server configuration loaded from environment variables.
///
/// Everything is optional: without a catalog or phrase table the built-in
/// English defaults are used, and without Redis sessions live in memory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection URL (e.g. "redis://127.0.0.1:6379"). `None` keeps sessions in memory.
    pub redis_url: Option<String>,
    /// JSON array of resources replacing the built-in catalog.
    pub resources_path: Option<PathBuf>,
    /// JSON phrase table replacing the built-in English keyword tiers.
    pub phrase_table_path: Option<PathBuf>,
    pub session_ttl_secs: u64,
    /// Serve MCP over TCP on this address instead of stdio.
    pub tcp_listen_addr: Option<String>,
}

impl Config {
    /// Optional:
    /// - `REDIS_URL`
    /// - `WELLNESS_RESOURCES_PATH`
    /// - `WELLNESS_PHRASE_TABLE_PATH`
    /// - `WELLNESS_SESSION_TTL_SECS` (default: 86400)
    /// - `MCP_TCP_LISTEN_ADDR`
    pub fn from_env() -> Result<Self, AppError> {
        let resources_path = existing_path("WELLNESS_RESOURCES_PATH")?;
        let phrase_table_path = existing_path("WELLNESS_PHRASE_TABLE_PATH")?;

        let session_ttl_secs = match std::env::var("WELLNESS_SESSION_TTL_SECS") {
            Ok(raw) => parse_ttl(&raw)?,
            Err(_) => DEFAULT_SESSION_TTL_SECS,
        };

        Ok(Self {
            redis_url: std::env::var("REDIS_URL").ok(),
            resources_path,
            phrase_table_path,
            session_ttl_secs,
            tcp_listen_addr: std::env::var("MCP_TCP_LISTEN_ADDR").ok(),
        })
    }
}

fn existing_path(var: &str) -> Result<Option<PathBuf>, AppError> {
    let Ok(raw) = std::env::var(var) else {
        return Ok(None);
    };
    let path = Path::new(&raw).to_path_buf();
    if !path.exists() {
        return Err(AppError::Config(format!(
            "{var} points to a missing file: {}",
            path.display()
        )));
    }
    Ok(Some(path))
}

fn parse_ttl(raw: &str) -> Result<u64, AppError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| {
            AppError::Config(format!(
                "WELLNESS_SESSION_TTL_SECS must be a positive integer, got '{raw}'"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_parsing() {
        assert_eq!(parse_ttl("3600").unwrap(), 3600);
        assert_eq!(parse_ttl(" 60 ").unwrap(), 60);
        assert!(parse_ttl("0").is_err());
        assert!(parse_ttl("soon").is_err());
    }

    #[test]
    fn missing_configured_path_is_a_config_error() {
        let var = "WELLNESS_TEST_MISSING_CATALOG";
        std::env::set_var(var, "/nonexistent/wellness/resources.json");
        let err = existing_path(var).unwrap_err();
        std::env::remove_var(var);

        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains(var));
    }

    #[test]
    fn unset_or_existing_path_is_accepted() {
        assert!(existing_path("WELLNESS_TEST_UNSET_PATH").unwrap().is_none());

        let var = "WELLNESS_TEST_EXISTING_PATH";
        let dir = std::env::temp_dir();
        std::env::set_var(var, &dir);
        let found = existing_path(var).unwrap();
        std::env::remove_var(var);

        assert_eq!(found, Some(dir));
    }
}
