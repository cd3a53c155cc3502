//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;

use tracing::warn;

use crate::cache::DEFAULT_EVICTION_BACKLOG;
use crate::error::{CacheError, Result};

/// Environment variable holding the entry limit
pub const LIMIT_VAR: &str = "LRU_CACHE_LIMIT";
/// Environment variable holding the eviction channel capacity
pub const BACKLOG_VAR: &str = "LRU_EVICTION_BACKLOG";

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries, 0 = unbounded
    pub limit: usize,
    /// Capacity of the eviction channel once it is requested
    pub eviction_backlog: usize,
}

impl CacheConfig {
    /// Creates a config with the given limit and the default backlog.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// Missing variables use defaults. Unparseable values are logged and
    /// replaced by defaults as well; use [`CacheConfig::try_from_env`] to
    /// reject them instead.
    ///
    /// # Environment Variables
    /// - `LRU_CACHE_LIMIT` - Maximum entries, 0 or negative = unbounded (default: 0)
    /// - `LRU_EVICTION_BACKLOG` - Eviction channel capacity (default: 64)
    pub fn from_env() -> Self {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Strict variant of [`CacheConfig::from_env`].
    pub fn try_from_env() -> Result<Self> {
        Self::try_from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let limit = match lookup(LIMIT_VAR).map(|raw| parse_limit(&raw)) {
            Some(Ok(limit)) => limit,
            Some(Err(err)) => {
                warn!("{}, using unbounded limit", err);
                defaults.limit
            }
            None => defaults.limit,
        };
        let eviction_backlog = match lookup(BACKLOG_VAR).map(|raw| parse_backlog(&raw)) {
            Some(Ok(backlog)) => backlog,
            Some(Err(err)) => {
                warn!("{}, using backlog of {}", err, defaults.eviction_backlog);
                defaults.eviction_backlog
            }
            None => defaults.eviction_backlog,
        };

        Self {
            limit,
            eviction_backlog,
        }
    }

    fn try_from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let limit = lookup(LIMIT_VAR)
            .map(|raw| parse_limit(&raw))
            .transpose()?
            .unwrap_or(defaults.limit);
        let eviction_backlog = lookup(BACKLOG_VAR)
            .map(|raw| parse_backlog(&raw))
            .transpose()?
            .unwrap_or(defaults.eviction_backlog);

        Ok(Self {
            limit,
            eviction_backlog,
        })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            limit: 0,
            eviction_backlog: DEFAULT_EVICTION_BACKLOG,
        }
    }
}

// Negative limits are accepted and mean "unbounded".
fn parse_limit(raw: &str) -> Result<usize> {
    let value: i64 = raw.trim().parse().map_err(|_| invalid(LIMIT_VAR, raw))?;
    if value <= 0 {
        return Ok(0);
    }
    usize::try_from(value).map_err(|_| invalid(LIMIT_VAR, raw))
}

fn parse_backlog(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(backlog) if backlog > 0 => Ok(backlog),
        _ => Err(invalid(BACKLOG_VAR, raw)),
    }
}

fn invalid(var: &str, raw: &str) -> CacheError {
    CacheError::InvalidConfig {
        var: var.to_string(),
        value: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.limit, 0);
        assert_eq!(config.eviction_backlog, 64);
    }

    #[test]
    fn test_config_from_env_defaults() {
        env::remove_var(LIMIT_VAR);
        env::remove_var(BACKLOG_VAR);

        let config = CacheConfig::from_env();
        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn test_config_reads_values() {
        let config = CacheConfig::from_lookup(lookup_from(&[
            (LIMIT_VAR, "500"),
            (BACKLOG_VAR, "8"),
        ]));
        assert_eq!(config.limit, 500);
        assert_eq!(config.eviction_backlog, 8);
    }

    #[test]
    fn test_negative_limit_is_unbounded() {
        let config = CacheConfig::try_from_lookup(lookup_from(&[(LIMIT_VAR, "-3")])).unwrap();
        assert_eq!(config.limit, 0);
    }

    #[test]
    fn test_lenient_falls_back_on_garbage() {
        let config = CacheConfig::from_lookup(lookup_from(&[
            (LIMIT_VAR, "many"),
            (BACKLOG_VAR, "0"),
        ]));
        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn test_strict_rejects_garbage() {
        let err = CacheConfig::try_from_lookup(lookup_from(&[(LIMIT_VAR, "many")])).unwrap_err();
        assert_eq!(
            err,
            CacheError::InvalidConfig {
                var: LIMIT_VAR.to_string(),
                value: "many".to_string(),
            }
        );

        let err = CacheConfig::try_from_lookup(lookup_from(&[(BACKLOG_VAR, "0")])).unwrap_err();
        assert!(matches!(err, CacheError::InvalidConfig { ref var, .. } if var == BACKLOG_VAR));
    }
}
