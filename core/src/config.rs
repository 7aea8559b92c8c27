//! Executor and endpoint configuration.

/// Default cap on buffered response bodies (10 MiB).
pub const DEFAULT_BODY_LIMIT: u64 = 10 * 1024 * 1024;

/// Settings for `UreqExecutor`.
///
/// Redirect following and status-as-error are not configurable: the executor
/// always returns the first response it receives, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Log every outgoing and incoming header line at `trace` level.
    pub verbose: bool,
    /// Maximum number of body bytes read from a response.
    pub body_limit: u64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ExecutorConfig {
    /// Read `ROPP_VERBOSE` and `ROPP_BODY_LIMIT`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(v) = lookup("ROPP_VERBOSE") {
            config.verbose = matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(v) = lookup("ROPP_BODY_LIMIT") {
            match v.trim().parse::<u64>() {
                Ok(limit) => config.body_limit = limit,
                Err(e) => log::warn!("ignoring ROPP_BODY_LIMIT={v:?}: {e}"),
            }
        }
        config
    }
}

/// Base URLs used by `UserClient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub friends: String,
    pub users: String,
    pub groups: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            friends: "https://friends.roblox.com".to_string(),
            users: "https://users.roblox.com".to_string(),
            groups: "https://groups.roblox.com".to_string(),
        }
    }
}

impl Endpoints {
    /// Point every service at the same host, e.g. a local mock server.
    pub fn single(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            friends: base.clone(),
            users: base.clone(),
            groups: base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        assert_eq!(ExecutorConfig::from_lookup(lookup(&[])), ExecutorConfig::default());
    }

    #[test]
    fn verbose_accepts_common_truthy_values() {
        for v in ["1", "true", "TRUE", " yes "] {
            let config = ExecutorConfig::from_lookup(lookup(&[("ROPP_VERBOSE", v)]));
            assert!(config.verbose, "{v:?} should enable verbose");
        }
        let config = ExecutorConfig::from_lookup(lookup(&[("ROPP_VERBOSE", "0")]));
        assert!(!config.verbose);
    }

    #[test]
    fn bad_body_limit_falls_back_to_default() {
        let config = ExecutorConfig::from_lookup(lookup(&[("ROPP_BODY_LIMIT", "lots")]));
        assert_eq!(config.body_limit, DEFAULT_BODY_LIMIT);

        let config = ExecutorConfig::from_lookup(lookup(&[("ROPP_BODY_LIMIT", "4096")]));
        assert_eq!(config.body_limit, 4096);
    }

    #[test]
    fn single_endpoint_strips_trailing_slash() {
        let endpoints = Endpoints::single("http://127.0.0.1:3000/");
        assert_eq!(endpoints.friends, "http://127.0.0.1:3000");
        assert_eq!(endpoints.users, "http://127.0.0.1:3000");
        assert_eq!(endpoints.groups, "http://127.0.0.1:3000");
    }
}
