//! Server configuration: a base `server.toml`/`server.yaml` if present,
//! overridden by `INTENTD__`-prefixed environment variables.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Path to the intent corpus JSON document. Required at startup; a
    /// malformed or missing corpus is fatal.
    #[serde(default = "default_corpus_path")]
    pub corpus_path: String,
    /// Path to the slang/normalisation map JSON. Optional; an empty map is
    /// used if absent.
    #[serde(default)]
    pub slang_path: Option<String>,
    /// Path to the append-only golden-record stream. Omit for an ephemeral,
    /// in-memory-only Fast Memory (useful in tests).
    #[serde(default)]
    pub golden_record_path: Option<String>,
    /// Path to the append-only review-queue stream.
    #[serde(default)]
    pub review_queue_path: Option<String>,

    #[serde(default = "default_k_mem")]
    pub k_mem: usize,
    #[serde(default = "default_k_stage1")]
    pub k_stage1: usize,
    #[serde(default = "default_alpha")]
    pub alpha: f32,
    #[serde(default = "default_theta")]
    pub theta: f32,

    #[serde(default = "default_pending_ttl_secs")]
    pub pending_cache_ttl_secs: u64,
    #[serde(default = "default_pending_capacity")]
    pub pending_cache_capacity: usize,

    /// How to handle a persisted-embedder-model mismatch at startup (spec
    /// §4.7): `"fail_fast"` refuses to start, `"clear"` discards the stale
    /// golden-record stream and starts empty.
    #[serde(default = "default_model_mismatch_policy")]
    pub model_mismatch_policy: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            log_level: default_log_level(),
            corpus_path: default_corpus_path(),
            slang_path: None,
            golden_record_path: None,
            review_queue_path: None,
            k_mem: default_k_mem(),
            k_stage1: default_k_stage1(),
            alpha: default_alpha(),
            theta: default_theta(),
            pending_cache_ttl_secs: default_pending_ttl_secs(),
            pending_cache_capacity: default_pending_capacity(),
            model_mismatch_policy: default_model_mismatch_policy(),
        }
    }
}

impl ServerConfig {
    pub fn load() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();
        let builder = config::Config::builder()
            .add_source(config::File::with_name("intentd").required(false))
            .add_source(config::Environment::with_prefix("INTENTD").separator("__"));
        let config: ServerConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.bind_addr, self.port).parse()?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_max_body_size_mb() -> usize {
    2
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_corpus_path() -> String {
    "corpus.json".to_string()
}
fn default_k_mem() -> usize {
    5
}
fn default_k_stage1() -> usize {
    5
}
fn default_alpha() -> f32 {
    0.2
}
fn default_theta() -> f32 {
    0.6
}
fn default_pending_ttl_secs() -> u64 {
    3600
}
fn default_pending_capacity() -> usize {
    10_000
}
fn default_model_mismatch_policy() -> String {
    "fail_fast".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_spec_defaults() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.k_mem, 5);
        assert_eq!(cfg.k_stage1, 5);
        assert!((cfg.alpha - 0.2).abs() < 1e-6);
        assert!((cfg.theta - 0.6).abs() < 1e-6);
    }

    #[test]
    fn socket_addr_parses() {
        let cfg = ServerConfig::default();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);
    }
}
