//! intentd — HTTP façade for the deterministic intent-resolution engine.
//!
//! Exposes the engine (`intent-resolver`) and its reinforcement loop
//! (`intent-feedback`) over HTTP: one `ServerState` built once at startup,
//! one router, one middleware stack, one error type every handler converges
//! on.
//!
//! # API Endpoints
//!
//! - `GET /` - service info
//! - `GET /health` - liveness probe
//! - `GET /ready` - readiness probe (503 until corpus load + memory replay finish)
//! - `POST /resolve-intent` - resolve a command against a context snapshot
//! - `POST /feedback` - submit positive/negative feedback for a prior resolution
//! - `GET /feedback/stats` - current `LearningStats`
//! - `GET /feedback/review-queue` - pending human-review items
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use intent_server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     intent_server::start_server(config).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::start_server;
pub use state::ServerState;
