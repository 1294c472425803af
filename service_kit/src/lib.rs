//! # Service Kit - A Foundational Toolkit for Small Rust Microservices
//!
//! `service_kit` bundles the pieces every HTTP service in this workspace needs
//! before it can answer its first request, so that the service crates only
//! contain their own routes and domain logic.
//!
//! ## Core Features:
//!
//! - **`config`**: `ServiceConfig`, resolved from defaults, an optional `.env`
//!   file, environment variables (`HOST`, `PORT`, `LOG_DIR`, `LOG_LEVEL`) and
//!   command-line flags.
//!
//! - **`logging`**: a `tracing` subscriber writing human-readable lines to the
//!   console and JSON lines to `error.log` / `combined.log`.
//!
//! - **`bootstrap`**: CORS defaults, Swagger UI mounting and the `serve` loop
//!   with graceful shutdown.
//!

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod logging;

pub use bootstrap::{default_cors_layer, serve, swagger_router};
pub use config::{ServiceArgs, ServiceConfig};
pub use error::{Error, Result};
pub use logging::{init_logging, LogGuard};
