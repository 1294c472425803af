use crate::error::{Error, Result};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Command-line flags shared by every service binary.
///
/// Each flag falls back to its environment variable and then to the built-in
/// default, so `PORT=8080 my-service` and `my-service --port 8080` are equivalent.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct ServiceArgs {
    /// Interface the HTTP listener binds to.
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// TCP port the HTTP listener binds to.
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory holding `error.log` and `combined.log`.
    #[arg(long, env = "LOG_DIR", default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,

    /// Minimum level (or `EnvFilter` directive) for emitted events.
    #[arg(long, env = "LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

/// Resolved runtime configuration of a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub service_name: String,
    pub host: String,
    pub port: u16,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl ServiceConfig {
    /// Built-in defaults, ignoring the environment.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    /// Loads `.env` (if present), then parses the process arguments.
    ///
    /// `--help`, `--version` and malformed flags terminate the process with
    /// clap's usual output.
    pub fn load(service_name: impl Into<String>) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_args(service_name, ServiceArgs::parse())
    }

    /// Parses an explicit argument vector; the first item is the binary name.
    pub fn try_from_args<I, T>(service_name: impl Into<String>, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = ServiceArgs::try_parse_from(args)?;
        Self::from_args(service_name, args)
    }

    pub fn from_args(service_name: impl Into<String>, args: ServiceArgs) -> Result<Self> {
        let host = args.host.trim().to_string();
        if host.is_empty() {
            return Err(Error::Config("host must not be empty".to_string()));
        }
        if let Err(e) = EnvFilter::try_new(&args.log_level) {
            return Err(Error::Config(format!(
                "invalid log level '{}': {}",
                args.log_level, e
            )));
        }

        Ok(Self {
            service_name: service_name.into(),
            host,
            port: args.port,
            log_dir: args.log_dir,
            log_level: args.log_level,
        })
    }

    /// `host:port`, as handed to the TCP listener.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
