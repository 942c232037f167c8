use axum::http::HeaderValue;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Immutable settings read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub solver_path: PathBuf,
    pub work_dir: PathBuf,
    pub timeout: Duration,
    pub bind_addr: SocketAddr,
    pub cors_allow_origin: Option<HeaderValue>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds and validates the config from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let solver_path =
            PathBuf::from(var("SOLVER_PATH").ok_or(ConfigError::MissingVar("SOLVER_PATH"))?);
        let work_dir = PathBuf::from(
            var("BACKEND_WORK_DIR").ok_or(ConfigError::MissingVar("BACKEND_WORK_DIR"))?,
        );

        let timeout_secs = match var("SOLVER_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    name: "SOLVER_TIMEOUT_SECS",
                    value: raw.clone(),
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let bind_raw = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidValue {
                name: "BIND_ADDR",
                value: bind_raw.clone(),
            })?;

        let cors_allow_origin = match var("CORS_ALLOW_ORIGIN") {
            Some(origin) => Some(origin.trim().parse::<HeaderValue>().map_err(|_| {
                ConfigError::InvalidValue {
                    name: "CORS_ALLOW_ORIGIN",
                    value: origin.clone(),
                }
            })?),
            None => None,
        };

        let config = Self {
            solver_path,
            work_dir,
            timeout: Duration::from_secs(timeout_secs),
            bind_addr,
            cors_allow_origin,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.solver_path.is_file() {
            return Err(ConfigError::SolverExecutableMissing(self.solver_path.clone()));
        }
        if !self.work_dir.is_dir() {
            return Err(ConfigError::WorkDirMissing(self.work_dir.clone()));
        }
        Ok(())
    }
}
