//! Configuration loading from disk and environment.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use crate::config::schema::{ServiceConfig, ServiceProfile};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides the listener port.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, value } => {
                write!(f, "Invalid value for {}: {:?}", var, value)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse a TOML document into a configuration without validating it.
pub fn parse_config(content: &str) -> Result<ServiceConfig, ConfigError> {
    toml::from_str(content).map_err(ConfigError::Parse)
}

/// Read a TOML file into a configuration without validating it.
pub fn read_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content)
}

/// Load configuration from an optional file, apply the `PORT` and profile
/// overrides, then validate.
pub fn load_config(
    path: Option<&Path>,
    profile: Option<ServiceProfile>,
) -> Result<ServiceConfig, ConfigError> {
    let config = match path {
        Some(path) => read_config(path)?,
        None => ServiceConfig::default(),
    };

    let port = std::env::var(PORT_ENV).ok();
    resolve_config(config, port.as_deref(), profile)
}

/// Apply overrides to a parsed configuration and validate the result.
///
/// Validation runs last: the profile decides which limiter settings must hold.
pub fn resolve_config(
    mut config: ServiceConfig,
    port: Option<&str>,
    profile: Option<ServiceProfile>,
) -> Result<ServiceConfig, ConfigError> {
    apply_port_override(&mut config, port)?;
    if let Some(profile) = profile {
        config.profile = profile;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Replace the listener port with `port`, keeping the bind host.
pub fn apply_port_override(config: &mut ServiceConfig, port: Option<&str>) -> Result<(), ConfigError> {
    let Some(raw) = port.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(());
    };

    let env_error = || ConfigError::Env {
        var: PORT_ENV,
        value: raw.to_string(),
    };

    let port: u16 = raw.parse().map_err(|_| env_error())?;
    let mut addr: SocketAddr = config
        .listener
        .bind_address
        .parse()
        .map_err(|_| env_error())?;
    addr.set_port(port);
    config.listener.bind_address = addr.to_string();

    Ok(())
}
