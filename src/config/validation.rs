//! Configuration validation.
//!
//! Serde handles the syntactic side; this module checks that the values make
//! sense before the config is accepted. Every problem is reported, not just
//! the first one.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A bind address that is not `ip:port`.
    #[error("{field} is not a socket address: {value}")]
    InvalidAddress { field: &'static str, value: String },

    /// Upstream URL that cannot be fetched with a plain GET.
    #[error("upstream.url is invalid ({value}): {reason}")]
    InvalidUpstream { value: String, reason: String },

    /// Route path that axum cannot register as a static route.
    #[error("{field} is invalid ({value}): {reason}")]
    InvalidRoute {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    /// Unknown log level.
    #[error("observability.log_level must be one of trace, debug, info, warn, error (got {0})")]
    InvalidLogLevel(String),
}

/// Validate a configuration, collecting all errors.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(
        "listener.bind_address",
        &config.listener.bind_address,
        &mut errors,
    );
    if config.observability.metrics_enabled {
        check_address(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    if let Err(reason) = check_upstream(&config.upstream.url) {
        errors.push(ValidationError::InvalidUpstream {
            value: config.upstream.url.clone(),
            reason,
        });
    }

    let base = &config.route.base_path;
    if !base.is_empty() && !base.starts_with('/') {
        errors.push(ValidationError::InvalidRoute {
            field: "route.base_path",
            value: base.clone(),
            reason: "must be empty or start with '/'",
        });
    }
    if !config.route.path.starts_with('/') {
        errors.push(ValidationError::InvalidRoute {
            field: "route.path",
            value: config.route.path.clone(),
            reason: "must start with '/'",
        });
    }
    for (field, value) in [("route.base_path", base), ("route.path", &config.route.path)] {
        if value.contains(['{', '}']) {
            errors.push(ValidationError::InvalidRoute {
                field,
                value: value.clone(),
                reason: "captures and wildcards are not allowed",
            });
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_upstream(value: &str) -> Result<(), String> {
    let url = Url::parse(value).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme '{}'", other)),
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(validate_config(&RelayConfig::default()), Ok(()));
    }

    #[test]
    fn reports_every_problem() {
        let mut config = RelayConfig::default();
        config.listener.bind_address = "localhost".into();
        config.upstream.url = "ftp://example.com/file".into();
        config.route.path = "google".into();
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::InvalidLogLevel("loud".into())));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidAddress { field: "listener.bind_address", .. })));
    }

    #[test]
    fn upstream_must_be_absolute_http() {
        let mut config = RelayConfig::default();
        config.upstream.url = "/relative/path".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidUpstream { .. }));

        config.upstream.url = "http://127.0.0.1:9999/page".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn route_wildcards_are_rejected() {
        let mut config = RelayConfig::default();
        config.route.path = "/{*rest}".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().starts_with("route.path is invalid"));
    }

    #[test]
    fn metrics_address_checked_only_when_enabled() {
        let mut config = RelayConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
