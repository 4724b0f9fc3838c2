//! Configuration validation.
//!
//! Semantic checks that serde cannot express: address and URL syntax,
//! prefix shape, value ranges. Pure function, returns all errors rather
//! than stopping at the first.

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid bind address `{0}`")]
    InvalidBindAddress(String),

    #[error("invalid upstream origin `{origin}`: {reason}")]
    InvalidOrigin { origin: String, reason: String },

    #[error("public prefix `{0}` must start and end with '/'")]
    InvalidPublicPrefix(String),

    #[error("request timeout must be greater than zero")]
    ZeroRequestTimeout,

    #[error("invalid metrics address `{0}`")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    match Url::parse(&config.upstream.origin) {
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(ValidationError::InvalidOrigin {
                origin: config.upstream.origin.clone(),
                reason: format!("unsupported scheme `{}`", url.scheme()),
            });
        }
        Ok(_) => {}
        Err(e) => {
            errors.push(ValidationError::InvalidOrigin {
                origin: config.upstream.origin.clone(),
                reason: e.to_string(),
            });
        }
    }

    let prefix = &config.upstream.public_prefix;
    if !prefix.starts_with('/') || !prefix.ends_with('/') {
        errors.push(ValidationError::InvalidPublicPrefix(prefix.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
