use reqwest::StatusCode;

/// Result alias for tap operations.
pub type Result<T> = std::result::Result<T, TapError>;

#[derive(Debug, thiserror::Error)]
pub enum TapError {
    #[error("download cancelled")]
    Cancelled,

    #[error("invalid URL `{input}`: {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("proxy configuration error: {reason}")]
    ProxyConfiguration { reason: String },

    #[error("configuration error: {reason}")]
    Configuration { reason: String },

    #[error("request failed with HTTP {status} for {url}")]
    HttpStatus { status: StatusCode, url: String },

    #[error("HTTP transport failed: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("internal error: {reason}")]
    Internal { reason: String },
}

impl TapError {
    pub fn invalid_url(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn proxy_configuration(reason: impl Into<String>) -> Self {
        Self::ProxyConfiguration {
            reason: reason.into(),
        }
    }

    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    pub fn http_status(status: StatusCode, url: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            url: url.into(),
        }
    }

    /// Whether the external scheduler may reasonably retry the session.
    ///
    /// The tap itself never retries; this only classifies the failure for the
    /// caller's retry policy.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Cancelled => false,
            Self::InvalidUrl { .. } | Self::ProxyConfiguration { .. } | Self::Configuration { .. } => false,
            Self::HttpStatus { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            Self::Network { .. } | Self::Io { .. } | Self::Internal { .. } => true,
        }
    }

    /// A clean, caller-initiated stop rather than a failure.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_is_not_retryable() {
        assert!(!TapError::Cancelled.is_retryable());
        assert!(TapError::Cancelled.is_cancellation());
    }

    #[test]
    fn test_status_retryability() {
        assert!(TapError::http_status(StatusCode::INTERNAL_SERVER_ERROR, "u").is_retryable());
        assert!(TapError::http_status(StatusCode::TOO_MANY_REQUESTS, "u").is_retryable());
        assert!(!TapError::http_status(StatusCode::FORBIDDEN, "u").is_retryable());
        assert!(!TapError::http_status(StatusCode::NOT_FOUND, "u").is_retryable());
    }

    #[test]
    fn test_config_errors_are_terminal() {
        assert!(!TapError::invalid_url("not a url", "parse failed").is_retryable());
        assert!(!TapError::proxy_configuration("bad scheme").is_retryable());
    }
}
