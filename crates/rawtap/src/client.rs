use std::time::Duration;

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{Result, TapError};
use crate::proxy::build_proxy;
use crate::session::DownloadSession;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/142.0.0.0 Safari/537.36";

/// Time allowed to establish the initial connection. The stream itself has no
/// overall timeout: live sources stay open for hours.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

const MAX_REDIRECTS: usize = 10;

/// Build the streaming HTTP client for one session.
pub(crate) fn create_client(session: &DownloadSession) -> Result<Client> {
    let mut headers = HeaderMap::new();
    for (name, value) in &session.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| TapError::configuration(format!("invalid header name `{name}`: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| TapError::configuration(format!("invalid header value for `{name:?}`: {e}")))?;
        headers.insert(name, value);
    }

    let mut builder = Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .connect_timeout(CONNECT_TIMEOUT);

    if let Some(proxy) = &session.proxy {
        builder = builder.proxy(build_proxy(proxy)?);
    }

    builder.build().map_err(TapError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_with_headers() {
        let session = DownloadSession::new("https://example.com/live.flv", "/tmp/live.flv")
            .with_header("Referer", "https://example.com/")
            .with_header("X-Token", "abc123");
        assert!(create_client(&session).is_ok());
    }

    #[test]
    fn test_invalid_header_name_rejected() {
        let session = DownloadSession::new("https://example.com/live.flv", "/tmp/live.flv")
            .with_header("bad header", "value");
        let err = create_client(&session).unwrap_err();
        assert!(matches!(err, TapError::Configuration { .. }));
    }
}
