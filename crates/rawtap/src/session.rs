use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::proxy::ProxyConfig;

/// Default read/write chunk size (16 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;

/// One capture attempt: where to read from, where to write to, and how.
///
/// A session is created per recording attempt and never reused; a retry gets
/// a fresh session from the external scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadSession {
    /// Stream URL to tap.
    pub url: String,
    /// Destination file path.
    pub save_path: PathBuf,
    /// Request headers, e.g. platform auth cookies or referers.
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    /// Proxy to reach the origin through (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,
    /// Read/write chunk size in bytes.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl DownloadSession {
    /// Create a new session with default headers and chunk size.
    pub fn new(url: impl Into<String>, save_path: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            save_path: save_path.into(),
            headers: Vec::new(),
            proxy: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Add a request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the proxy.
    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Set the chunk size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}
