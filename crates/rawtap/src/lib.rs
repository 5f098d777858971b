//! # rawtap
//!
//! Raw HTTP stream-to-disk tap engine.
//!
//! Live platforms occasionally serve containers the external transcoder
//! cannot ingest cleanly; this crate taps such streams with a single
//! streaming GET and appends the bytes to disk as they arrive. One
//! [`DownloadSession`] per recording attempt, cooperatively cancellable
//! through its [`TapHandle`]; retries are the scheduler's business, never
//! this crate's.

mod client;
mod error;
mod proxy;
mod session;
mod writer;

pub use client::DEFAULT_USER_AGENT;
pub use error::{Result, TapError};
pub use proxy::{ProxyAuth, ProxyConfig, ProxyType, build_proxy};
pub use session::{DEFAULT_CHUNK_SIZE, DownloadSession};
pub use writer::{DEFAULT_DRAIN_TIMEOUT, StopOutcome, StreamWriter, TapHandle, TapSummary};
