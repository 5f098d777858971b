use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use parking_lot::Mutex;
use reqwest::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::task::JoinHandle;
use tokio_util::io::StreamReader;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::client::create_client;
use crate::error::{Result, TapError};
use crate::session::DownloadSession;

/// Default wait for the write loop to drain on stop.
pub const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// What a finished session wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapSummary {
    pub bytes_written: u64,
}

/// Result of draining a session through [`TapHandle::stop`].
#[derive(Debug)]
pub enum StopOutcome {
    /// The write loop exited cleanly (stop, end of stream, or already done).
    Stopped(TapSummary),
    /// The write loop failed with a transport or filesystem error.
    Failed(TapError),
    /// The loop did not exit within the drain timeout and was abandoned.
    DrainTimeout,
}

/// Raw HTTP stream-to-disk writer.
///
/// Used for sources the external transcoder cannot ingest cleanly: one
/// streaming GET, bytes appended to the destination file as they arrive.
pub struct StreamWriter;

impl StreamWriter {
    /// Spawn the session's read/write loop and return its handle.
    ///
    /// Must be called from within a tokio runtime. The returned handle is the
    /// only way to observe or stop the session.
    pub fn start(session: DownloadSession) -> TapHandle {
        let token = CancellationToken::new();
        let bytes_written = Arc::new(AtomicU64::new(0));
        let url = session.url.clone();
        let save_path = session.save_path.clone();

        let task = tokio::spawn(run_session(session, token.clone(), bytes_written.clone()));

        TapHandle {
            url,
            save_path,
            started_at: Utc::now(),
            token,
            bytes_written,
            task: Mutex::new(Some(task)),
        }
    }
}

/// Handle to an active tap session.
pub struct TapHandle {
    url: String,
    save_path: PathBuf,
    started_at: DateTime<Utc>,
    token: CancellationToken,
    bytes_written: Arc<AtomicU64>,
    task: Mutex<Option<JoinHandle<Result<TapSummary>>>>,
}

impl TapHandle {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Total bytes written to disk so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }

    /// Request a stop without waiting for the loop to drain.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Whether the session's loop has already exited.
    pub fn is_finished(&self) -> bool {
        self.task.lock().as_ref().map(|t| t.is_finished()).unwrap_or(true)
    }

    /// Stop the session and wait up to `drain_timeout` for the loop to exit.
    ///
    /// Idempotent: a second call observes the already-set flag and returns
    /// the current byte count without waiting again.
    pub async fn stop(&self, drain_timeout: Duration) -> StopOutcome {
        self.token.cancel();

        let task = self.task.lock().take();
        let Some(task) = task else {
            return StopOutcome::Stopped(TapSummary {
                bytes_written: self.bytes_written(),
            });
        };

        match tokio::time::timeout(drain_timeout, task).await {
            Ok(Ok(Ok(summary))) => StopOutcome::Stopped(summary),
            Ok(Ok(Err(err))) => StopOutcome::Failed(err),
            Ok(Err(join_err)) => StopOutcome::Failed(TapError::Internal {
                reason: format!("session task died: {join_err}"),
            }),
            Err(_) => {
                warn!(url = %self.url, "stop drain timeout exceeded, abandoning session task");
                StopOutcome::DrainTimeout
            }
        }
    }
}

async fn run_session(
    session: DownloadSession,
    token: CancellationToken,
    bytes_written: Arc<AtomicU64>,
) -> Result<TapSummary> {
    if let Some(parent) = session.save_path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    let client = create_client(&session)?;
    let url: reqwest::Url = session
        .url
        .parse()
        .map_err(|e: url::ParseError| TapError::invalid_url(&session.url, e.to_string()))?;

    debug!(url = %url, path = %session.save_path.display(), "starting stream tap");

    let response = tokio::select! {
        _ = token.cancelled() => {
            info!(url = %url, "tap cancelled before the stream opened");
            return Ok(TapSummary { bytes_written: 0 });
        }
        resp = client.get(url.clone()).send() => resp?,
    };

    let status = response.status();
    if status != StatusCode::OK {
        error!(url = %url, status = %status, "stream request rejected");
        return Err(TapError::http_status(status, session.url.clone()));
    }

    // The destination is only created once the origin accepted the request,
    // so a rejected request leaves nothing on disk.
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&session.save_path)
        .await?;

    let stream = response.bytes_stream().map_err(std::io::Error::other);
    let mut reader = StreamReader::new(stream);
    let mut buf = vec![0u8; session.chunk_size.max(1)];

    info!(url = %url, chunk_size = session.chunk_size, "stream tap started");

    loop {
        let read = tokio::select! {
            _ = token.cancelled() => {
                debug!(url = %url, "tap cancelled mid-stream");
                break;
            }
            read = reader.read(&mut buf) => read,
        };

        let n = match read {
            Ok(0) => {
                debug!(url = %url, "end of stream");
                break;
            }
            Ok(n) => n,
            Err(err) => {
                let _ = file.flush().await;
                return Err(classify_read_error(err));
            }
        };

        // Flag is checked before the write: the in-flight chunk still lands
        // whole, then the loop exits.
        let stop_requested = token.is_cancelled();
        file.write_all(&buf[..n]).await?;
        bytes_written.fetch_add(n as u64, Ordering::Relaxed);
        if stop_requested {
            debug!(url = %url, "stop requested, wrote in-flight chunk");
            break;
        }
    }

    file.flush().await?;
    let total = bytes_written.load(Ordering::Relaxed);
    info!(url = %url, bytes = total, path = %session.save_path.display(), "stream tap finished");
    Ok(TapSummary { bytes_written: total })
}

/// Split stream-reader failures back into transport vs. local I/O.
fn classify_read_error(err: std::io::Error) -> TapError {
    match err.downcast::<reqwest::Error>() {
        Ok(transport) => TapError::Network { source: transport },
        Err(err) => TapError::Io { source: err },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_plain_io_error() {
        let err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "connection reset");
        assert!(matches!(classify_read_error(err), TapError::Io { .. }));
    }

    #[test]
    fn test_tap_summary_equality() {
        let a = TapSummary { bytes_written: 42 };
        let b = TapSummary { bytes_written: 42 };
        assert_eq!(a, b);
    }
}
