//! Mock connector and connection shared by the unit tests

use std::any::Any;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use doclink_core::{Connection, Connector, DoclinkError, PoolOptions, Result};
use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::subscriber::DefaultGuard;

/// Mock connection that records whether it was closed
pub(crate) struct MockConnection {
    uri: String,
    closed: AtomicBool,
    fail_close: bool,
}

#[async_trait]
impl Connection for MockConnection {
    fn uri(&self) -> &str {
        &self.uri
    }

    async fn close(&self) -> Result<()> {
        if self.fail_close {
            return Err(DoclinkError::Close(format!("{} refused to close", self.uri)));
        }
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Mock connector with scripted per-URI failures.
///
/// URIs without a script always succeed.
#[derive(Default)]
pub(crate) struct MockConnector {
    /// Remaining failures per URI (`usize::MAX` = never succeeds)
    failures: Mutex<HashMap<String, usize>>,
    /// URIs whose handles fail to close
    failing_close: Mutex<Vec<String>>,
    /// Every open call, in order, with the virtual time it happened
    attempts: Mutex<Vec<(String, Instant)>>,
    /// Options passed to the most recent open call
    last_options: Mutex<Option<PoolOptions>>,
    /// Every handle handed out
    opened: Mutex<Vec<Arc<MockConnection>>>,
    close_calls: AtomicUsize,
}

impl MockConnector {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fail the next `times` opens of `uri`, then succeed
    pub(crate) fn fail_times(&self, uri: &str, times: usize) {
        self.failures.lock().insert(uri.to_string(), times);
    }

    pub(crate) fn always_fail(&self, uri: &str) {
        self.fail_times(uri, usize::MAX);
    }

    pub(crate) fn fail_close(&self, uri: &str) {
        self.failing_close.lock().push(uri.to_string());
    }

    pub(crate) fn attempt_count(&self) -> usize {
        self.attempts.lock().len()
    }

    pub(crate) fn attempt_uris(&self) -> Vec<String> {
        self.attempts.lock().iter().map(|(uri, _)| uri.clone()).collect()
    }

    pub(crate) fn attempt_times(&self) -> Vec<Instant> {
        self.attempts.lock().iter().map(|(_, at)| *at).collect()
    }

    pub(crate) fn last_options(&self) -> Option<PoolOptions> {
        self.last_options.lock().clone()
    }

    pub(crate) fn opened(&self) -> Vec<Arc<MockConnection>> {
        self.opened.lock().clone()
    }

    pub(crate) fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn open(&self, uri: &str, options: &PoolOptions) -> Result<Arc<dyn Connection>> {
        let attempt = {
            let mut attempts = self.attempts.lock();
            attempts.push((uri.to_string(), Instant::now()));
            attempts.iter().filter(|(u, _)| u == uri).count()
        };
        *self.last_options.lock() = Some(options.clone());

        {
            let mut failures = self.failures.lock();
            if let Some(remaining) = failures.get_mut(uri)
                && *remaining > 0
            {
                if *remaining != usize::MAX {
                    *remaining -= 1;
                }
                return Err(DoclinkError::Connection(format!(
                    "attempt {attempt} to {uri} refused"
                )));
            }
        }

        let connection = Arc::new(MockConnection {
            uri: uri.to_string(),
            closed: AtomicBool::new(false),
            fail_close: self.failing_close.lock().iter().any(|u| u == uri),
        });
        self.opened.lock().push(connection.clone());
        Ok(connection)
    }

    async fn close(&self, handle: &dyn Connection) -> Result<()> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        handle.close().await
    }
}

/// Assert that a measured wait matches the expected one, allowing for the
/// timer's millisecond rounding.
#[track_caller]
pub(crate) fn assert_waited(actual: std::time::Duration, expected: std::time::Duration) {
    let tolerance = std::time::Duration::from_millis(5);
    assert!(
        actual >= expected && actual <= expected + tolerance,
        "waited {actual:?}, expected {expected:?}"
    );
}

/// Log events captured as formatted text for the current thread.
///
/// Events are written without ANSI codes, one per line, at `debug` and above.
#[derive(Clone, Default)]
pub(crate) struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Route this thread's events into a new capture until the guard drops
    pub(crate) fn install() -> (Self, DefaultGuard) {
        let capture = Self::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.buffer.lock())
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub(crate) fn line_containing(&self, needle: &str) -> Option<String> {
        self.lines().into_iter().find(|line| line.contains(needle))
    }

    pub(crate) fn count_containing(&self, needle: &str) -> usize {
        self.lines()
            .iter()
            .filter(|line| line.contains(needle))
            .count()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
