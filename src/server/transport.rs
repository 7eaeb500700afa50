//! Stdio transport that answers every accepted request before reporting end of input.
//!
//! The protocol service shuts down as soon as its reader hits EOF, dropping calls
//! that are still running. [`DrainingReader`] watches request ids going in and
//! [`CountingWriter`] watches response ids going out; EOF is held back until the
//! two agree or the drain limit expires.

use serde_json::Value;
use std::collections::HashSet;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{ready, Context, Poll};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::sync::Notify;

const CANCELLED: &str = "notifications/cancelled";

/// Request ids that have been read but not yet answered
#[derive(Debug, Default)]
pub struct CallLedger {
    open: Mutex<HashSet<String>>,
    idle: Notify,
}

impl CallLedger {
    fn open_calls(&self) -> MutexGuard<'_, HashSet<String>> {
        self.open.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_idle(&self) -> bool {
        self.open_calls().is_empty()
    }

    pub fn pending(&self) -> usize {
        self.open_calls().len()
    }

    /// Record one line read from the client
    pub fn observe_inbound(&self, line: &[u8]) {
        let Ok(message) = serde_json::from_slice::<Value>(line) else {
            return;
        };

        match message.get("method").and_then(Value::as_str) {
            Some(CANCELLED) => {
                if let Some(id) = message.pointer("/params/requestId") {
                    self.close(id);
                }
            }
            Some(_) => match message.get("id") {
                Some(id) if !id.is_null() => {
                    self.open_calls().insert(id.to_string());
                }
                _ => {}
            },
            None => {}
        }
    }

    /// Record one line written to the client
    pub fn observe_outbound(&self, line: &[u8]) {
        let Ok(message) = serde_json::from_slice::<Value>(line) else {
            return;
        };
        if message.get("method").is_none() {
            if let Some(id) = message.get("id") {
                self.close(id);
            }
        }
    }

    fn close(&self, id: &Value) {
        let mut open = self.open_calls();
        open.remove(&id.to_string());
        if open.is_empty() {
            self.idle.notify_waiters();
        }
    }

    pub async fn wait_idle(&self) {
        loop {
            let notified = self.idle.notified();
            if self.is_idle() {
                return;
            }
            notified.await;
        }
    }
}

#[derive(Debug, Default)]
struct LineSplitter {
    partial: Vec<u8>,
}

impl LineSplitter {
    fn push(&mut self, bytes: &[u8], mut on_line: impl FnMut(&[u8])) {
        for chunk in bytes.split_inclusive(|b| *b == b'\n') {
            self.partial.extend_from_slice(chunk);
            if chunk.ends_with(b"\n") {
                on_line(&self.partial);
                self.partial.clear();
            }
        }
    }
}

type Drain = Pin<Box<dyn Future<Output = ()> + Send>>;

pub struct DrainingReader<R> {
    inner: R,
    ledger: Arc<CallLedger>,
    lines: LineSplitter,
    limit: Duration,
    draining: Option<Drain>,
}

impl<R> DrainingReader<R> {
    pub fn new(inner: R, ledger: Arc<CallLedger>, limit: Duration) -> Self {
        Self {
            inner,
            ledger,
            lines: LineSplitter::default(),
            limit,
            draining: None,
        }
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for DrainingReader<R> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();

        loop {
            if let Some(drain) = this.draining.as_mut() {
                ready!(drain.as_mut().poll(cx));
                this.draining = None;
                return Poll::Ready(Ok(()));
            }

            let before = buf.filled().len();
            ready!(Pin::new(&mut this.inner).poll_read(cx, buf))?;
            let fresh = &buf.filled()[before..];

            if !fresh.is_empty() {
                let ledger = &this.ledger;
                this.lines.push(fresh, |line| ledger.observe_inbound(line));
                return Poll::Ready(Ok(()));
            }
            if buf.remaining() == 0 || this.ledger.is_idle() {
                return Poll::Ready(Ok(()));
            }

            log::info!(
                "Input closed, waiting for {} in-flight calls",
                this.ledger.pending()
            );
            let ledger = Arc::clone(&this.ledger);
            let limit = this.limit;
            this.draining = Some(Box::pin(async move {
                if tokio::time::timeout(limit, ledger.wait_idle()).await.is_err() {
                    log::warn!("Gave up on {} unanswered calls", ledger.pending());
                }
            }));
        }
    }
}

pub struct CountingWriter<W> {
    inner: W,
    ledger: Arc<CallLedger>,
    lines: LineSplitter,
}

impl<W> CountingWriter<W> {
    pub fn new(inner: W, ledger: Arc<CallLedger>) -> Self {
        Self {
            inner,
            ledger,
            lines: LineSplitter::default(),
        }
    }
}

impl<W: AsyncWrite + Unpin> AsyncWrite for CountingWriter<W> {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        let written = ready!(Pin::new(&mut this.inner).poll_write(cx, buf))?;
        let ledger = &this.ledger;
        this.lines
            .push(&buf[..written], |line| ledger.observe_outbound(line));
        Poll::Ready(Ok(written))
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_shutdown(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    const CALL: &[u8] = b"{\"jsonrpc\":\"2.0\",\"id\":7,\"method\":\"tools/call\"}\n";
    const REPLY: &[u8] = b"{\"jsonrpc\":\"2.0\",\"id\":7,\"result\":{}}\n";
    const CANCEL: &[u8] =
        br#"{"jsonrpc":"2.0","method":"notifications/cancelled","params":{"requestId":7}}"#;

    #[test]
    fn test_ledger_tracks_requests_not_notifications() {
        let ledger = CallLedger::default();
        ledger.observe_inbound(br#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#);
        assert!(ledger.is_idle());

        ledger.observe_inbound(CALL);
        ledger.observe_inbound(br#"{"jsonrpc":"2.0","id":"a","method":"ping"}"#);
        assert_eq!(ledger.pending(), 2);

        ledger.observe_outbound(REPLY);
        assert_eq!(ledger.pending(), 1);
    }

    #[test]
    fn test_ledger_cancellation_closes_call() {
        let ledger = CallLedger::default();
        ledger.observe_inbound(CALL);
        ledger.observe_inbound(CANCEL);
        assert!(ledger.is_idle());
    }

    #[test]
    fn test_ledger_ignores_garbage_and_server_notifications() {
        let ledger = CallLedger::default();
        ledger.observe_inbound(b"not json");
        ledger.observe_inbound(CALL);
        ledger.observe_outbound(br#"{"jsonrpc":"2.0","id":7,"method":"sampling"}"#);
        assert_eq!(ledger.pending(), 1);
    }

    #[test]
    fn test_splitter_joins_partial_lines() {
        let mut splitter = LineSplitter::default();
        let mut lines = Vec::new();
        splitter.push(br#"{"a":"#, |line| lines.push(line.to_vec()));
        splitter.push(b"1}\n{\"b\"", |line| lines.push(line.to_vec()));
        assert_eq!(lines, vec![b"{\"a\":1}\n".to_vec()]);
    }

    #[tokio::test]
    async fn test_eof_waits_for_reply() {
        let ledger = Arc::new(CallLedger::default());
        let mut reader =
            DrainingReader::new(CALL, Arc::clone(&ledger), Duration::from_secs(30));
        let mut writer = CountingWriter::new(Vec::new(), Arc::clone(&ledger));

        let mut input = Vec::new();
        let read = tokio::spawn(async move {
            reader.read_to_end(&mut input).await.unwrap();
            input
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!read.is_finished());

        writer.write_all(REPLY).await.unwrap();
        let input = read.await.unwrap();
        assert_eq!(input, CALL);
        assert!(ledger.is_idle());
    }

    #[tokio::test]
    async fn test_eof_gives_up_after_limit() {
        let ledger = Arc::new(CallLedger::default());
        let mut reader = DrainingReader::new(CALL, ledger, Duration::from_millis(20));

        let mut input = Vec::new();
        reader.read_to_end(&mut input).await.unwrap();
        assert_eq!(input, CALL);
    }
}
