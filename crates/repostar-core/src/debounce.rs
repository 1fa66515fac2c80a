// Trailing-edge debounce for keystroke-driven searches
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

/// Turns a burst of text edits into at most one trailing event
///
/// Each call to [`Debouncer::input`] cancels the pending timer and arms a new
/// one. When a timer survives the whole window and the text is at least
/// `min_len` characters, `wrap(text)` is sent on the channel. Dropping the
/// debouncer cancels whatever is still pending, so nothing fires after the
/// owning view is gone.
///
/// Must be used from inside a tokio runtime.
pub struct Debouncer<T: Send + 'static> {
    window: Duration,
    min_len: usize,
    tx: UnboundedSender<T>,
    wrap: fn(String) -> T,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(
        window: Duration,
        min_len: usize,
        tx: UnboundedSender<T>,
        wrap: fn(String) -> T,
    ) -> Self {
        Self {
            window,
            min_len,
            tx,
            wrap,
            pending: None,
        }
    }

    /// Record the latest full text of the input box
    pub fn input(&mut self, text: &str) {
        self.cancel();

        let text = text.to_string();
        let window = self.window;
        let min_len = self.min_len;
        let tx = self.tx.clone();
        let wrap = self.wrap;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            if text.chars().count() < min_len {
                debug!("debounce elapsed, query {:?} too short", text);
                return;
            }
            debug!("debounce elapsed, firing {:?}", text);
            // Receiver gone means the app is shutting down
            let _ = tx.send(wrap(text));
        }));
    }

    /// Drop the pending timer, if any, without firing
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl<T: Send + 'static> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
