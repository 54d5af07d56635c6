use crate::core::extractor::Extractor;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Destination of rendered extraction output (the `#info` element)
pub trait OutputSink: Send + Sync {
    fn set_text(&self, text: String);
}

/// Info element backed by a watch channel
///
/// Holds the last text written; readers can [`InfoElement::subscribe`] to be
/// told about every write.
#[derive(Debug)]
pub struct InfoElement {
    text: watch::Sender<String>,
}

impl InfoElement {
    pub fn new() -> Self {
        let (text, _) = watch::channel(String::new());
        Self { text }
    }

    /// Current text content
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.text.subscribe()
    }
}

impl Default for InfoElement {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for InfoElement {
    fn set_text(&self, text: String) {
        self.text.send_replace(text);
    }
}

/// Re-runs extraction whenever the watched page changes
///
/// The page is a watch channel carrying the current document HTML; every
/// change notification stands for one batch of DOM mutations. A one-shot run
/// also fires `delay` after start, for pages that were already complete
/// before anything changed.
#[derive(Debug, Clone)]
pub struct PageWatcher {
    extractor: Arc<Extractor>,
    delay: Duration,
}

impl PageWatcher {
    pub fn new(extractor: Arc<Extractor>, delay: Duration) -> Self {
        Self { extractor, delay }
    }

    /// Spawn [`PageWatcher::run`] on the current tokio runtime
    pub fn spawn<S>(&self, page: watch::Receiver<String>, sink: Arc<S>) -> JoinHandle<()>
    where
        S: OutputSink + 'static,
    {
        let watcher = self.clone();
        tokio::spawn(async move { watcher.run(page, sink).await })
    }

    /// Watch `page` until its sender is dropped and the deferred run is done
    ///
    /// Each run recomputes the full state from the current snapshot, so
    /// coalesced notifications lose nothing and the last write wins.
    pub async fn run<S>(&self, mut page: watch::Receiver<String>, sink: Arc<S>)
    where
        S: OutputSink + ?Sized,
    {
        let deferred = tokio::time::sleep(self.delay);
        tokio::pin!(deferred);
        let mut deferred_done = false;

        tracing::debug!("Page watcher started (initial run in {:?})", self.delay);

        loop {
            tokio::select! {
                _ = &mut deferred, if !deferred_done => {
                    deferred_done = true;
                    tracing::debug!("Running deferred extraction");
                    self.extract_into(&mut page, sink.as_ref());
                }
                changed = page.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    self.extract_into(&mut page, sink.as_ref());
                }
            }
        }

        // A page that closed before the delay still gets its one-shot run
        if !deferred_done {
            deferred.await;
            tracing::debug!("Running deferred extraction on closed page");
            self.extract_into(&mut page, sink.as_ref());
        }

        tracing::debug!("Page closed, watcher stopped");
    }

    fn extract_into<S>(&self, page: &mut watch::Receiver<String>, sink: &S)
    where
        S: OutputSink + ?Sized,
    {
        // Marks the snapshot as seen so the deferred run does not double up
        // with a pending notification.
        let html = page.borrow_and_update().clone();

        match self.extractor.render(&html) {
            Some(output) => sink.set_text(output),
            None => tracing::trace!("Widget not ready, skipping"),
        }
    }
}
