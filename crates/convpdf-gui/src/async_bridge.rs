//! Async runtime bridge for running background tasks in egui

use convpdf_core::{ConversionReport, ConvertError, FileDescriptor};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

/// Message from a background task back to the UI thread.
#[derive(Debug)]
pub enum AppEvent {
    /// Metadata resolution for a pick finished; `None` on cancel or failure.
    SelectionResolved(Option<FileDescriptor>),
    /// The upload attempt ended.
    UploadFinished(Result<ConversionReport, ConvertError>),
}

/// Bridge between async runtime and egui
pub struct AsyncBridge {
    /// Tokio runtime for async operations (wrapped in Option for clean shutdown)
    runtime: Option<Runtime>,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl AsyncBridge {
    pub fn new() -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("convpdf-worker")
            .enable_all()
            .build()?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Ok(Self {
            runtime: Some(runtime),
            events_tx,
            events_rx,
        })
    }

    /// Spawn `task` on the runtime and deliver its event to the UI thread.
    /// `repaint` wakes the UI when the event arrives.
    pub fn spawn<F>(&self, task: F, repaint: impl Fn() + Send + 'static)
    where
        F: std::future::Future<Output = AppEvent> + Send + 'static,
    {
        let Some(runtime) = self.runtime.as_ref() else {
            tracing::warn!("Runtime already shut down; dropping task");
            return;
        };
        let tx = self.events_tx.clone();
        runtime.spawn(async move {
            let event = task.await;
            // Receiver only disappears at shutdown.
            let _ = tx.send(event);
            repaint();
        });
    }

    /// Drain pending events without blocking.
    pub fn poll_events<F>(&mut self, mut handler: F)
    where
        F: FnMut(AppEvent),
    {
        while let Ok(event) = self.events_rx.try_recv() {
            handler(event);
        }
    }
}

impl Drop for AsyncBridge {
    fn drop(&mut self) {
        // Dropping a runtime from inside an async context panics.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
