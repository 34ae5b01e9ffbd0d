//! Background export execution.
//!
//! Exports run on a worker thread so the grid stays responsive while the
//! spreadsheet downloads. At most one export is in flight per grid.

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread;

use eframe::egui;
use tracing::{info, warn};

use crate::error::{GridError, Result};
use crate::io::export::{ExportHandler, ExportOutcome, ExportRequest};

/// Result of checking on a background export.
#[derive(Debug)]
pub enum ExportResult {
    /// Export finished
    Success(ExportOutcome),
    /// Export failed
    Error(GridError),
    /// Nothing finished this frame (still running or idle)
    None,
}

/// Shared in-flight flag, cleared by the worker when it finishes.
#[derive(Debug, Default)]
struct ExportState {
    in_progress: bool,
}

/// Runs exports off the UI thread.
///
/// Call `check_completion()` once per frame to collect results.
pub struct ExportController {
    state: Arc<Mutex<ExportState>>,
    receiver: Option<Receiver<Result<ExportOutcome>>>,
}

impl ExportController {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ExportState::default())),
            receiver: None,
        }
    }

    /// Checks if an export is running or its result is still uncollected.
    pub fn is_exporting(&self) -> bool {
        self.receiver.is_some() || self.state.lock().map(|s| s.in_progress).unwrap_or(false)
    }

    /// Starts an export in the background.
    ///
    /// # Arguments
    /// * `handler` - How to perform the export
    /// * `request` - Query and fields to export
    /// * `ctx` - Repainted when the export finishes, if given
    ///
    /// # Returns
    /// `Err(GridError::ExportInFlight)` if an export is already running.
    pub fn start(
        &mut self,
        handler: ExportHandler,
        request: ExportRequest,
        ctx: Option<&egui::Context>,
    ) -> Result<()> {
        if self.is_exporting() {
            warn!("export requested while another is running");
            return Err(GridError::ExportInFlight);
        }

        let (sender, receiver) = channel();
        self.receiver = Some(receiver);
        if let Ok(mut state) = self.state.lock() {
            state.in_progress = true;
        }

        let state = Arc::clone(&self.state);
        let ctx_handle = ctx.cloned();
        info!(fields = request.fields.len(), "export started");

        thread::spawn(move || {
            let result = handler.run(&request);

            if let Ok(mut state) = state.lock() {
                state.in_progress = false;
            }
            let _ = sender.send(result);
            if let Some(ctx) = ctx_handle {
                ctx.request_repaint();
            }
        });

        Ok(())
    }

    /// Returns the export result if one finished since the last call.
    pub fn check_completion(&mut self) -> ExportResult {
        let Some(receiver) = &self.receiver else {
            return ExportResult::None;
        };

        let result = match receiver.try_recv() {
            Ok(Ok(outcome)) => ExportResult::Success(outcome),
            Ok(Err(err)) => {
                warn!(error = %err, "export failed");
                ExportResult::Error(err)
            }
            Err(TryRecvError::Empty) => return ExportResult::None,
            Err(TryRecvError::Disconnected) => {
                // The worker died without reporting; it never cleared the flag.
                if let Ok(mut state) = self.state.lock() {
                    state.in_progress = false;
                }
                warn!("export worker stopped without a result");
                ExportResult::Error(GridError::ExportHandler("export worker stopped unexpectedly".to_string()))
            }
        };

        self.receiver = None;
        result
    }
}

impl Default for ExportController {
    fn default() -> Self {
        Self::new()
    }
}
