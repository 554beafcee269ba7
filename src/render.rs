//! Re-render hooks
//!
//! The controller hands its state to a [`Renderer`] after every change, the
//! same way a form redraws when its fields change.

use crate::models::FormState;
use std::sync::{Arc, Mutex};

pub trait Renderer: Send + Sync {
    fn render(&self, state: &FormState);
}

/// Emits status changes as log lines.
#[derive(Debug, Default)]
pub struct LogRenderer {
    last_status: Mutex<String>,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for LogRenderer {
    fn render(&self, state: &FormState) {
        let mut last = self.last_status.lock().unwrap_or_else(|e| e.into_inner());
        if *last != state.status_message {
            if !state.status_message.is_empty() {
                tracing::info!("{}", state.status_message);
            }
            *last = state.status_message.clone();
        }
        tracing::trace!(loading = state.loading, mode = ?state.mode, "form rendered");
    }
}

/// Keeps a snapshot of every render for later inspection.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    frames: Arc<Mutex<Vec<FormState>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<FormState> {
        self.frames.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<FormState> {
        self.frames.lock().unwrap().last().cloned()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, state: &FormState) {
        self.frames.lock().unwrap().push(state.clone());
    }
}
