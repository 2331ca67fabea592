//! Application state management
//!
//! The central state for the Askpod UI. All fields are owned here and
//! mutated only on the UI thread inside `poll_events`; the worker
//! pipelines communicate exclusively through their channels.

use crate::engine::QueryEngine;
use crate::query::{QueryOrchestrator, QueryUpdate};
use crate::results::ResultItem;
use crate::speech::{
    CaptureCommand, CaptureEvent, CaptureFactory, CapturePipeline, SynthFactory, TtsCommand,
    TtsEvent, TtsPipeline,
};
use crate::ui::strings;
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, warn};

/// Central application state
pub struct AppState {
    /// Owner of the result list and the question/answer cycle
    pub orchestrator: QueryOrchestrator,

    /// Current text input
    pub input_text: String,

    /// Static validation message attached to the input field
    pub input_error: Option<String>,

    /// Transient notice, shown until the user dismisses it
    pub notice: Option<String>,

    /// Whether a modal voice capture session is in progress
    pub capturing: bool,

    /// Whether speech output finished initializing. Set at most once.
    pub tts_ready: bool,

    tts_command_tx: Sender<TtsCommand>,
    tts_event_rx: Receiver<TtsEvent>,
    capture_command_tx: Sender<CaptureCommand>,
    capture_event_rx: Receiver<CaptureEvent>,

    workers: Vec<JoinHandle<()>>,
}

impl AppState {
    /// Create the application state and start the speech workers.
    pub fn new(
        engine: Arc<dyn QueryEngine>,
        synth_factory: SynthFactory,
        capture_factory: CaptureFactory,
    ) -> Self {
        let tts_pipeline = TtsPipeline::new(synth_factory);
        let tts_command_tx = tts_pipeline.command_sender();
        let tts_event_rx = tts_pipeline.event_receiver();

        let capture_pipeline = CapturePipeline::new(capture_factory);
        let capture_command_tx = capture_pipeline.command_sender();
        let capture_event_rx = capture_pipeline.event_receiver();

        let workers = vec![tts_pipeline.start_worker(), capture_pipeline.start_worker()];

        Self {
            orchestrator: QueryOrchestrator::new(engine),
            input_text: String::new(),
            input_error: None,
            notice: None,
            capturing: false,
            tts_ready: false,
            tts_command_tx,
            tts_event_rx,
            capture_command_tx,
            capture_event_rx,
            workers,
        }
    }

    /// Submit whatever is currently in the input field.
    pub fn submit_current(&mut self) {
        let question = self.input_text.clone();
        self.submit(&question);
    }

    /// Submit a question. Empty strings are forwarded as-is; the service
    /// decides what it accepts.
    pub fn submit(&mut self, question: &str) {
        self.input_error = None;
        self.orchestrator.submit(question);
    }

    /// Open a modal voice capture session.
    ///
    /// Mirrors the voice button contract: the displayed results are
    /// cleared and any ongoing speech is interrupted before capture opens.
    pub fn start_voice_input(&mut self) {
        if self.capturing {
            return;
        }

        self.orchestrator.clear();
        self.stop_speech();

        self.capturing = true;
        if self
            .capture_command_tx
            .send(CaptureCommand::Request {
                prompt: strings::CAPTURE_PROMPT.to_string(),
            })
            .is_err()
        {
            warn!("Capture pipeline is gone");
            self.capturing = false;
            self.notice = Some(strings::ERROR_SOMETHING_WENT_WRONG.to_string());
        }
    }

    /// Read an answer aloud. Silently does nothing while speech output is
    /// not ready.
    pub fn select_item(&mut self, item: &ResultItem) {
        if !self.tts_ready {
            debug!("Ignoring selection, speech output not ready");
            return;
        }

        let _ = self.tts_command_tx.send(TtsCommand::Speak {
            text: item.content.clone(),
            utterance_id: item.title.clone(),
        });
    }

    /// Interrupt the current utterance, if any.
    pub fn stop_speech(&mut self) {
        if self.tts_ready {
            let _ = self.tts_command_tx.send(TtsCommand::Stop);
        }
    }

    /// Clear the input field and the displayed results.
    pub fn clear_all(&mut self) {
        self.input_text.clear();
        self.input_error = None;
        self.orchestrator.clear();
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Process incoming events from the worker channels. Runs once per
    /// frame on the UI thread.
    pub fn poll_events(&mut self) {
        for update in self.orchestrator.poll() {
            match update {
                QueryUpdate::ResultsChanged => {
                    // The list itself carries the change; nothing else to do
                }
                QueryUpdate::ServiceError(msg) => {
                    self.notice = Some(if msg.trim().is_empty() {
                        strings::ERROR_SOMETHING_WENT_WRONG.to_string()
                    } else {
                        msg
                    });
                }
                QueryUpdate::NotUnderstood => {
                    self.input_error = Some(strings::ERROR_NOT_UNDERSTOOD.to_string());
                }
                QueryUpdate::Failed(msg) => {
                    self.notice = Some(if msg.trim().is_empty() {
                        strings::ERROR_SOMETHING_WENT_WRONG.to_string()
                    } else {
                        msg
                    });
                }
            }
        }

        while let Ok(event) = self.tts_event_rx.try_recv() {
            match event {
                TtsEvent::Ready => {
                    debug!("Speech output became ready");
                    self.tts_ready = true;
                }
                TtsEvent::InitFailed(msg) => {
                    self.notice = Some(msg);
                }
                TtsEvent::Error { error, utterance_id } => {
                    warn!("Speech output error for {:?}: {}", utterance_id, error);
                }
                TtsEvent::Shutdown => {
                    self.tts_ready = false;
                }
            }
        }

        // Collect first, then act: a transcript triggers a submit which
        // borrows self mutably.
        let mut capture_events = Vec::new();
        while let Ok(event) = self.capture_event_rx.try_recv() {
            capture_events.push(event);
        }

        for event in capture_events {
            match event {
                CaptureEvent::Transcript(transcript) => {
                    self.capturing = false;
                    self.input_text = transcript.clone();
                    self.submit(&transcript);
                }
                CaptureEvent::Failed(msg) => {
                    self.capturing = false;
                    self.notice = Some(msg);
                }
                CaptureEvent::Shutdown => {
                    self.capturing = false;
                }
            }
        }
    }

    /// Ask the speech workers to stop. Called when the app closes.
    pub fn shutdown(&mut self) {
        let _ = self.tts_command_tx.send(TtsCommand::Shutdown);
        let _ = self.capture_command_tx.send(CaptureCommand::Shutdown);

        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}
