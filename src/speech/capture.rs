//! Voice capture pipeline with channel-based communication
//!
//! Each `Request` runs one modal capture session on the worker thread and
//! emits either the first transcript candidate or a failure. A backend that
//! fails to initialize is not fatal: every subsequent request reports the
//! feature unavailable, matching the behavior of a device without a
//! recognizer installed.

use crate::speech::{CaptureFactory, VoiceCapture};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

const QUEUE_SIZE: usize = 8;

/// Command sent to the capture pipeline
#[derive(Clone, Debug)]
pub enum CaptureCommand {
    /// Open one modal capture session
    Request {
        /// Prompt shown/spoken to the user by backends that support it
        prompt: String,
    },

    /// Shutdown the pipeline
    Shutdown,
}

/// Event emitted by the capture pipeline
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaptureEvent {
    /// A session produced a transcript; carries exactly the first candidate
    Transcript(String),

    /// A session failed or the backend is unavailable
    Failed(String),

    /// Pipeline has shut down
    Shutdown,
}

/// Handle/worker pair for voice input.
pub struct CapturePipeline {
    command_tx: Sender<CaptureCommand>,
    command_rx: Receiver<CaptureCommand>,
    event_tx: Sender<CaptureEvent>,
    event_rx: Receiver<CaptureEvent>,
    factory: CaptureFactory,
}

impl CapturePipeline {
    pub fn new(factory: CaptureFactory) -> Self {
        let (command_tx, command_rx) = bounded(QUEUE_SIZE);
        let (event_tx, event_rx) = bounded(QUEUE_SIZE);

        Self {
            command_tx,
            command_rx,
            event_tx,
            event_rx,
            factory,
        }
    }

    /// Get a sender for commands
    pub fn command_sender(&self) -> Sender<CaptureCommand> {
        self.command_tx.clone()
    }

    /// Get a receiver for events
    pub fn event_receiver(&self) -> Receiver<CaptureEvent> {
        self.event_rx.clone()
    }

    /// Start the pipeline worker thread
    pub fn start_worker(self) -> JoinHandle<()> {
        let command_rx = self.command_rx;
        let event_tx = self.event_tx;
        let factory = self.factory;

        thread::spawn(move || {
            info!("Capture pipeline worker starting");

            let mut backend: Option<Box<dyn VoiceCapture>> = match factory() {
                Ok(backend) => {
                    info!("Voice capture ready");
                    Some(backend)
                }
                Err(e) => {
                    warn!("Voice capture unavailable: {}", e);
                    None
                }
            };

            loop {
                match command_rx.recv() {
                    Ok(CaptureCommand::Request { prompt }) => {
                        let event = match backend.as_mut() {
                            Some(backend) => match backend.capture(&prompt) {
                                Ok(candidates) => match candidates.into_iter().next() {
                                    Some(first) => {
                                        debug!("Capture transcript: {:?}", first);
                                        CaptureEvent::Transcript(first)
                                    }
                                    None => CaptureEvent::Failed(
                                        "No speech was recognized".to_string(),
                                    ),
                                },
                                Err(e) => {
                                    warn!("Capture session failed: {}", e);
                                    CaptureEvent::Failed(e.user_message())
                                }
                            },
                            None => CaptureEvent::Failed(
                                "Voice recognition is not available.".to_string(),
                            ),
                        };
                        let _ = event_tx.send(event);
                    }
                    Ok(CaptureCommand::Shutdown) | Err(_) => {
                        info!("Capture pipeline worker stopping");
                        let _ = event_tx.send(CaptureEvent::Shutdown);
                        break;
                    }
                }
            }
        })
    }
}
