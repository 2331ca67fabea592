//! Text-to-speech pipeline with channel-based communication
//!
//! The worker initializes its backend once and reports readiness with a
//! single `Ready` or `InitFailed` event; after that it processes speak and
//! stop commands until shutdown. Speak requests always flush whatever is
//! currently being spoken.

use crate::speech::SynthFactory;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

const QUEUE_SIZE: usize = 32;

/// Command sent to the TTS pipeline
#[derive(Clone, Debug)]
pub enum TtsCommand {
    /// Speak a text, interrupting the current utterance
    Speak {
        text: String,
        /// Identifier for the utterance, used for log correlation
        utterance_id: String,
    },

    /// Stop the current utterance
    Stop,

    /// Shutdown the pipeline
    Shutdown,
}

/// Event emitted by the TTS pipeline
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TtsEvent {
    /// The backend initialized; speech output is available from now on.
    /// Emitted at most once.
    Ready,

    /// The backend failed to initialize; speech output stays disabled.
    /// Emitted at most once, instead of `Ready`.
    InitFailed(String),

    /// A speak or stop request failed
    Error {
        error: String,
        utterance_id: Option<String>,
    },

    /// Pipeline has shut down
    Shutdown,
}

/// Handle/worker pair for speech output.
pub struct TtsPipeline {
    command_tx: Sender<TtsCommand>,
    command_rx: Receiver<TtsCommand>,
    event_tx: Sender<TtsEvent>,
    event_rx: Receiver<TtsEvent>,
    factory: SynthFactory,
}

impl TtsPipeline {
    pub fn new(factory: SynthFactory) -> Self {
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
    pub fn command_sender(&self) -> Sender<TtsCommand> {
        self.command_tx.clone()
    }

    /// Get a receiver for events
    pub fn event_receiver(&self) -> Receiver<TtsEvent> {
        self.event_rx.clone()
    }

    /// Start the pipeline worker thread
    pub fn start_worker(self) -> JoinHandle<()> {
        let command_rx = self.command_rx;
        let event_tx = self.event_tx;
        let factory = self.factory;

        thread::spawn(move || {
            info!("TTS pipeline worker starting");

            let mut backend = match factory() {
                Ok(backend) => {
                    info!("Speech output ready");
                    let _ = event_tx.send(TtsEvent::Ready);
                    backend
                }
                Err(e) => {
                    warn!("Speech output unavailable: {}", e);
                    let _ = event_tx.send(TtsEvent::InitFailed(e.user_message()));
                    let _ = event_tx.send(TtsEvent::Shutdown);
                    return;
                }
            };

            loop {
                match command_rx.recv() {
                    Ok(TtsCommand::Speak { text, utterance_id }) => {
                        debug!("Speaking utterance {:?}", utterance_id);
                        if let Err(e) = backend.speak(&text, &utterance_id) {
                            warn!("Speak failed for {:?}: {}", utterance_id, e);
                            let _ = event_tx.send(TtsEvent::Error {
                                error: e.to_string(),
                                utterance_id: Some(utterance_id),
                            });
                        }
                    }
                    Ok(TtsCommand::Stop) => {
                        if let Err(e) = backend.stop() {
                            warn!("Stop failed: {}", e);
                            let _ = event_tx.send(TtsEvent::Error {
                                error: e.to_string(),
                                utterance_id: None,
                            });
                        }
                    }
                    Ok(TtsCommand::Shutdown) | Err(_) => {
                        info!("TTS pipeline worker stopping");
                        let _ = event_tx.send(TtsEvent::Shutdown);
                        break;
                    }
                }
            }
        })
    }
}
