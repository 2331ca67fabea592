//! Query coordination
//!
//! One question → answer cycle at a time from the user's point of view:
//! the orchestrator owns the displayed result list, spawns one worker per
//! submitted question, and resolves overlapping submissions in favor of the
//! most recent one.

pub mod orchestrator;

pub use orchestrator::{QueryOrchestrator, QueryUpdate};
