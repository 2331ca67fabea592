//! Orchestrator for the question/answer cycle
//!
//! Owns the single mutable list of result items. `submit` clears the list
//! and spawns one background worker that performs the blocking engine call;
//! the worker reports back over a bounded channel and the UI thread folds
//! the outcome in via `poll`. Responses for superseded queries are dropped,
//! so the most recently submitted question always wins.

use crate::engine::{QueryEngine, QueryOutcome};
use crate::results::{items_from_pods, ResultItem};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use tracing::{debug, warn};
use uuid::Uuid;

const EVENT_QUEUE_SIZE: usize = 32;

/// Internal event sent by a query worker when its call settles.
#[derive(Debug, Clone)]
enum QueryEvent {
    Settled { id: Uuid, outcome: SettleOutcome },
}

/// How one engine call settled, already mapped to display items.
#[derive(Debug, Clone)]
enum SettleOutcome {
    Results(Vec<ResultItem>),
    ServiceError(String),
    NotUnderstood,
    Failed(String),
}

/// Update surfaced to the presenter after polling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryUpdate {
    /// The result list was replaced; re-render all rows.
    ResultsChanged,

    /// The service rejected the query with a human-readable message.
    ServiceError(String),

    /// The service understood neither error nor answer; mark the input
    /// field invalid.
    NotUnderstood,

    /// The call itself failed (transport, decode); message may be shown
    /// verbatim or replaced with a generic fallback by the caller.
    Failed(String),
}

pub struct QueryOrchestrator {
    engine: Arc<dyn QueryEngine>,
    results: Vec<ResultItem>,

    /// Id of the query whose response is still wanted. `None` means idle;
    /// settled events that do not match are stale and get dropped.
    current: Option<Uuid>,

    event_tx: Sender<QueryEvent>,
    event_rx: Receiver<QueryEvent>,
}

impl QueryOrchestrator {
    pub fn new(engine: Arc<dyn QueryEngine>) -> Self {
        let (event_tx, event_rx) = bounded(EVENT_QUEUE_SIZE);

        Self {
            engine,
            results: Vec::new(),
            current: None,
            event_tx,
            event_rx,
        }
    }

    /// Submit a question to the engine.
    ///
    /// Synchronously empties the result list, then spawns one worker for
    /// the blocking call. The orchestrator is busy until this query settles
    /// or is superseded by a newer `submit` or a `clear`.
    pub fn submit(&mut self, question: &str) -> Uuid {
        self.results.clear();

        let id = Uuid::new_v4();
        self.current = Some(id);

        debug!("Submitting query {}: {:?}", id, question);

        let engine = Arc::clone(&self.engine);
        let event_tx = self.event_tx.clone();
        let question = question.to_string();

        thread::spawn(move || {
            let outcome = match engine.query(&question) {
                Ok(QueryOutcome::Success(pods)) => SettleOutcome::Results(items_from_pods(&pods)),
                Ok(QueryOutcome::ServiceError(msg)) => SettleOutcome::ServiceError(msg),
                Ok(QueryOutcome::NotUnderstood) => SettleOutcome::NotUnderstood,
                Err(e) => SettleOutcome::Failed(e.to_string()),
            };

            if event_tx.send(QueryEvent::Settled { id, outcome }).is_err() {
                warn!("Query {} settled after orchestrator was dropped", id);
            }
        });

        id
    }

    /// Empty the result list and forget any in-flight query.
    ///
    /// The worker itself is not cancelled; its response is dropped when it
    /// arrives. Never fails, regardless of prior state.
    pub fn clear(&mut self) {
        self.results.clear();
        self.current = None;
    }

    /// Drain settled events. Must run on the UI thread; all mutations of
    /// the shared list happen here.
    ///
    /// For the current query the busy flag is lowered exactly once, before
    /// the branch-specific update is produced.
    pub fn poll(&mut self) -> Vec<QueryUpdate> {
        let mut updates = Vec::new();

        while let Ok(QueryEvent::Settled { id, outcome }) = self.event_rx.try_recv() {
            if self.current != Some(id) {
                debug!("Dropping stale response for query {}", id);
                continue;
            }

            self.current = None;

            match outcome {
                SettleOutcome::Results(items) => {
                    debug!("Query {} settled with {} items", id, items.len());
                    self.results = items;
                    updates.push(QueryUpdate::ResultsChanged);
                }
                SettleOutcome::ServiceError(msg) => {
                    debug!("Query {} rejected by service: {}", id, msg);
                    updates.push(QueryUpdate::ServiceError(msg));
                }
                SettleOutcome::NotUnderstood => {
                    debug!("Query {} not understood", id);
                    updates.push(QueryUpdate::NotUnderstood);
                }
                SettleOutcome::Failed(msg) => {
                    warn!("Query {} failed: {}", id, msg);
                    updates.push(QueryUpdate::Failed(msg));
                }
            }
        }

        updates
    }

    /// Whether a query is in flight.
    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    /// The currently displayed items.
    pub fn results(&self) -> &[ResultItem] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{ContentElement, ErrorField, Pod, Subpod};
    use crate::{AskpodError, Result};
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Engine whose answers are scripted per question.
    struct ScriptedEngine {
        answers: Mutex<HashMap<String, Result<QueryOutcome>>>,
    }

    impl ScriptedEngine {
        fn new() -> Self {
            Self {
                answers: Mutex::new(HashMap::new()),
            }
        }

        fn answer(self, question: &str, outcome: Result<QueryOutcome>) -> Self {
            self.answers.lock().insert(question.to_string(), outcome);
            self
        }
    }

    impl QueryEngine for ScriptedEngine {
        fn query(&self, input: &str) -> Result<QueryOutcome> {
            self.answers
                .lock()
                .remove(input)
                .unwrap_or(Ok(QueryOutcome::NotUnderstood))
        }
    }

    /// Engine that blocks each call until the test releases it, keyed by
    /// question, so overlapping submits settle in a chosen order.
    struct GatedEngine {
        gates: Mutex<HashMap<String, Receiver<QueryOutcome>>>,
    }

    impl GatedEngine {
        fn new() -> Self {
            Self {
                gates: Mutex::new(HashMap::new()),
            }
        }

        fn gate(&self, question: &str) -> Sender<QueryOutcome> {
            let (tx, rx) = bounded(1);
            self.gates.lock().insert(question.to_string(), rx);
            tx
        }
    }

    impl QueryEngine for GatedEngine {
        fn query(&self, input: &str) -> Result<QueryOutcome> {
            let rx = self
                .gates
                .lock()
                .remove(input)
                .expect("no gate registered for question");
            rx.recv()
                .map_err(|e| AskpodError::EngineRequestError(e.to_string()))
        }
    }

    fn one_pod(title: &str, text: &str) -> QueryOutcome {
        QueryOutcome::Success(vec![Pod {
            title: title.to_string(),
            error: ErrorField::Flag(false),
            subpods: vec![Subpod {
                contents: vec![ContentElement::PlainText(text.to_string())],
            }],
        }])
    }

    /// Poll until at least one update arrives or the timeout elapses.
    fn poll_until_settled(orchestrator: &mut QueryOrchestrator) -> Vec<QueryUpdate> {
        for _ in 0..200 {
            let updates = orchestrator.poll();
            if !updates.is_empty() {
                return updates;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("query never settled");
    }

    #[test]
    fn test_successful_query_populates_results() {
        let engine = ScriptedEngine::new().answer("2+2", Ok(one_pod("Result", "4")));
        let mut orchestrator = QueryOrchestrator::new(Arc::new(engine));

        orchestrator.submit("2+2");
        assert!(orchestrator.is_busy());

        let updates = poll_until_settled(&mut orchestrator);
        assert_eq!(updates, vec![QueryUpdate::ResultsChanged]);
        assert!(!orchestrator.is_busy());
        assert_eq!(orchestrator.results(), &[ResultItem::new("Result", "4")]);
    }

    #[test]
    fn test_service_error_leaves_list_empty() {
        let engine = ScriptedEngine::new()
            .answer("??", Ok(QueryOutcome::ServiceError("Invalid appid".to_string())));
        let mut orchestrator = QueryOrchestrator::new(Arc::new(engine));

        orchestrator.submit("??");
        let updates = poll_until_settled(&mut orchestrator);

        assert_eq!(
            updates,
            vec![QueryUpdate::ServiceError("Invalid appid".to_string())]
        );
        assert!(orchestrator.is_empty());
        assert!(!orchestrator.is_busy());
    }

    #[test]
    fn test_not_understood_reported_without_touching_results() {
        let engine = ScriptedEngine::new().answer("asdkjh", Ok(QueryOutcome::NotUnderstood));
        let mut orchestrator = QueryOrchestrator::new(Arc::new(engine));

        orchestrator.submit("asdkjh");
        let updates = poll_until_settled(&mut orchestrator);

        assert_eq!(updates, vec![QueryUpdate::NotUnderstood]);
        assert_eq!(orchestrator.len(), 0);
    }

    #[test]
    fn test_transport_failure_surfaces_message_and_lowers_busy() {
        let engine = ScriptedEngine::new().answer(
            "x",
            Err(AskpodError::EngineRequestError("timeout".to_string())),
        );
        let mut orchestrator = QueryOrchestrator::new(Arc::new(engine));

        orchestrator.submit("x");
        let updates = poll_until_settled(&mut orchestrator);

        match &updates[0] {
            QueryUpdate::Failed(msg) => assert!(msg.contains("timeout")),
            other => panic!("unexpected update: {:?}", other),
        }
        assert!(!orchestrator.is_busy());
    }

    #[test]
    fn test_clear_empties_results_from_any_state() {
        let engine = ScriptedEngine::new().answer("2+2", Ok(one_pod("Result", "4")));
        let mut orchestrator = QueryOrchestrator::new(Arc::new(engine));

        orchestrator.clear();
        assert_eq!(orchestrator.len(), 0);

        orchestrator.submit("2+2");
        poll_until_settled(&mut orchestrator);
        assert_eq!(orchestrator.len(), 1);

        orchestrator.clear();
        assert_eq!(orchestrator.len(), 0);
        assert!(!orchestrator.is_busy());
    }

    #[test]
    fn test_newer_submit_wins_when_older_settles_last() {
        let engine = GatedEngine::new();
        let first_gate = engine.gate("first");
        let second_gate = engine.gate("second");
        let mut orchestrator = QueryOrchestrator::new(Arc::new(engine));

        orchestrator.submit("first");
        orchestrator.submit("second");

        // The newer query settles first, then the stale one arrives late.
        second_gate.send(one_pod("Second", "2")).unwrap();
        let updates = poll_until_settled(&mut orchestrator);
        assert_eq!(updates, vec![QueryUpdate::ResultsChanged]);

        first_gate.send(one_pod("First", "1")).unwrap();
        thread::sleep(Duration::from_millis(50));
        assert!(orchestrator.poll().is_empty());

        assert_eq!(orchestrator.results(), &[ResultItem::new("Second", "2")]);
    }

    #[test]
    fn test_newer_submit_wins_when_older_settles_first() {
        let engine = GatedEngine::new();
        let first_gate = engine.gate("first");
        let second_gate = engine.gate("second");
        let mut orchestrator = QueryOrchestrator::new(Arc::new(engine));

        orchestrator.submit("first");
        orchestrator.submit("second");

        // The superseded query settles first and must be dropped.
        first_gate.send(one_pod("First", "1")).unwrap();
        thread::sleep(Duration::from_millis(50));
        assert!(orchestrator.poll().is_empty());
        assert!(orchestrator.is_busy());

        second_gate.send(one_pod("Second", "2")).unwrap();
        let updates = poll_until_settled(&mut orchestrator);
        assert_eq!(updates, vec![QueryUpdate::ResultsChanged]);
        assert_eq!(orchestrator.results(), &[ResultItem::new("Second", "2")]);
    }

    #[test]
    fn test_clear_drops_in_flight_response() {
        let engine = GatedEngine::new();
        let gate = engine.gate("slow");
        let mut orchestrator = QueryOrchestrator::new(Arc::new(engine));

        orchestrator.submit("slow");
        orchestrator.clear();
        assert!(!orchestrator.is_busy());

        gate.send(one_pod("Slow", "late")).unwrap();
        thread::sleep(Duration::from_millis(50));
        assert!(orchestrator.poll().is_empty());
        assert!(orchestrator.is_empty());
    }

    #[test]
    fn test_submit_clears_previous_results_immediately() {
        let engine = ScriptedEngine::new()
            .answer("a", Ok(one_pod("A", "1")))
            .answer("b", Ok(one_pod("B", "2")));
        let mut orchestrator = QueryOrchestrator::new(Arc::new(engine));

        orchestrator.submit("a");
        poll_until_settled(&mut orchestrator);
        assert_eq!(orchestrator.len(), 1);

        orchestrator.submit("b");
        // Synchronous clear before the new response arrives.
        assert_eq!(orchestrator.len(), 0);

        poll_until_settled(&mut orchestrator);
        assert_eq!(orchestrator.results(), &[ResultItem::new("B", "2")]);
    }

    #[test]
    fn test_empty_question_is_forwarded() {
        let engine = ScriptedEngine::new().answer("", Ok(QueryOutcome::NotUnderstood));
        let mut orchestrator = QueryOrchestrator::new(Arc::new(engine));

        orchestrator.submit("");
        let updates = poll_until_settled(&mut orchestrator);
        assert_eq!(updates, vec![QueryUpdate::NotUnderstood]);
    }
}
