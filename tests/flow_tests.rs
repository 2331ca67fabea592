//! End-to-end flows through the public application state API, with the
//! engine and both speech backends replaced by test doubles.

use askpod::engine::types::{ContentElement, ErrorField, Pod, Subpod};
use askpod::engine::{QueryEngine, QueryOutcome};
use askpod::results::ResultItem;
use askpod::speech::{CaptureFactory, SpeechSynthesizer, SynthFactory, VoiceCapture};
use askpod::ui::AppState;
use askpod::{AskpodError, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

struct ScriptedEngine {
    answers: Mutex<HashMap<String, QueryOutcome>>,
}

impl ScriptedEngine {
    fn new() -> Self {
        Self {
            answers: Mutex::new(HashMap::new()),
        }
    }

    fn answer(self, question: &str, outcome: QueryOutcome) -> Self {
        self.answers.lock().insert(question.to_string(), outcome);
        self
    }
}

impl QueryEngine for ScriptedEngine {
    fn query(&self, input: &str) -> Result<QueryOutcome> {
        Ok(self
            .answers
            .lock()
            .get(input)
            .cloned()
            .unwrap_or(QueryOutcome::NotUnderstood))
    }
}

struct RecordingSynth {
    spoken: Arc<Mutex<Vec<(String, String)>>>,
}

impl SpeechSynthesizer for RecordingSynth {
    fn speak(&mut self, text: &str, utterance_id: &str) -> Result<()> {
        self.spoken
            .lock()
            .push((text.to_string(), utterance_id.to_string()));
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        Ok(())
    }
}

struct FixedCapture {
    candidates: Vec<String>,
}

impl VoiceCapture for FixedCapture {
    fn capture(&mut self, _prompt: &str) -> Result<Vec<String>> {
        Ok(self.candidates.clone())
    }
}

fn recording_synth() -> (SynthFactory, Arc<Mutex<Vec<(String, String)>>>) {
    let spoken = Arc::new(Mutex::new(Vec::new()));
    let worker_spoken = Arc::clone(&spoken);
    let factory: SynthFactory =
        Box::new(move || Ok(Box::new(RecordingSynth { spoken: worker_spoken }) as _));
    (factory, spoken)
}

fn fixed_capture(candidates: Vec<&str>) -> CaptureFactory {
    let candidates: Vec<String> = candidates.into_iter().map(String::from).collect();
    Box::new(move || Ok(Box::new(FixedCapture { candidates }) as _))
}

fn no_capture() -> CaptureFactory {
    Box::new(|| Err(AskpodError::CaptureError("not wired".to_string())))
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

fn wait_until(state: &mut AppState, mut done: impl FnMut(&AppState) -> bool) {
    for _ in 0..200 {
        state.poll_events();
        if done(state) {
            return;
        }
        thread::sleep(Duration::from_millis(5));
    }
    panic!("condition never became true");
}

#[test]
fn typed_question_to_spoken_answer() {
    let engine = ScriptedEngine::new().answer(
        "speed of light",
        QueryOutcome::Success(vec![
        Pod {
            title: "Input interpretation".to_string(),
            error: ErrorField::Flag(false),
            subpods: vec![Subpod {
                contents: vec![ContentElement::PlainText("speed of light".to_string())],
            }],
        },
        Pod {
            title: "Result".to_string(),
            error: ErrorField::Flag(false),
            subpods: vec![Subpod {
                contents: vec![ContentElement::PlainText("299792458 m/s".to_string())],
            }],
        },
    ]),
    );

    let (synth, spoken) = recording_synth();
    let mut state = AppState::new(Arc::new(engine), synth, no_capture());

    state.input_text = "speed of light".to_string();
    state.submit_current();
    assert!(state.orchestrator.is_busy());

    wait_until(&mut state, |s| !s.orchestrator.is_empty() && s.tts_ready);
    assert!(!state.orchestrator.is_busy());

    let items: Vec<ResultItem> = state.orchestrator.results().to_vec();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1], ResultItem::new("Result", "299792458 m/s"));

    state.select_item(&items[1]);
    for _ in 0..200 {
        if !spoken.lock().is_empty() {
            break;
        }
        thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(
        *spoken.lock(),
        vec![("299792458 m/s".to_string(), "Result".to_string())]
    );

    state.shutdown();
}

#[test]
fn voice_question_flows_into_the_same_cycle() {
    let engine = ScriptedEngine::new().answer("what is pi", one_pod("Result", "3.14159..."));
    let (synth, _spoken) = recording_synth();
    let mut state = AppState::new(
        Arc::new(engine),
        synth,
        fixed_capture(vec!["what is pi", "what is pie"]),
    );

    state.start_voice_input();
    wait_until(&mut state, |s| !s.orchestrator.is_empty());

    // The first candidate lands in the input field and was submitted as-is.
    assert_eq!(state.input_text, "what is pi");
    assert!(!state.capturing);
    assert_eq!(
        state.orchestrator.results(),
        &[ResultItem::new("Result", "3.14159...")]
    );

    state.shutdown();
}

#[test]
fn voice_input_discards_previous_results() {
    let engine = ScriptedEngine::new()
        .answer("old question", one_pod("Old", "1"))
        .answer("new question", one_pod("New", "2"));
    let (synth, _spoken) = recording_synth();
    let mut state = AppState::new(Arc::new(engine), synth, fixed_capture(vec!["new question"]));

    state.submit("old question");
    wait_until(&mut state, |s| !s.orchestrator.is_empty());

    state.start_voice_input();
    assert!(state.orchestrator.is_empty());

    wait_until(&mut state, |s| !s.orchestrator.is_empty());
    assert_eq!(state.orchestrator.results(), &[ResultItem::new("New", "2")]);

    state.shutdown();
}

#[test]
fn rejected_question_marks_input_not_results() {
    let engine = ScriptedEngine::new(); // every question falls through to NotUnderstood
    let (synth, _spoken) = recording_synth();
    let mut state = AppState::new(Arc::new(engine), synth, no_capture());

    state.submit("gibberish");
    wait_until(&mut state, |s| s.input_error.is_some());

    assert!(state.orchestrator.is_empty());
    assert!(state.notice.is_none());

    state.shutdown();
}
