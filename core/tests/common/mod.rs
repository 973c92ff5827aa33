use zava_core::api::{Partial, ScriptStep, TaskEvent, TaskState};

/// Scripts covering every way a stream can end.
pub fn scripts() -> Vec<(&'static str, Vec<ScriptStep>)> {
    let w = |s: &str| ScriptStep::Emit(Partial::working(s));
    let done = |s: &str| ScriptStep::Emit(Partial::complete(s));
    let ask = |s: &str| ScriptStep::Emit(Partial::needs_input(s));
    let fault = |s: &str| ScriptStep::Fault(s.to_string());

    vec![
        ("empty", vec![]),
        ("complete-only", vec![done("a")]),
        ("working-then-complete", vec![w("a"), w("b"), done("c")]),
        ("ask-first", vec![ask("which?"), w("x"), done("y")]),
        ("ask-after-working", vec![w("a"), ask("which?"), done("y")]),
        ("complete-then-more", vec![done("a"), w("b"), ask("c")]),
        ("exhausted", vec![w("a"), w("b")]),
        ("fault-first", vec![fault("boom"), done("a")]),
        ("fault-after-working", vec![w("a"), fault("boom"), done("b")]),
    ]
}

/// Number of final status updates in `events`.
pub fn terminal_count(events: &[TaskEvent]) -> usize {
    events.iter().filter(|e| e.is_terminal()).count()
}

pub fn states(events: &[TaskEvent]) -> Vec<TaskState> {
    events.iter().filter_map(TaskEvent::state).collect()
}
