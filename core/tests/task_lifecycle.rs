mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use zava_core::api::{
    channel, AppConfig, CollectingSink, ExhaustionPolicy, Partial, ScriptedAgent, Task,
    TaskEvent, TaskExecutor, TaskRequest, TaskServer, TaskState,
};

use common::{scripts, states, terminal_count};

fn task(id: &str) -> Task {
    Task::new(id, "Which paint roller is best for smooth surfaces?", None)
}

#[tokio::test]
async fn every_script_ends_in_exactly_one_terminal_event() {
    for policy in [ExhaustionPolicy::Complete, ExhaustionPolicy::Fail] {
        for (name, steps) in scripts() {
            let exec = TaskExecutor::new(Arc::new(ScriptedAgent::new(steps)))
                .with_exhaustion_policy(policy);
            let mut sink = CollectingSink::new();
            let _ = exec.execute(&task(name), &mut sink).await;
            let events = sink.events();

            assert_eq!(terminal_count(events), 1, "script {name} ({policy:?})");
            assert!(
                events.last().is_some_and(TaskEvent::is_terminal),
                "script {name}: terminal event must be last"
            );
        }
    }
}

#[tokio::test]
async fn working_events_are_never_final() {
    for (name, steps) in scripts() {
        let exec = TaskExecutor::new(Arc::new(ScriptedAgent::new(steps)));
        let mut sink = CollectingSink::new();
        let _ = exec.execute(&task(name), &mut sink).await;

        for ev in sink.events() {
            if ev.state() == Some(TaskState::Working) {
                assert!(!ev.is_final(), "script {name}");
            }
        }
    }
}

#[tokio::test]
async fn completed_is_always_preceded_by_the_artifact() {
    for (name, steps) in scripts() {
        let exec = TaskExecutor::new(Arc::new(ScriptedAgent::new(steps)));
        let mut sink = CollectingSink::new();
        let _ = exec.execute(&task(name), &mut sink).await;
        let events = sink.events();

        if let Some(pos) = events
            .iter()
            .position(|e| e.state() == Some(TaskState::Completed))
        {
            assert!(pos > 0, "script {name}");
            assert!(
                matches!(events[pos - 1], TaskEvent::ArtifactUpdate(_)),
                "script {name}"
            );
        }
    }
}

#[tokio::test]
async fn faults_never_record_completed() {
    for (name, steps) in scripts().into_iter().filter(|(n, _)| n.starts_with("fault")) {
        let exec = TaskExecutor::new(Arc::new(ScriptedAgent::new(steps)));
        let mut sink = CollectingSink::new();
        let result = exec.execute(&task(name), &mut sink).await;

        assert!(result.is_err(), "script {name}");
        assert_eq!(states(sink.events()).last(), Some(&TaskState::Failed));
        assert!(!states(sink.events()).contains(&TaskState::Completed));
    }
}

#[tokio::test]
async fn events_carry_task_and_context_ids() {
    let t = Task::new("t-ids", "q", Some("conv-7".into()));
    let exec = TaskExecutor::new(Arc::new(ScriptedAgent::new(vec![
        Partial::working("a"),
        Partial::complete("b"),
    ])));
    let mut sink = CollectingSink::new();
    exec.execute(&t, &mut sink).await.unwrap();

    for ev in sink.events() {
        assert_eq!(ev.task_id(), "t-ids");
        assert_eq!(ev.context_id(), "conv-7");
    }
}

#[tokio::test]
async fn channel_sink_streams_events_in_order() {
    let exec = TaskExecutor::new(Arc::new(ScriptedAgent::new(vec![
        Partial::working("Let me check..."),
        Partial::complete("The 9-inch microfiber roller."),
    ])));
    let (mut sink, mut rx) = channel(1);
    let t = task("t-live");

    let producer = {
        let t = t.clone();
        tokio::spawn(async move { exec.execute(&t, &mut sink).await })
    };

    let mut received = Vec::new();
    while let Some(ev) = rx.recv().await {
        received.push(ev);
    }
    let summary = producer.await.unwrap().unwrap();

    assert_eq!(summary.final_state, TaskState::Completed);
    assert_eq!(
        received,
        vec![
            TaskEvent::working(&t, "Let me check..."),
            TaskEvent::result_artifact(&t, "The 9-inch microfiber roller."),
            TaskEvent::completed(&t),
        ]
    );
}

#[tokio::test]
async fn submissions_without_context_get_distinct_ids() {
    let agent = ScriptedAgent::new(vec![Partial::complete("ok")]);
    let a = Task::new("a", "q", None);
    let b = Task::new("b", "q", None);
    assert_ne!(a.context_id, b.context_id);

    let server = TaskServer::from_config(&AppConfig::default(), Arc::new(agent));
    let (first, second) = tokio::join!(
        server.submit_task(TaskRequest {
            id: "a".into(),
            input: "q".into(),
            context_id: None,
        }),
        server.submit_task(TaskRequest {
            id: "b".into(),
            input: "q".into(),
            context_id: None,
        }),
    );
    assert_eq!(first.unwrap().status, TaskState::Completed);
    assert_eq!(second.unwrap().status, TaskState::Completed);
}
