use std::io::Write;

use zava_core::api::{channel, CliError, Task, TaskEvent, TaskRequest, TaskResponse, TaskServer};
use zava_core::server::{reduce_output, validate_request};

use super::cli::AskArgs;

const EVENT_BUFFER: usize = 64;

/// 在本地执行一个任务：事件经 channel 实时读出，最后输出归约后的响应。
pub async fn handle_ask<W: Write>(
    server: &TaskServer,
    args: AskArgs,
    out: &mut W,
) -> Result<TaskResponse, CliError> {
    let request = TaskRequest {
        id: args.id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        input: args.input,
        context_id: args.context_id,
    };
    validate_request(&request)?;
    let task = Task::new(request.id, request.input, request.context_id);

    let (mut sink, mut rx) = channel(EVENT_BUFFER);
    let runner = server.clone();
    let spawned = task.clone();
    let handle = tokio::spawn(async move { runner.run_task(&spawned, &mut sink).await });

    let mut events: Vec<TaskEvent> = Vec::new();
    while let Some(event) = rx.recv().await {
        if args.events {
            if let Err(e) = write_event(out, &event) {
                // 不留下脱管的执行任务
                handle.abort();
                let _ = handle.await;
                return Err(e);
            }
        }
        events.push(event);
    }

    let summary = handle
        .await
        .map_err(|e| CliError::Server(format!("task runner panicked: {e}")))??;

    tracing::debug!(
        task_id = %task.id,
        final_state = %summary.final_state,
        events = summary.events_emitted,
        "ask finished"
    );

    let response = TaskResponse::completed(task.id, reduce_output(&events));
    writeln!(
        out,
        "{}",
        serde_json::to_string_pretty(&response).map_err(anyhow::Error::from)?
    )?;
    Ok(response)
}

fn write_event<W: Write>(out: &mut W, event: &TaskEvent) -> Result<(), CliError> {
    let line = serde_json::to_string(event).map_err(anyhow::Error::from)?;
    writeln!(out, "{line}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use zava_core::api::{AppConfig, Partial, ScriptStep, ScriptedAgent, TaskError, TaskState};

    fn server(steps: Vec<ScriptStep>) -> TaskServer {
        TaskServer::from_config(&AppConfig::default(), Arc::new(ScriptedAgent::new(steps)))
    }

    fn ask(input: &str, events: bool) -> AskArgs {
        AskArgs {
            input: input.into(),
            id: Some("t1".into()),
            context_id: Some("ctx-1".into()),
            events,
        }
    }

    #[tokio::test]
    async fn test_ask_prints_events_then_response() {
        let srv = server(vec![
            Partial::working("Let me check...").into(),
            Partial::complete("The 9-inch microfiber roller.").into(),
        ]);
        let mut out = Vec::new();

        let resp = handle_ask(&srv, ask("Which paint roller?", true), &mut out)
            .await
            .unwrap();

        assert_eq!(resp.status, TaskState::Completed);
        assert_eq!(resp.output, "The 9-inch microfiber roller.");

        let text = String::from_utf8(out).unwrap();
        let kinds: Vec<String> = text
            .lines()
            .take(3)
            .map(|l| {
                let v: serde_json::Value = serde_json::from_str(l).unwrap();
                v["kind"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(kinds, vec!["status-update", "artifact-update", "status-update"]);
        assert!(text.contains("\"status\": \"completed\""));
    }

    #[tokio::test]
    async fn test_ask_without_events_prints_only_response() {
        let srv = server(vec![Partial::needs_input("Which color family?").into()]);
        let mut out = Vec::new();

        let resp = handle_ask(&srv, ask("I need paint", false), &mut out)
            .await
            .unwrap();

        assert_eq!(resp.status, TaskState::Completed);
        assert_eq!(resp.output, "Which color family?");
        let printed: TaskResponse = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed, resp);
    }

    #[tokio::test]
    async fn test_ask_agent_fault() {
        let srv = server(vec![ScriptStep::Fault("upstream reset".into())]);
        let mut out = Vec::new();

        let err = handle_ask(&srv, ask("q", false), &mut out).await.unwrap_err();
        assert!(matches!(err, CliError::Task(TaskError::AgentFailure(_))));
    }

    #[tokio::test]
    async fn test_ask_blank_input_rejected() {
        let srv = server(vec![Partial::complete("x").into()]);
        let mut out = Vec::new();

        let err = handle_ask(&srv, ask("   ", false), &mut out).await.unwrap_err();
        assert!(matches!(err, CliError::Task(TaskError::ProtocolViolation(_))));
        assert!(out.is_empty());
    }

    /// stdout 写失败时立即返回 IO 错误。
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_ask_write_failure_stops_runner() {
        let srv = server(vec![
            Partial::working("Let me check...").into(),
            Partial::working("Still checking...").into(),
            Partial::complete("The 9-inch microfiber roller.").into(),
        ]);

        let err = handle_ask(&srv, ask("Which paint roller?", true), &mut BrokenPipe)
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::Io(ref e) if e.kind() == std::io::ErrorKind::BrokenPipe));
    }
}
