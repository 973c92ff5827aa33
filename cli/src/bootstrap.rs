//! 启动流程：配置加载、agent 后端装配、错误码映射

use std::path::Path;

use zava_core::api::{self as zava, AppConfig, CliError, TaskError, TaskServer};

/// `--config` 指定时只读该文件，否则按默认优先级查找；环境变量覆盖始终生效。
pub fn load_config(path: Option<&str>) -> Result<AppConfig, CliError> {
    let loaded = match path.map(str::trim).filter(|s| !s.is_empty()) {
        Some(p) => zava::load_from_path(Path::new(p)).and_then(|mut cfg| {
            zava::apply_env_overrides(&mut cfg, |key| std::env::var(key).ok())?;
            Ok(cfg)
        }),
        None => zava::load_default(),
    };
    loaded.map_err(|e| CliError::Config(e.to_string()))
}

pub fn build_server(cfg: &AppConfig) -> Result<TaskServer, CliError> {
    let instructions =
        zava::load_instructions(cfg).map_err(|e| CliError::Config(e.to_string()))?;
    let agent = zava_plugins::factory::build_agent(cfg, instructions)
        .map_err(|e| CliError::Config(e.to_string()))?;
    tracing::debug!(agent = agent.name(), "agent backend ready");
    Ok(TaskServer::from_config(cfg, agent))
}

pub fn exit_code_for_error(e: &CliError) -> i32 {
    // 0: success
    // 11: config error
    // 20: server / IO error
    // 30: task rejected (protocol / sink)
    // 40: agent failure
    // 50: internal/uncategorized
    match e {
        CliError::Config(_) => 11,
        CliError::Server(_) => 20,
        CliError::Io(_) => 20,
        CliError::Task(te) => match te {
            TaskError::ProtocolViolation(_) => 30,
            TaskError::SinkRejected(_) => 30,
            TaskError::AgentFailure(_) => 40,
            TaskError::NotSupported(_) => 50,
        },
        CliError::Anyhow(_) => 50,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use zava_core::api::{AgentBackend, AgentError, SinkError, TaskRequest, TaskState};

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_load_config_from_explicit_path() {
        let f = write_config(
            r#"
[server]
port = 9100

[agent]
backend = "scripted"
"#,
        );

        let cfg = load_config(f.path().to_str()).unwrap();
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.server.host, "localhost");
        assert_eq!(cfg.agent.backend, AgentBackend::Scripted);
    }

    #[test]
    fn test_load_config_errors_are_config_errors() {
        let err = load_config(Some("/nonexistent/zava/config.toml")).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
        assert_eq!(exit_code_for_error(&err), 11);

        let f = write_config("[server\nport = ");
        let err = load_config(f.path().to_str()).unwrap_err();
        assert!(matches!(err, CliError::Config(m) if m.contains("parse config")));
    }

    #[tokio::test]
    async fn test_build_server_with_default_script() {
        let server = build_server(&AppConfig::default()).unwrap();
        assert_eq!(server.agent_card().url, "http://localhost:8001/");

        let resp = server
            .submit_task(TaskRequest {
                id: "t1".into(),
                input: "Which paint roller is best for smooth surfaces?".into(),
                context_id: None,
            })
            .await
            .unwrap();
        assert_eq!(resp.status, TaskState::Completed);
        assert!(!resp.output.is_empty());
    }

    #[test]
    fn test_build_server_http_backend_needs_url() {
        let mut cfg = AppConfig::default();
        cfg.agent.backend = AgentBackend::Http;
        cfg.agent.url = String::new();

        let err = build_server(&cfg).err().unwrap();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_build_server_missing_instructions_file() {
        let mut cfg = AppConfig::default();
        cfg.agent.instructions_file = Some("/nonexistent/zava/prompt.txt".into());

        let err = build_server(&cfg).err().unwrap();
        assert!(matches!(err, CliError::Config(m) if m.contains("instructions")));
    }

    #[test]
    fn test_exit_codes() {
        let cases = [
            (CliError::Server("bind failed".into()), 20),
            (
                CliError::Task(TaskError::ProtocolViolation("missing id".into())),
                30,
            ),
            (CliError::Task(TaskError::SinkRejected(SinkError::Closed)), 30),
            (
                CliError::Task(TaskError::AgentFailure(AgentError::Stream("reset".into()))),
                40,
            ),
            (CliError::Task(TaskError::NotSupported("cancel")), 50),
        ];
        for (err, code) in cases {
            assert_eq!(exit_code_for_error(&err), code, "{err}");
        }
    }
}
