use std::sync::Arc;

use anyhow::Result;

use zava_core::api::{AgentBackend, AgentStream, AppConfig, ScriptedAgent};

use crate::agent::HttpAgent;

/// Builds the agent backend selected by `cfg.agent.backend`.
///
/// `instructions` is the already-loaded prompt text; only remote agents use it.
pub fn build_agent(cfg: &AppConfig, instructions: Option<String>) -> Result<Arc<dyn AgentStream>> {
    let agent_cfg = &cfg.agent;
    match agent_cfg.backend {
        AgentBackend::Scripted => {
            if agent_cfg.script.is_empty() {
                tracing::warn!(
                    target: "zava.agent",
                    "scripted agent has an empty script; every task ends on exhaustion"
                );
            }
            Ok(Arc::new(ScriptedAgent::new(agent_cfg.script.clone())))
        }
        AgentBackend::Http => {
            let agent = HttpAgent::new(
                agent_cfg.url.clone(),
                agent_cfg.api_key.clone(),
                agent_cfg.timeout_ms,
                instructions,
            )?;
            tracing::info!(target: "zava.agent", url = %agent.url(), "using remote agent");
            Ok(Arc::new(agent))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_scripted_by_default() {
        let agent = build_agent(&AppConfig::default(), None).unwrap();
        assert_eq!(agent.name(), "scripted");
    }

    #[test]
    fn test_build_http_requires_url() {
        let mut cfg = AppConfig::default();
        cfg.agent.backend = AgentBackend::Http;
        assert!(build_agent(&cfg, None).is_err());

        cfg.agent.url = "http://127.0.0.1:7000/stream".into();
        let agent = build_agent(&cfg, Some("Be concise.".into())).unwrap();
        assert_eq!(agent.name(), "http");
    }
}
