//! Agent card: the static capability descriptor served at `/agent-card`.

use serde::{Deserialize, Serialize};

use crate::config::{CardConfig, ServerConfig};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSkill {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCapabilities {
    pub streaming: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    pub name: String,
    pub description: String,
    pub url: String,
    pub version: String,
    pub default_input_modes: Vec<String>,
    pub default_output_modes: Vec<String>,
    pub capabilities: AgentCapabilities,
    pub skills: Vec<AgentSkill>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn product_helper_skill() -> AgentSkill {
    AgentSkill {
        id: "product_helper_sk".to_string(),
        name: "Zava Product Helper".to_string(),
        description: "Handles customer inquiries about Zava products, including features, \
                      pricing, and ranking products based on customer needs."
            .to_string(),
        tags: strings(&["product", "catalog", "customer-support", "semantic-kernel"]),
        examples: strings(&[
            "Which paint roller is best for smooth surfaces?",
            "Sell me on the benefits of the Zava paint sprayer.",
            "How many different types of paint brushes do you offer?",
            "What are the three most popular colors of paint?",
        ]),
    }
}

impl AgentCard {
    pub fn build(card: &CardConfig, server: &ServerConfig) -> Self {
        Self {
            name: card.name.clone(),
            description: card.description.clone(),
            url: format!("http://{}:{}/", server.host, server.port),
            version: card.version.clone(),
            default_input_modes: strings(&["text"]),
            default_output_modes: strings(&["text"]),
            capabilities: AgentCapabilities {
                streaming: card.streaming,
            },
            skills: vec![product_helper_skill()],
        }
    }
}
