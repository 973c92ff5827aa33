use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "zava-helper", version, about = "Zava Product Helper task service")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file to use instead of ~/.zava/config.toml or ./config.toml.
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Overrides `server.host`.
    #[arg(long)]
    pub host: Option<String>,

    /// Overrides `server.port`.
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct AskArgs {
    /// Question for the product helper.
    pub input: String,

    /// Task id; a random one is used when omitted.
    #[arg(long)]
    pub id: Option<String>,

    /// Conversation to continue; a new one is started when omitted.
    #[arg(long)]
    pub context_id: Option<String>,

    /// Print every lifecycle event as a JSON line before the response.
    #[arg(long, default_value_t = false)]
    pub events: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default).
    Serve(ServeArgs),
    /// Print the agent card as JSON.
    Card,
    /// Run a single task against the configured agent.
    Ask(AskArgs),
}
