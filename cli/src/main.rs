use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use zava_cli::bootstrap::{build_server, exit_code_for_error, load_config};
use zava_cli::commands::{ask, cli};
use zava_cli::http;
use zava_core::api::{AppConfig, CliError, LoggingConfig};

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let mut args = cli::Args::parse();
    let cfg = load_config(args.config.as_deref())?;
    init_tracing(&cfg.logging).map_err(CliError::Config)?;

    let cmd = args
        .command
        .take()
        .unwrap_or(cli::Commands::Serve(cli::ServeArgs::default()));

    dispatch(cmd, cfg).await
}

async fn dispatch(cmd: cli::Commands, mut cfg: AppConfig) -> Result<i32, CliError> {
    match cmd {
        cli::Commands::Serve(serve_args) => {
            if let Some(host) = serve_args.host {
                cfg.server.host = host;
            }
            if let Some(port) = serve_args.port {
                cfg.server.port = port;
            }
            let server = build_server(&cfg)?;
            http::start_server(&cfg.server, server).await?;
            Ok(0)
        }
        cli::Commands::Card => {
            let server = build_server(&cfg)?;
            let card = serde_json::to_string_pretty(&server.agent_card())
                .map_err(anyhow::Error::from)?;
            println!("{card}");
            Ok(0)
        }
        cli::Commands::Ask(ask_args) => {
            let server = build_server(&cfg)?;
            let mut stdout = std::io::stdout();
            ask::handle_ask(&server, ask_args, &mut stdout).await?;
            Ok(0)
        }
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("zava-helper"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("zava-helper.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
