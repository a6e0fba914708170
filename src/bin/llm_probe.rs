//! llm-probe — 聊天补全服务连通性探测命令行工具
//!
//! Usage:
//!   llm-probe [all]            List models, direct HTTP probe, client probe, sweep
//!   llm-probe models           List models only
//!   llm-probe direct           Hand-built chat/completions request only
//!   llm-probe chat             One client-mediated chat request
//!   llm-probe sweep            Client probe over model-name variants

use anyhow::Context;
use llm_probe::config::ConfigFile;
use llm_probe::{ProbeConfig, ProbeConfigBuilder, Prober};
use std::io::{ErrorKind, Write};
use std::process::exit;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    All,
    Models,
    Direct,
    Chat,
    Sweep,
    Help,
    Version,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    config: Option<String>,
    base_url: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
    prompt: Option<String>,
    candidates: Option<Vec<String>>,
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (command, options) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("Error: {msg}");
            eprintln!();
            print_usage();
            exit(1);
        }
    };

    match command {
        Command::Help => print_usage(),
        Command::Version => println!("llm-probe {}", env!("CARGO_PKG_VERSION")),
        _ => {
            if let Err(e) = run(command, options).await {
                // Reader went away (e.g. `| head`); the probes themselves ran.
                if is_broken_pipe(&e) {
                    return;
                }
                eprintln!("Error: {e:#}");
                exit(1);
            }
        }
    }
}

fn print_usage() {
    println!(
        r#"llm-probe — connectivity probe for chat-completion endpoints

USAGE:
    llm-probe [COMMAND] [OPTIONS]

COMMANDS:
    all                         Run every probe and print a summary (default)
    models                      List available models
    direct                      Send a hand-built chat/completions request
    chat                        Send one chat request through the client
    sweep                       Repeat the chat request for each model-name variant
    version                     Show version information
    help                        Show this help message

OPTIONS:
    --config <path>             YAML config file
    --base-url <url>            API base URL
    --api-key <key>             API key (prefer LLM_PROBE_API_KEY)
    --model <name>              Model for the direct and chat probes
    --prompt <text>             Prompt to send
    --candidates <a,b,...>      Model names for the sweep
    --timeout <secs>            HTTP timeout in seconds

ENVIRONMENT:
    LLM_PROBE_API_KEY           API key (falls back to GEMINI_API_KEY)
    LLM_PROBE_BASE_URL          API base URL
    LLM_PROBE_MODEL             Model name
    LLM_PROBE_TIMEOUT_SECS      HTTP timeout in seconds
    LLM_PROBE_PROXY_URL         Proxy for all requests
    LLM_PROBE_CONFIG            YAML config file
    RUST_LOG                    Log filter for stderr diagnostics (default: warn)"#
    );
}

fn parse_args(args: &[String]) -> Result<(Command, Options), String> {
    let mut command = None;
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{flag} requires a value"))
        };
        match arg.as_str() {
            "--config" => options.config = Some(value(arg.as_str())?),
            "--base-url" => options.base_url = Some(value(arg.as_str())?),
            "--api-key" => options.api_key = Some(value(arg.as_str())?),
            "--model" => options.model = Some(value(arg.as_str())?),
            "--prompt" => options.prompt = Some(value(arg.as_str())?),
            "--candidates" => {
                let list: Vec<String> = value(arg.as_str())?
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                options.candidates = Some(list);
            }
            "--timeout" => {
                let raw = value(arg.as_str())?;
                let secs = raw
                    .parse::<u64>()
                    .map_err(|_| format!("invalid --timeout value: {raw}"))?;
                options.timeout_secs = Some(secs);
            }
            "help" | "--help" | "-h" => command = Some(Command::Help),
            "version" | "--version" | "-V" => command = Some(Command::Version),
            other if other.starts_with('-') => return Err(format!("Unknown option: {other}")),
            other => {
                if command.is_some() {
                    return Err(format!("Unexpected argument: {other}"));
                }
                command = Some(match other {
                    "all" => Command::All,
                    "models" => Command::Models,
                    "direct" => Command::Direct,
                    "chat" => Command::Chat,
                    "sweep" => Command::Sweep,
                    _ => return Err(format!("Unknown command: {other}")),
                });
            }
        }
    }

    Ok((command.unwrap_or(Command::All), options))
}

fn load_config(options: Options) -> anyhow::Result<ProbeConfig> {
    let mut builder = ProbeConfigBuilder::new();

    let config_path = options
        .config
        .or_else(|| std::env::var("LLM_PROBE_CONFIG").ok());
    if let Some(path) = config_path {
        let file = ConfigFile::load(&path).with_context(|| format!("reading {path}"))?;
        builder = builder.merge_file(file);
    }
    builder = builder.merge_env();

    if let Some(v) = options.api_key {
        builder = builder.api_key(v);
    }
    if let Some(v) = options.base_url {
        builder = builder.base_url(v);
    }
    if let Some(v) = options.model {
        builder = builder.model(v);
    }
    if let Some(v) = options.prompt {
        builder = builder.prompt(v);
    }
    if let Some(v) = options.candidates {
        builder = builder.candidates(v);
    }
    if let Some(v) = options.timeout_secs {
        builder = builder.timeout_secs(v);
    }

    Ok(builder.keyring_fallback().build()?)
}

async fn run(command: Command, options: Options) -> anyhow::Result<()> {
    let config = load_config(options)?;
    tracing::info!(base_url = %config.base_url(), model = %config.model, "starting probe");

    let prober = Prober::new(&config)?;
    let mut out = std::io::stdout().lock();

    match command {
        Command::Models => {
            prober.list_models(&mut out).await?;
        }
        Command::Direct => {
            prober.direct(&mut out).await?;
        }
        Command::Chat => {
            prober.client_chat(&config.model, &mut out).await?;
        }
        Command::Sweep => {
            prober.sweep(&mut out).await?;
        }
        _ => {
            prober.run_all(&mut out).await?;
        }
    }
    out.flush()?;
    Ok(())
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == ErrorKind::BrokenPipe)
    })
}
