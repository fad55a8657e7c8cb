#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use session_render::{RenderError, RenderResult, batch_cmd, config, convert_cmd};

#[derive(Parser, Debug)]
#[command(name = "session-render")]
#[command(about = "Render agent session logs (JSON Lines) as self-contained HTML", long_about = None)]
struct Cli {
    /// Session log to render (required unless --batch)
    #[arg(required_unless_present = "batch", conflicts_with = "batch")]
    input: Option<PathBuf>,

    /// Output file (single mode, stdout when omitted) or output directory (batch mode)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render every session log under the sessions directory
    #[arg(long)]
    batch: bool,

    /// Sessions root for batch mode (default: $CODEX_HOME/sessions or ~/.codex/sessions)
    #[arg(long, value_name = "DIR")]
    sessions_dir: Option<PathBuf>,

    /// TOML config file (sessions_dir, output_dir, title)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging (or set SESSION_RENDER_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("SESSION_RENDER_LOG").unwrap_or_else(|_| {
        if verbose { "session_render=debug".to_string() } else { "session_render=info".to_string() }
    });
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn run(cli: Cli) -> RenderResult<()> {
    let cfg = config::load_optional(cli.config.as_deref())?;

    if cli.batch {
        let sessions_dir = config::sessions_dir_from_env(cli.sessions_dir, &cfg)?;
        let out_dir = config::resolve_batch_output(cli.output, &cfg);
        let summary = batch_cmd::run(&sessions_dir, &out_dir, cfg.title.as_deref())?;
        if !summary.failed.is_empty() {
            eprintln!("{} file(s) could not be converted:", summary.failed.len());
            for (path, reason) in &summary.failed {
                eprintln!("  {}: {reason}", path.display());
            }
        }
        return Ok(());
    }

    let input = cli
        .input
        .ok_or_else(|| RenderError::Message("an input file is required".to_string()))?;
    convert_cmd::run(input, cli.output)
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
