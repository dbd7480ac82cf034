//! Blind-Spot Detection Replay - Main Entry Point

use std::io::Write;

use bsd_engine::EngineConfig;
use bsd_runner::{init_logging, CliArgs, Replayer, TraceFrame};
use tokio::io::AsyncReadExt;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\nusage: {}", e, CliArgs::USAGE);
            std::process::exit(2);
        }
    };
    init_logging(args.json_logs)?;

    info!("=== BSD Replay v{} ===", env!("CARGO_PKG_VERSION"));

    let config = EngineConfig::load(args.config.as_deref())?;
    if let Err(e) = config.validate() {
        warn!("Continuing with questionable configuration: {}", e);
    }

    let text = match &args.trace {
        Some(path) => {
            info!("Reading trace from {}", path.display());
            tokio::fs::read_to_string(path).await?
        }
        None => {
            info!("Reading trace from stdin");
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            text
        }
    };
    let frames = TraceFrame::parse_all(&text)?;
    info!("Loaded {} frames", frames.len());

    let mut replayer = Replayer::new(config, args.cleanup_every);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for frame in frames {
        for record in replayer.run_frame(frame).await? {
            writeln!(out, "{}", serde_json::to_string(&record)?)?;
        }
    }
    out.flush()?;

    info!(
        "Replayed {} cycles across {} egos",
        replayer.cycles(),
        replayer.engine_count()
    );
    replayer.summary().report();
    replayer.coverage().report("replay");

    Ok(())
}
