use clap::Parser;
use log_poller::{OutputSink, WatchConfig, watch_log};
use std::process;
use std::time::Duration;
use tokio_stream::StreamExt;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Follow a log file, printing each new line with a timestamp.
#[derive(Parser)]
#[command(name = "log-poller", about = "Follow a growing log file by polling", version)]
struct Args {
    /// Path to the log file.
    #[arg(short, long, default_value = "/var/log/cloud-init-output.log")]
    path: String,

    /// Poll interval in milliseconds.
    #[arg(short, long, default_value = "500")]
    interval_ms: u64,

    /// Where lines are written: "stdout" or "log".
    #[arg(short, long, default_value = "stdout")]
    output: OutputSink,

    /// Also poll as soon as the filesystem reports a change.
    #[arg(long)]
    notify: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env().add_directive(LevelFilter::from_level(level).into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    let config = WatchConfig::default()
        .with_interval(Duration::from_millis(args.interval_ms))
        .with_wake_on_change(args.notify);

    let mut stream = match watch_log(&args.path, config).await {
        Ok(stream) => stream,
        Err(e) => {
            error!("Error setting up log poller: {}", e);
            process::exit(1);
        }
    };

    info!(
        path = %args.path,
        interval_ms = args.interval_ms,
        output = %args.output,
        "Watching file"
    );

    loop {
        tokio::select! {
            line = stream.next() => match line {
                Some(line) => args.output.emit(&line),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted; shutting down");
                break;
            }
        }
    }
}
