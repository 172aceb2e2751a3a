use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cparser::{
    ClangAstProvider, Session, Settings,
    batch::{extract_files, render_reports},
    gateway,
};

/// Extract function and variable declarations from C/C++ files.
///
/// With file arguments, prints a JSON symbol report. Without, serves the
/// JSON-RPC query gateway.
#[derive(Parser, Debug)]
#[command(name = "cparser", version, about)]
struct Args {
    /// Source files to report on.
    files: Vec<String>,

    /// Configuration file (default: nearest cparser.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, short)]
    verbose: bool,

    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Gateway host (service mode).
    #[arg(long)]
    host: Option<String>,

    /// Gateway port (service mode).
    #[arg(long)]
    port: Option<u16>,
}

fn init_logging(
    args: &Args,
    settings: &Settings,
) {
    let level = if args.verbose {
        "debug"
    } else {
        settings.logging.level.as_directive()
    };

    let file_layer = args.log_file.as_ref().map(|log_path| {
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new(".")),
            log_path.file_name().unwrap_or(std::ffi::OsStr::new("cparser.log")),
        );
        fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_target(false)
            .with_filter(EnvFilter::new(format!("cparser={level},tower_lsp=info")))
    });

    // stdout carries reports and the readiness line; logs go to stderr.
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(EnvFilter::new(format!("cparser={level},tower_lsp=warn")));

    tracing_subscriber::registry().with(file_layer).with(stderr_layer).init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let start = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let (mut settings, config_path) = match Settings::load(args.config.as_deref(), &start) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("cparser: {err}");
            return ExitCode::FAILURE;
        },
    };
    if let Some(host) = &args.host {
        settings.server.host = host.clone();
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }

    init_logging(&args, &settings);
    info!("Starting cparser v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &config_path {
        info!("Config file: {}", path.display());
    }

    let provider = ClangAstProvider::new(settings.compiler.clone());

    if args.files.is_empty() {
        run_service(provider, &settings).await
    } else {
        run_batch(&provider, &args.files)
    }
}

fn run_batch(
    provider: &ClangAstProvider,
    files: &[String],
) -> ExitCode {
    let reports = extract_files(provider, files);
    match render_reports(files, &reports) {
        Ok(Some(json)) => {
            println!("{json}");
            ExitCode::SUCCESS
        },
        Ok(None) => ExitCode::FAILURE,
        Err(err) => {
            error!("failed to serialize reports: {err}");
            ExitCode::FAILURE
        },
    }
}

async fn run_service(
    provider: ClangAstProvider,
    settings: &Settings,
) -> ExitCode {
    let session = Arc::new(Session::new(provider));
    let address = settings.server.address();

    let served = gateway::bind_and_serve(&address, session, |local| {
        println!("cparser gateway listening on {local}");
    })
    .await;

    match served {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("gateway stopped: {err}");
            ExitCode::FAILURE
        },
    }
}
