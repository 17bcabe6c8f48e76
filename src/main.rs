use std::net::SocketAddr;
use std::sync::Arc;

use mokk::cli::{self, ExitReport, Invocation};
use mokk::config::{AppState, Config, Settings};
use mokk::error::StartupError;
use mokk::{logger, server};

fn main() {
    let config = match cli::parse_options(std::env::args_os().skip(1)) {
        Invocation::Serve(config) => config,
        Invocation::Exit(report) => exit_with(&report),
    };

    if let Err(e) = run(config) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Print what the command line parser reported and terminate
fn exit_with(report: &ExitReport) -> ! {
    for message in &report.messages {
        eprintln!("{message}");
    }
    if let Some(usage) = &report.usage {
        println!("{usage}");
    }
    std::process::exit(report.code)
}

fn run(config: Config) -> Result<(), StartupError> {
    let settings = Settings::load(config.settings_file.as_deref())?;
    logger::init(&settings.logging).map_err(StartupError::Logger)?;

    let addr = config
        .socket_addr(&settings.server.host)
        .map_err(|_| StartupError::Address(settings.server.host.clone()))?;

    // Tokio runtime, worker count from settings when given
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = settings.server.workers.filter(|w| *w > 0) {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build().map_err(StartupError::Runtime)?;

    runtime.block_on(async_main(addr, config, settings))
}

async fn async_main(
    addr: SocketAddr,
    config: Config,
    settings: Settings,
) -> Result<(), StartupError> {
    // Bind failures end the process before anything is served
    let listener = server::bind(addr)?;
    logger::log_server_start(&addr, &config);

    let state = Arc::new(AppState::new(config, settings));

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::serve(listener, state, server::shutdown_signal()))
        .await;
    Ok(())
}
