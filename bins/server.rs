use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};

fn main() -> ExitCode {
    // Load .env early so RUST_LOG and config overrides apply everywhere.
    dotenv().ok();

    // Thread count from config.toml, else TOKIO_WORKER_THREADS, else runtime default.
    let worker_threads = configs::AppConfig::load_and_validate()
        .ok()
        .and_then(|cfg| cfg.server.worker_threads)
        .or_else(|| {
            std::env::var("TOKIO_WORKER_THREADS")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
        });

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to build tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    rt.block_on(async {
        tokio::select! {
            res = server::run() => match res {
                Ok(()) => {
                    info!("server stopped normally");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!(error = %e, "server exited with error");
                    eprintln!("server error: {e}");
                    ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("received Ctrl+C, shutting down");
                ExitCode::SUCCESS
            }
        }
    })
}
