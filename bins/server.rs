use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // .env first so RUST_LOG and LOG_FORMAT apply
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    info!(service = "users", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "users",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let cfg = match server::startup::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(
                service = "users",
                event = "config_invalid",
                error = %e,
                "failed to load config"
            );
            return std::process::ExitCode::FAILURE;
        }
    };
    let worker_threads = cfg.server.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(
                service = "users",
                event = "runtime_build_failed",
                error = %e,
                "failed to build tokio runtime"
            );
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "users",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "user service starting"
    );

    // server::run owns the Ctrl+C handling and returns once connections drain.
    rt.block_on(async move {
        match server::run(cfg).await {
            Ok(()) => {
                info!(
                    service = "users",
                    event = "stop",
                    %service_id,
                    pid,
                    "server stopped normally"
                );
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                error!(
                    service = "users",
                    event = "run_failed",
                    error = %e,
                    "server::run returned error"
                );
                std::process::ExitCode::FAILURE
            }
        }
    })
}
