//! Justice CLI and REST API entry point.
//!
//! Binary name: `justice`
//!
//! Parses CLI arguments, loads configuration, then dispatches to the
//! appropriate command handler or starts the REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing::{error, info};

use cli::{Cli, Commands, OutputMode};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn,justice_api=info",
        1 => "info,justice_api=debug,justice_core=debug,justice_infra=debug",
        _ => "trace",
    };
    justice_observe::tracing_setup::init_tracing(filter, cli.json, cli.otel)
        .map_err(|e| anyhow::anyhow!(e))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "justice", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.data_dir.clone()).await?;
    let output = cli.output();

    let result = match cli.command {
        Commands::Serve { host, port } => serve(state, host, port, output).await,
        Commands::Ingest { paths, rebuild } => {
            cli::ingest::ingest(&state, paths, rebuild, output).await
        }
        Commands::Status { check } => cli::status::status(&state, check, output).await,
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    justice_observe::tracing_setup::shutdown_tracing();
    result
}

/// Bind, start building the chains in the background, and serve until
/// Ctrl+C or SIGTERM.
async fn serve(
    state: AppState,
    host: Option<String>,
    port: Option<u16>,
    output: OutputMode,
) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| state.config.server.host.clone());
    let port = port.unwrap_or(state.config.server.port);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    if output == OutputMode::Styled {
        println!(
            "  {} JusticeAI backend listening on {}",
            console::style("⚖").bold(),
            console::style(format!("http://{addr}")).cyan()
        );
        println!("  {}", console::style("Press Ctrl+C to stop").dim());
    }
    info!(%addr, "listening");

    let builder = state.clone();
    tokio::spawn(async move {
        info!("building retriever and chains");
        match builder.build_chat_service().await {
            Ok(service) => {
                builder.install(service).await;
                info!("chains ready");
            }
            Err(e) => error!(error = %e, "failed to build chains; /api/chat will answer 503"),
        }
    });

    let router = http::router::build_router(state.clone());

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.teardown().await;
    if output == OutputMode::Styled {
        println!("\n  Server stopped.");
    }
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
