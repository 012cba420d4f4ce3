//! ChatDDX web client entry point.
//!
//! Binary name: `chatddx`
//!
//! Parses CLI arguments, loads the configuration, then dispatches to the
//! command handler or starts the web server.

mod cli;

use clap::Parser;
use clap_complete::generate;

use chatddx_api::http::router::build_router;
use chatddx_api::state::AppState;
use chatddx_infra::config::{load_config, validate};
use chatddx_observe::tracing_setup::{init_tracing, shutdown_tracing};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need config or logging
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "chatddx", &mut std::io::stdout());
        return Ok(());
    }

    let otel = matches!(cli.command, Commands::Serve { otel: true, .. });
    init_tracing(cli.log_filter(), otel).map_err(|e| anyhow::anyhow!(e))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Serve {
            port,
            host,
            api_ssr,
            otel: _,
        } => {
            if let Some(api_ssr) = api_ssr {
                config.api_ssr = api_ssr;
                validate(&config)?;
            }

            let api_ssr = config.api_ssr.clone();
            let state = AppState::new(config)?;
            let router = build_router(state);

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            tracing::info!(%addr, backend = %api_ssr, "listening");
            if !cli.quiet {
                println!(
                    "  {} ChatDDX listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!(
                    "  {} {}",
                    console::style("Backend").dim(),
                    console::style(&api_ssr).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Check { session, lang } => {
            let ok = cli::check::check(&config, session, lang, cli.json).await?;
            if !ok {
                anyhow::bail!("backend check failed");
            }
        }

        Commands::Config => {
            cli::config::show_config(&config, cli.json)?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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

    tracing::info!("shutdown signal received");
}
