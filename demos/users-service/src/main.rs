//! users-service
//!
//! Serves the user endpoints, then calls them back over HTTP through the
//! client binder to check that both ends agree.

mod endpoints;
mod service;
mod store;

use std::path::PathBuf;

use accord::prelude::{init_logging, AccordConfig, Client, ConfigLoader, Routes, Server};
use accord::server::bind_ephemeral;
use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::store::UserStore;

/// Command-line arguments.
struct Args {
    /// Path to a TOML or JSON configuration file.
    config: Option<PathBuf>,
    /// Exit after the self-check instead of serving until Ctrl-C.
    once: bool,
    /// Bind an ephemeral port instead of `server.http_addr`.
    ephemeral: bool,
}

impl Args {
    fn parse() -> anyhow::Result<Self> {
        let mut args = std::env::args().skip(1);
        let mut parsed = Self {
            config: None,
            once: false,
            ephemeral: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args.next().context("--config needs a path")?;
                    parsed.config = Some(PathBuf::from(path));
                }
                "--once" => parsed.once = true,
                "--ephemeral" => parsed.ephemeral = true,
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                other => anyhow::bail!("unknown argument: {other} (see --help)"),
            }
        }

        Ok(parsed)
    }
}

fn print_help() {
    println!(
        r"users-service - Accord demo

USAGE:
    users-service [OPTIONS]

OPTIONS:
    -c, --config <PATH>    Configuration file (TOML or JSON)
        --once             Exit after the self-check
        --ephemeral        Listen on a random local port
    -h, --help             Print help information

ENVIRONMENT VARIABLES:
    ACCORD__SERVER__HTTP_ADDR    Listen address (default: 127.0.0.1:8080)
    ACCORD__LOGGING__LEVEL       Log filter (default: info)
    ACCORD__LOGGING__JSON_FORMAT JSON log lines (default: true)
"
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse()?;

    let mut loader = ConfigLoader::new().with_dotenv()?;
    loader = match &args.config {
        Some(path) => loader.with_file(path)?,
        None => loader.with_optional_file("users-service.toml")?,
    };
    let config = loader
        .with_env_prefix("ACCORD")
        .load()
        .context("invalid configuration")?;

    init_logging(&config.logging)?;

    let store = UserStore::new();
    run(&args, &config, service::routes(&store)?).await
}

/// Serves `routes`, runs the self-check against them and, unless `--once`
/// is set, keeps serving until Ctrl-C. The server is stopped before a
/// failed self-check is returned.
async fn run(args: &Args, config: &AccordConfig, routes: Routes) -> anyhow::Result<()> {
    let (listener, addr) = if args.ephemeral {
        bind_ephemeral().await?
    } else {
        let addr = config.server.socket_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        let local = listener.local_addr()?;
        (listener, local)
    };

    let (stop, stopped) = oneshot::channel::<()>();
    let server = Server::new(routes, config.server.clone());
    let serving = tokio::spawn(server.serve(listener, async move {
        let _ = stopped.await;
    }));

    let mut client_config = config.client.clone();
    client_config.base_url = format!("http://{addr}/");
    let checked = match Client::from_config(&client_config) {
        Ok(client) => service::self_check(&client)
            .await
            .context("self-check failed"),
        Err(e) => Err(e.into()),
    };

    match &checked {
        Ok(listed) => {
            tracing::info!(listed = listed.len(), "self-check passed");
            if !args.once {
                tracing::info!(%addr, "serving until Ctrl-C");
                tokio::signal::ctrl_c()
                    .await
                    .context("failed to listen for Ctrl-C")?;
            }
        }
        Err(e) => {
            let error = format!("{e:#}");
            tracing::error!(%error, "self-check failed, stopping");
        }
    }

    // The server task may already have exited on its own.
    let _ = stop.send(());
    serving.await.context("server task panicked")??;
    checked.map(drop)
}
