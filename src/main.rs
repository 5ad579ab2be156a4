mod browser;
mod cli;
mod config;
mod cors;
mod error;
mod handlers;
mod models;
mod netaddr;
mod pages;
mod qr;
mod storage;

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::config::{Config, Mode};
use crate::storage::RootDir;

pub struct AppState {
    pub config: Config,
    pub root: RootDir,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let root = RootDir::new(config.root.clone());
        Self { config, root }
    }
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            if e.use_stderr() {
                println!();
                println!("{}", Cli::command().render_help());
            }
            std::process::exit(code);
        }
    };

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qrdrop=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let advertise_host = netaddr::advertise_host();
    let config = match cli.into_config(advertise_host) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let base_url = config.base_url();
    let state = Arc::new(AppState::new(config.clone()));
    tracing::info!("Root directory: {}", state.root.path().display());
    match config.mode {
        Mode::Upload => tracing::info!("Upload mode, scan the QR code at {}", base_url),
        Mode::Browse => tracing::info!("Browse mode, open {}", base_url),
    }

    let app = handlers::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if config.open_browser {
        browser::spawn_launch(base_url.clone());
    }

    let action = match config.mode {
        Mode::Upload => "Scan to upload",
        Mode::Browse => "Browse files",
    };
    println!(r#"
    ╔═══════════════════════════════════════════════════════╗
    ║   QrDrop                                              ║
    ║                                                       ║
    ║   {:<15} {:<35} ║
    ║                                                       ║
    ╚═══════════════════════════════════════════════════════╝
    "#, action, base_url);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
