//! Demo server binary
//!
//! Parses flags, loads configuration, and serves the demo front-ends until
//! interrupted. Exits 0 on interrupt-triggered shutdown and 1 on any
//! startup failure.

use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use demo_server::config::{AppState, Config};
use demo_server::{banner, browser, logger, server};

#[derive(Parser, Debug)]
#[command(
    name = "demo-server",
    version,
    about = "Serve the PowerPoint Generator and LLM Agent demo applications"
)]
struct Cli {
    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Directory to serve (defaults to the executable's directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Configuration file name, without extension
    #[arg(long, default_value = "demo")]
    config: String,

    /// Do not open the browser at startup
    #[arg(long)]
    no_browser: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut cfg = match Config::load_from(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    apply_overrides(&mut cfg, &cli);

    if let Err(e) = logger::init(&cfg) {
        eprintln!("❌ Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            logger::log_startup_error(&e);
            return ExitCode::FAILURE;
        }
    };

    // Failures inside run() are reported at the failure site
    match runtime.block_on(run(cfg)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

/// CLI flags take precedence over file and environment configuration
fn apply_overrides(cfg: &mut Config, cli: &Cli) {
    if let Some(port) = cli.port {
        cfg.server.port = port;
    }
    if let Some(host) = &cli.host {
        cfg.server.host = host.clone();
    }
    if let Some(root) = &cli.root {
        cfg.serve.root = Some(root.clone());
    }
    if cli.no_browser {
        cfg.browser.auto_open = false;
    }
}

async fn run(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    banner::print_title();

    let addr = match cfg.socket_addr() {
        Ok(addr) => addr,
        Err(e) => {
            logger::log_startup_error(&e);
            return Err(e.into());
        }
    };

    let state = match AppState::new(cfg) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            logger::log_startup_error(&e);
            return Err(e.into());
        }
    };

    let listener = match server::bind_listener(addr) {
        Ok(listener) => listener,
        Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
            logger::log_port_in_use(addr.port());
            return Err(e.into());
        }
        Err(e) => {
            logger::log_startup_error(&e);
            return Err(e.into());
        }
    };

    logger::log_listening(&addr);
    banner::print_startup(state.config.server.port);

    let shutdown = server::Shutdown::new();
    server::spawn_signal_listener(shutdown.clone());

    if state.config.browser.auto_open {
        let url = format!(
            "http://localhost:{}/{}",
            state.config.server.port, state.config.browser.landing_page
        );
        browser::launch(&browser::SystemBrowser, &url);
    }

    banner::print_running();
    server::run(listener, state, shutdown).await;

    banner::print_shutdown();
    Ok(())
}
