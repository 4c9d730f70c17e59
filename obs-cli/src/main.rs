//! CLI entry point for obs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use obs_core::config::{Config, ConfigLoader};
use obs_core::logging::init_logging;
use obs_core::session::{decode, encode};
use obs_core::Session;
use obs_server::{run_server, AppState};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tokio::sync::broadcast;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "obs")]
#[command(about = "Observer backend keeping session state in a client cookie")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration directory
    #[arg(short, long, global = true)]
    config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Directory of static UI files
        #[arg(short, long)]
        static_dir: Option<String>,
    },
    /// Print the cookie value for a session
    Encode {
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        lon: f64,
        #[arg(short, long)]
        target: Option<String>,
    },
    /// Print the session held in a cookie value
    Decode {
        /// Cookie value, without the `obs-session=` prefix
        value: String,
    },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_loader = if let Some(dir) = cli.config_dir {
        ConfigLoader::with_dir(dir)
    } else {
        ConfigLoader::new()
    };

    match cli.command {
        Commands::Serve {
            host,
            port,
            static_dir,
        } => {
            let mut config = config_loader.load()?;
            apply_serve_overrides(&mut config, host, port, static_dir);
            run_serve(config).await?;
        }
        Commands::Encode { lat, lon, target } => {
            println!("{}", encode_session(lat, lon, target)?);
        }
        Commands::Decode { value } => {
            let session = decode(value.trim())?;
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
        Commands::Config => {
            let config = config_loader.load()?;
            println!(
                "{} {}",
                style("Config directory:").bold(),
                config_loader.config_dir().display()
            );
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn apply_serve_overrides(
    config: &mut Config,
    host: Option<String>,
    port: Option<u16>,
    static_dir: Option<String>,
) {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(static_dir) = static_dir {
        config.server.static_dir = static_dir;
    }
}

fn encode_session(lat: f64, lon: f64, target: Option<String>) -> Result<String> {
    let mut session = Session::new(lat, lon);
    session.target = target;
    Ok(encode(&session)?)
}

fn bind_addr(config: &Config) -> Result<SocketAddr> {
    let ip: IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("invalid server.host '{}'", config.server.host))?;
    Ok(SocketAddr::new(ip, config.server.port))
}

async fn run_serve(config: Config) -> Result<()> {
    let _log_guard = init_logging(&config.logging)?;
    let addr = bind_addr(&config)?;

    println!("{}", style("Starting obs server...").bold().cyan());
    println!("Address: {}", addr);
    println!("Static files: {}", config.server.static_dir);
    println!("Session cookie: {}", config.session.cookie_name);

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Ctrl-C received"),
            Err(e) => error!("Failed to listen for Ctrl-C: {}", e),
        }
        let _ = shutdown_tx.send(());
    });

    run_server(AppState::new(&config), addr, shutdown_rx).await?;
    println!("{}", style("Server stopped.").green());
    Ok(())
}
