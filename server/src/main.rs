use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use common::{log, log_error, logger};
use tictactoe_server::cleanup_task::CleanupTask;
use tictactoe_server::player_store::YamlPlayerStore;
use tictactoe_server::server_config::{DEFAULT_CONFIG_FILE_NAME, ServerConfig, get_config_manager};
use tictactoe_server::session_manager::SessionManager;
use tictactoe_server::web_server::{WebServerState, run_web_server};

#[derive(Parser)]
#[command(name = "tictactoe_server", about = "Tic-tac-toe against a perfect computer opponent")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE_NAME)]
    config: PathBuf,

    #[arg(long)]
    use_log_prefix: bool,

    /// Write the default config to `--config` and exit.
    #[arg(long)]
    write_default_config: bool,
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log_error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    log!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager = get_config_manager(&args.config);

    if args.write_default_config {
        config_manager.set_config(&ServerConfig::default())?;
        log!("Default config written to {}", args.config.display());
        return Ok(());
    }

    let config = config_manager.get_config()?;
    let addr = config.socket_addr()?;
    log!(
        "Using config {} (bot: {:?}, players: {})",
        args.config.display(),
        config.bot,
        config.players_file.display()
    );

    let players = Arc::new(YamlPlayerStore::open(&config.players_file)?);
    let session_manager = SessionManager::new();

    let cleanup_task = CleanupTask::new(
        session_manager.clone(),
        config.cleanup_interval(),
        config.session_ttl(),
    );
    tokio::spawn(async move {
        cleanup_task.run().await;
    });

    let state = WebServerState::new(
        session_manager,
        players,
        config.bot,
        config.session_cookie_name.clone(),
    );

    run_web_server(state, config.static_dir.clone(), addr, shutdown_signal()).await?;

    log!("Server shut down gracefully");

    Ok(())
}
