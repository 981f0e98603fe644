use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;

use chanbot::cli::{Cli, Commands};
use chanbot::inspect::run_inspect;
use chanbot::supervisor::run_with_restarts;
use chanbot::telegram::{create_bot, schema, setup_bot_commands, wait_for_bot_api, HandlerDeps, HandlerError};
use chancore::core::{config, init_logger, log_startup_configuration, metrics, web_server};
use chancore::{SessionMode, Store};

/// Main entry point for the channel manager bot
///
/// Parses CLI arguments and dispatches to the appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, bot creation, Bot API handshake).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Panics inside the dispatcher task are caught through its JoinHandle; log them too
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
        if let Some(msg) = panic_info.payload().downcast_ref::<&str>() {
            log::error!("Panic message: {}", msg);
        }
    }));

    // Staging values must win over .env, and dotenvy never overrides what is already set
    let staging_env = match cli.command {
        Some(Commands::RunStaging) => Some(dotenvy::from_filename(".env.staging")),
        _ => None,
    };
    let _ = dotenvy::dotenv();

    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        None | Some(Commands::Run) => {
            log::info!("Running bot in normal mode");
            run_bot().await
        }
        Some(Commands::RunStaging) => {
            log::info!("Running bot in staging mode");
            match staging_env {
                Some(Ok(path)) => log::info!("Loaded staging environment from {}", path.display()),
                Some(Err(e)) => log::warn!("Failed to load .env.staging: {}", e),
                None => {}
            }
            run_bot().await
        }
        Some(Commands::Inspect { json }) => run_inspect(Path::new(config::DATA_FILE.as_str()), json),
    }
}

/// Run the Telegram bot together with the health server
async fn run_bot() -> Result<()> {
    log::info!("Starting bot...");
    log_startup_configuration();
    metrics::init_metrics();

    // The health server answers even when the bot cannot start
    let port = *config::web::PORT;
    let web_server_handle = tokio::spawn(async move {
        if let Err(e) = web_server::start_web_server(port).await {
            log::error!("Web server error: {}", e);
        }
    });

    let store = Arc::new(Store::open(config::DATA_FILE.as_str()));

    if !config::has_bot_token() {
        log::error!("BOT_TOKEN is not set; the bot will not start. Serving health checks only.");
        web_server_handle.await?;
        return Ok(());
    }

    let handler = schema(HandlerDeps::simulated(Arc::clone(&store)));

    // Startup failures and dispatcher panics both restart; the health server keeps serving
    run_with_restarts(|| run_dispatcher(handler.clone()), config::retry::restart_delay()).await;

    Ok(())
}

/// Connects to the Bot API and runs one dispatcher until it stops.
///
/// A fresh dispatcher (and session storage) is built on every call, so
/// session modes do not survive a restart.
async fn run_dispatcher(handler: UpdateHandler<HandlerError>) -> Result<()> {
    let bot = create_bot()?;
    let me = wait_for_bot_api(&bot).await?;
    log::info!("Bot username: {:?}, Bot ID: {}", me.username, me.id);

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    log::info!("================================================");
    log::info!("📡 Ready to receive updates (long polling)");
    log::info!("================================================");

    let handle = tokio::spawn(async move {
        let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![InMemStorage::<SessionMode>::new()])
            .enable_ctrlc_handler()
            .build()
            .dispatch_with_listener(
                listener,
                LoggingErrorHandler::with_custom_text("An error from the update listener"),
            )
            .await
    });

    match handle.await {
        Ok(()) => Ok(()),
        Err(join_err) if join_err.is_panic() => Err(anyhow!("dispatcher panicked: {}", join_err)),
        Err(join_err) => {
            log::warn!("Dispatcher task was cancelled: {}", join_err);
            Ok(())
        }
    }
}
