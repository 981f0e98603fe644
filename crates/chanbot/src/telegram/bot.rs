//! Bot initialization
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Startup handshake with the Bot API
//! - Command menu registration per language

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::types::{BotCommand, Me};
use teloxide::utils::command::BotCommands;
use tokio::time::sleep;

use crate::i18n;
use chancore::config;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "الأوامر المتاحة:")]
pub enum Command {
    #[command(description = "عرض القائمة الرئيسية")]
    Start,
    #[command(description = "عرض الأوامر المتاحة")]
    Help,
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Invalid BOT_API_URL or HTTP client setup failure
pub fn create_bot() -> anyhow::Result<Bot> {
    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    let bot = Bot::with_client(config::BOT_TOKEN.as_str(), client);

    let bot = match config::BOT_API_URL.as_deref() {
        Some(bot_api_url) => {
            log::info!("Using custom Bot API URL: {}", bot_api_url);
            let url = url::Url::parse(bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
            bot.set_api_url(url)
        }
        None => bot,
    };

    Ok(bot)
}

/// Calls `get_me` until the Bot API answers.
///
/// A local Bot API server may still be starting, so network-level failures are
/// retried up to `STARTUP_MAX_RETRIES` times. Other errors (bad token) fail fast.
pub async fn wait_for_bot_api(bot: &Bot) -> anyhow::Result<Me> {
    let max_retries = config::retry::STARTUP_MAX_RETRIES;
    let mut attempt = 0;
    loop {
        match bot.get_me().await {
            Ok(me) => return Ok(me),
            Err(e) => {
                let err_str = e.to_string();
                let is_retryable = matches!(e, teloxide::RequestError::Network(_))
                    || err_str.contains("restart")
                    || err_str.contains("timed out");

                attempt += 1;
                if attempt >= max_retries || !is_retryable {
                    return Err(anyhow::anyhow!(
                        "Failed to connect to Bot API after {} attempt(s): {}",
                        attempt,
                        e
                    ));
                }

                log::warn!(
                    "Bot API not ready (attempt {}/{}): {}. Retrying in {} seconds...",
                    attempt,
                    max_retries,
                    err_str,
                    config::retry::STARTUP_RETRY_DELAY_SECS
                );
                sleep(config::retry::startup_delay()).await;
            }
        }
    }
}

/// Sets up bot commands in Telegram UI
///
/// The default list comes from the `Command` descriptions; every other
/// supported language gets its own localized list.
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;

    for (code, _) in i18n::SUPPORTED_LANGS.iter().filter(|(code, _)| *code != "ar") {
        let lang = i18n::lang_from_code(code);
        bot.set_my_commands(vec![
            BotCommand::new("start", i18n::t(&lang, "command-start-description")),
            BotCommand::new("help", i18n::t(&lang, "command-help-description")),
        ])
        .language_code(code.to_string())
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        assert!(matches!(Command::parse("/start", "chanbot"), Ok(Command::Start)));
        assert!(matches!(Command::parse("/help@chanbot", "chanbot"), Ok(Command::Help)));
        assert!(Command::parse("/unknown", "chanbot").is_err());
    }

    #[test]
    fn test_descriptions_list_every_command() {
        let text = Command::descriptions().to_string();
        assert!(text.contains("/start"));
        assert!(text.contains("/help"));
    }
}
