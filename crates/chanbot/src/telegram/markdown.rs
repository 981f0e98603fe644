//! MarkdownV2 send/edit helpers.
//!
//! Texts are escaped ahead of time, but a chat title with an unexpected
//! character can still break parsing. On a parse error the request is retried
//! once with the whole text escaped.

use chancore::core::utils::escape_markdown_v2;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, MessageId, ParseMode};
use teloxide::RequestError;

fn is_markdown_parse_error(err: &RequestError) -> bool {
    err.to_string().to_lowercase().contains("can't parse entities")
}

fn is_not_modified_error(err: &RequestError) -> bool {
    matches!(err, RequestError::Api(teloxide::ApiError::MessageNotModified))
}

/// Send a MarkdownV2 message and auto-escape on parse errors.
pub async fn send_markdown(
    bot: &Bot,
    chat_id: ChatId,
    text: impl Into<String>,
    keyboard: Option<InlineKeyboardMarkup>,
) -> ResponseResult<Message> {
    let raw_text = text.into();
    let mut req = bot
        .send_message(chat_id, raw_text.clone())
        .parse_mode(ParseMode::MarkdownV2);
    if let Some(kb) = keyboard.clone() {
        req = req.reply_markup(kb);
    }

    match req.await {
        Ok(msg) => Ok(msg),
        Err(e) if is_markdown_parse_error(&e) => {
            log::warn!("MarkdownV2 rejected, resending escaped: {}", e);
            let mut retry = bot
                .send_message(chat_id, escape_markdown_v2(&raw_text))
                .parse_mode(ParseMode::MarkdownV2);
            if let Some(kb) = keyboard {
                retry = retry.reply_markup(kb);
            }
            retry.await
        }
        Err(e) => Err(e),
    }
}

/// Edit a menu message in place.
///
/// "message is not modified" (same button pressed twice) counts as success.
pub async fn edit_markdown(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    text: impl Into<String>,
    keyboard: InlineKeyboardMarkup,
) -> ResponseResult<()> {
    let raw_text = text.into();
    let result = bot
        .edit_message_text(chat_id, message_id, raw_text.clone())
        .parse_mode(ParseMode::MarkdownV2)
        .reply_markup(keyboard.clone())
        .await;

    match result {
        Ok(_) => Ok(()),
        Err(e) if is_not_modified_error(&e) => Ok(()),
        Err(e) if is_markdown_parse_error(&e) => {
            log::warn!("MarkdownV2 rejected, editing with escaped text: {}", e);
            bot.edit_message_text(chat_id, message_id, escape_markdown_v2(&raw_text))
                .parse_mode(ParseMode::MarkdownV2)
                .reply_markup(keyboard)
                .await?;
            Ok(())
        }
        Err(e) => Err(e),
    }
}
