use chancore::core::metrics;
use chancore::SessionMode;
use teloxide::prelude::*;

use super::entities::{
    build_add_instructions, build_broadcast_prompt, build_delete_result, build_entity_detail, build_entity_list,
    build_entity_stats, build_global_stats, build_send_prompt, not_found_alert,
};
use super::main_menu::edit_main_menu;
use crate::i18n;
use crate::telegram::handlers::{HandlerDeps, HandlerError, SessionDialogue};
use crate::telegram::markdown::edit_markdown;
use crate::telegram::MenuAction;

/// Handles callback queries from the menu inline keyboards.
///
/// Every query is answered exactly once. Unknown tokens are answered and
/// otherwise ignored. Views replace the menu message in place.
pub async fn handle_menu_callback(
    bot: Bot,
    q: CallbackQuery,
    dialogue: SessionDialogue,
    deps: HandlerDeps,
) -> Result<(), HandlerError> {
    let action = q.data.as_deref().and_then(MenuAction::parse);
    let message = q.message.as_ref().map(|m| (m.chat().id, m.id()));

    let (Some(action), Some((chat_id, message_id))) = (action, message) else {
        log::debug!("Ignoring callback {:?} from user {}", q.data, q.from.id);
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };

    metrics::record_callback(action.label());
    log::debug!("Callback {} from user {} in chat {}", action.to_data(), q.from.id, chat_id);

    let lang = i18n::lang_for_user(Some(&q.from));

    match action {
        MenuAction::Manage(kind) => {
            bot.answer_callback_query(q.id.clone()).await?;
            let (text, keyboard) = build_entity_list(&lang, kind, &deps.store.list(kind));
            edit_markdown(&bot, chat_id, message_id, text, keyboard).await?;
        }
        MenuAction::AddInstructions(kind) => {
            bot.answer_callback_query(q.id.clone()).await?;
            let (text, keyboard) = build_add_instructions(&lang, kind);
            edit_markdown(&bot, chat_id, message_id, text, keyboard).await?;
        }
        MenuAction::Broadcast => {
            bot.answer_callback_query(q.id.clone()).await?;
            dialogue.update(SessionMode::AwaitingBroadcast).await?;
            let (text, keyboard) = build_broadcast_prompt(&lang);
            edit_markdown(&bot, chat_id, message_id, text, keyboard).await?;
        }
        MenuAction::Stats => {
            bot.answer_callback_query(q.id.clone()).await?;
            let (channels, groups) = deps.store.counts();
            let (text, keyboard) = build_global_stats(&lang, channels, groups);
            edit_markdown(&bot, chat_id, message_id, text, keyboard).await?;
        }
        MenuAction::BackToMain => {
            bot.answer_callback_query(q.id.clone()).await?;
            edit_main_menu(&bot, chat_id, message_id, &lang, &q.from.first_name).await?;
        }
        MenuAction::Detail(target) => match deps.store.get(target.kind, &target.id) {
            Some(record) => {
                bot.answer_callback_query(q.id.clone()).await?;
                let (text, keyboard) = build_entity_detail(&lang, &target, &record);
                edit_markdown(&bot, chat_id, message_id, text, keyboard).await?;
            }
            None => alert(&bot, &q, not_found_alert(&lang, target.kind)).await?,
        },
        MenuAction::EntityStats(target) => match deps.store.get(target.kind, &target.id) {
            Some(record) => {
                bot.answer_callback_query(q.id.clone()).await?;
                let (text, keyboard) = build_entity_stats(&lang, &target, &record);
                edit_markdown(&bot, chat_id, message_id, text, keyboard).await?;
            }
            None => alert(&bot, &q, not_found_alert(&lang, target.kind)).await?,
        },
        MenuAction::Delete(target) => {
            let deleted = deps.store.remove(target.kind, &target.id);
            if deleted {
                log::info!("User {} deleted {} {}", q.from.id, target.kind.singular(), target.id);
            }
            bot.answer_callback_query(q.id.clone()).await?;
            let (text, keyboard) = build_delete_result(&lang, target.kind, deleted);
            edit_markdown(&bot, chat_id, message_id, text, keyboard).await?;
        }
        MenuAction::Send(target) => match deps.store.get(target.kind, &target.id) {
            Some(record) => {
                let (text, keyboard) = build_send_prompt(&lang, &target, &record);
                bot.answer_callback_query(q.id.clone()).await?;
                dialogue.update(SessionMode::AwaitingMessage(target)).await?;
                edit_markdown(&bot, chat_id, message_id, text, keyboard).await?;
            }
            None => alert(&bot, &q, not_found_alert(&lang, target.kind)).await?,
        },
    }

    Ok(())
}

async fn alert(bot: &Bot, q: &CallbackQuery, text: String) -> ResponseResult<()> {
    bot.answer_callback_query(q.id.clone())
        .text(text)
        .show_alert(true)
        .await?;
    Ok(())
}
