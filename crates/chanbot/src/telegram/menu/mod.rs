mod callback_router;
mod entities;
mod main_menu;

pub use callback_router::handle_menu_callback;
pub use entities::{
    build_add_instructions, build_broadcast_prompt, build_delete_result, build_entity_detail, build_entity_list,
    build_entity_stats, build_global_stats, build_send_prompt, not_found_alert,
};
pub use main_menu::{build_main_menu, edit_main_menu, send_main_menu_as_new};
