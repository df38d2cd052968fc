pub mod cleanup_task;
pub mod player_store;
pub mod server_config;
pub mod session_manager;
pub mod views;
pub mod web_server;
