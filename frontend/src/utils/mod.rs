pub mod api;
pub mod auth;
pub mod map;
pub mod playground;
pub mod report;
pub mod scripts;
pub mod server;
pub mod session;
pub mod sim_client;
pub mod toast;
pub mod ws_handler;
