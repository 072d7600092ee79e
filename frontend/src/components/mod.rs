pub mod cards;
pub mod chat;
pub mod plot;
pub mod route_map;
pub mod sim_form;
pub mod sim_results;
pub mod template;
pub mod ticker;
pub mod toast;
