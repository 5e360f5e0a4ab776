pub mod app_settings;
pub mod network;
pub mod refresher;
pub mod tracked;
