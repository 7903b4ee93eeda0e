pub mod config;
pub mod logger;
pub mod password;
pub(crate) mod splitarc_toml;

pub use config::*;
pub use logger::setup_logging;
pub use password::get_password;
