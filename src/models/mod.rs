pub mod config;
pub mod print_method;

pub use config::{AppConfig, ColorBookEntry, CONFIG_ENV};
pub use print_method::{Effect, PrintMethod};
