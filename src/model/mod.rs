pub mod config;
pub mod ticket;

pub use config::{ClassifierConfig, Config};
pub use ticket::*;
