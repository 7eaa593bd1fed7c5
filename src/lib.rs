mod api;
pub mod args;
mod auth;
pub mod commands;
mod config;
mod error;
mod model;
mod notify;
mod screen;
mod utils;


pub use api::Mode;
pub use config::Config;
pub use error::Error;
pub use error::Result;
