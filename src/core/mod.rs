pub mod checker;
pub mod config;
pub mod error;
pub mod logging;
pub mod project;
pub mod score;
