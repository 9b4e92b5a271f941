pub mod cli;
pub mod config;
pub mod error;
pub mod image;
pub mod logging;
pub mod session;
pub mod transport;
