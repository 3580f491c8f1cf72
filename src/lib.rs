pub mod address;
pub mod config;
pub mod error;
pub mod handler;
pub mod listing;
pub mod server;
