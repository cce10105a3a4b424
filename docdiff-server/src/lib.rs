pub mod api;
pub mod args;
pub mod config;
pub mod error;
pub mod state;
