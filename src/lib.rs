pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod models;
pub mod prompts;
pub mod server;
pub mod session;
pub mod ui;
