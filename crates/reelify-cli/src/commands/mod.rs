pub mod browse;
pub mod chat;
pub mod collection;
pub mod config;
pub mod context;
pub mod ui;
