pub mod analysis;
pub mod api;
pub mod app;
pub mod catalog;
pub mod config;
pub mod ui;
