rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod generator;
pub mod logging;
pub mod session;
pub mod ui;
