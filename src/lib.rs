//! Terminal dashboard for artisan weavers.
//!
//! The `store` module holds the project and timer state and the reducer that
//! changes it. Everything else drives that store from a terminal UI.

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod logger;
pub mod state;
pub mod store;
pub mod trends;
pub mod ui;
pub mod utils;
