//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Network events: trend service interactions
//! - Terminal events: user input and terminal interactions
//! - Timer ticks while the work timer runs

pub mod network;
pub mod terminal;
pub mod ticker;
