//! Application state management module.
//!
//! This module contains the UI state of the dashboard, including:
//! - Main `State` struct wrapping the store and the view data
//! - Navigation types (View, TrendsPanel)
//! - Form editing types (FormState, FormKind)
//! - State error handling

mod error;
mod form;
mod navigation;

pub use error::StateError;
pub use form::{FormField, FormKind, FormState, FormSubmission};
pub use navigation::{TrendsPanel, View};

#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::{PendingDelete, State, Status, NETWORK_UNAVAILABLE, STOCK_STEP};
