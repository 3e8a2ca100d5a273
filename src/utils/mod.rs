//! Utility functions and helpers.
//!
//! This module contains formatting helpers shared by the views.

pub mod color;
pub mod format;
