//! Project, inventory and timer store.
//!
//! This module holds the dashboard's domain state and the rules for changing
//! it:
//! - Domain records (`Project` with its `TimeSession` history, `RawMaterial`,
//!   `Item`) and the `Weaver` profile
//! - The single work timer and its phases
//! - `Action`, the closed set of state changes, and the pure `reduce`
//! - `Store`, which owns the state and hands out the `TimerService`

mod action;
mod clock;
mod error;
mod model;
mod reducer;
mod seed;
mod service;
mod timer;
mod weaver;

pub use action::Action;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::StoreError;
pub use model::{
    Item, NewItem, NewProject, NewRawMaterial, Project, ProjectStage, RawMaterial, TimeSession, Unit,
};
pub use reducer::{reduce, AppState};
pub use service::{Store, TimerService};
pub use timer::{whole_seconds_between, TimerPhase, TimerState};
pub use weaver::{Region, Skill, SkillLevel, Weaver};
