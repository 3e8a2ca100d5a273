//! The reducer: the only code that changes `AppState`.

use super::action::Action;
use super::error::StoreError;
use super::model::{Item, Project, RawMaterial, TimeSession};
use super::timer::{TimerPhase, TimerState};
use chrono::{DateTime, Utc};
use log::*;

/// Everything the dashboard knows during a session.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub(super) projects: Vec<Project>,
    pub(super) items: Vec<Item>,
    pub(super) raw_materials: Vec<RawMaterial>,
    pub(super) active_timer: TimerState,
    pub(super) current_project_id: Option<String>,
}

impl AppState {
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn raw_materials(&self) -> &[RawMaterial] {
        &self.raw_materials
    }

    pub fn active_timer(&self) -> &TimerState {
        &self.active_timer
    }

    pub fn current_project_id(&self) -> Option<&str> {
        self.current_project_id.as_deref()
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.current_project_id
            .as_deref()
            .and_then(|id| self.project(id))
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn raw_material(&self, id: &str) -> Option<&RawMaterial> {
        self.raw_materials.iter().find(|m| m.id == id)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn timer_phase(&self) -> TimerPhase {
        match (&self.current_project_id, self.active_timer.is_running) {
            (None, _) => TimerPhase::Idle,
            (Some(_), true) => TimerPhase::Running,
            (Some(_), false) => TimerPhase::Paused,
        }
    }

    /// Materials whose stock is strictly below `threshold`.
    ///
    pub fn low_stock(&self, threshold: f64) -> Vec<&RawMaterial> {
        self.raw_materials
            .iter()
            .filter(|m| m.quantity < threshold)
            .collect()
    }

    /// Materials whose stock is strictly above `threshold`; candidates for
    /// resale on the marketplace.
    ///
    pub fn surplus(&self, threshold: f64) -> Vec<&RawMaterial> {
        self.raw_materials
            .iter()
            .filter(|m| m.quantity > threshold)
            .collect()
    }
}

/// Apply `action` to `state`, returning the next state. On error the caller
/// keeps the previous state.
///
pub fn reduce(state: &AppState, action: Action) -> Result<AppState, StoreError> {
    let mut next = state.clone();
    match action {
        Action::AddProject(mut project) => {
            if next.project(&project.id).is_some() {
                return Err(StoreError::DuplicateId {
                    kind: "project",
                    id: project.id,
                });
            }
            // Only the timer may activate a project.
            project.is_active = false;
            project.timer_start_time = None;
            next.projects.push(project);
        }
        Action::UpdateProject(project) => {
            let slot = project_mut(&mut next.projects, &project.id)?;
            let is_active = slot.is_active;
            let timer_start_time = slot.timer_start_time;
            let time_sessions = std::mem::take(&mut slot.time_sessions);
            *slot = Project {
                is_active,
                timer_start_time,
                time_sessions,
                ..project
            };
        }
        Action::DeleteProject(id) => {
            let index = next
                .projects
                .iter()
                .position(|p| p.id == id)
                .ok_or_else(|| StoreError::ProjectNotFound { id: id.clone() })?;
            next.projects.remove(index);
            if next.current_project_id.as_deref() == Some(id.as_str()) {
                debug!("Deleted project {} was timed; resetting timer.", id);
                next.current_project_id = None;
                next.active_timer = TimerState::default();
            }
        }
        Action::AddItem(item) => {
            validate_item(&item)?;
            if next.item(&item.id).is_some() {
                return Err(StoreError::DuplicateId {
                    kind: "item",
                    id: item.id,
                });
            }
            next.items.push(item);
        }
        Action::UpdateItem(item) => {
            validate_item(&item)?;
            let slot = next
                .items
                .iter_mut()
                .find(|i| i.id == item.id)
                .ok_or_else(|| StoreError::ItemNotFound {
                    id: item.id.clone(),
                })?;
            *slot = item;
        }
        Action::DeleteItem(id) => {
            let index = next
                .items
                .iter()
                .position(|i| i.id == id)
                .ok_or(StoreError::ItemNotFound { id })?;
            next.items.remove(index);
        }
        Action::AddRawMaterial(material) => {
            validate_quantity("quantity", material.quantity)?;
            if next.raw_material(&material.id).is_some() {
                return Err(StoreError::DuplicateId {
                    kind: "raw material",
                    id: material.id,
                });
            }
            next.raw_materials.push(material);
        }
        Action::UpdateRawMaterial(material) => {
            validate_quantity("quantity", material.quantity)?;
            let slot = material_mut(&mut next.raw_materials, &material.id)?;
            *slot = material;
        }
        Action::DeleteRawMaterial(id) => {
            let index = next
                .raw_materials
                .iter()
                .position(|m| m.id == id)
                .ok_or(StoreError::RawMaterialNotFound { id })?;
            next.raw_materials.remove(index);
        }
        Action::AdjustStock {
            material_id,
            quantity,
        } => {
            validate_quantity("quantity", quantity)?;
            material_mut(&mut next.raw_materials, &material_id)?.quantity = quantity;
        }
        Action::StartTimer { project_id, at } => {
            project_mut(&mut next.projects, &project_id)?;
            if next.current_project_id.as_deref() == Some(project_id.as_str()) {
                return Err(StoreError::InvalidTransition {
                    action: "start the active project",
                    phase: state.timer_phase(),
                });
            }
            // Commit the segment of the project being switched away from.
            if let Some(previous_id) = next.current_project_id.clone() {
                if next.active_timer.is_running {
                    let previous = project_mut(&mut next.projects, &previous_id)?;
                    let segment = commit_segment(previous, &state.active_timer, at);
                    debug!(
                        "Switching timer away from {}; committed {}s.",
                        previous_id, segment
                    );
                }
            }
            next.active_timer = TimerState {
                is_running: true,
                start_time: Some(at),
                elapsed_time: 0,
                session_time: 0,
            };
            for project in next.projects.iter_mut() {
                if project.id == project_id {
                    project.is_active = true;
                    project.timer_start_time = Some(at);
                } else {
                    project.is_active = false;
                    project.timer_start_time = None;
                }
            }
            next.current_project_id = Some(project_id);
        }
        Action::PauseTimer { at } => {
            require_phase(state, "pause", &[TimerPhase::Running])?;
            let project = current_project_mut(&mut next)?;
            let segment = commit_segment(project, &state.active_timer, at);
            project.timer_start_time = None;
            next.active_timer = TimerState {
                is_running: false,
                start_time: None,
                elapsed_time: 0,
                session_time: next.active_timer.session_time.saturating_add(segment),
            };
        }
        Action::ResumeTimer { at } => {
            require_phase(state, "resume", &[TimerPhase::Paused])?;
            current_project_mut(&mut next)?.timer_start_time = Some(at);
            next.active_timer.is_running = true;
            next.active_timer.start_time = Some(at);
            next.active_timer.elapsed_time = 0;
        }
        Action::StopTimer { at } => {
            require_phase(state, "stop", &[TimerPhase::Running, TimerPhase::Paused])?;
            let project = current_project_mut(&mut next)?;
            commit_segment(project, &state.active_timer, at);
            project.is_active = false;
            project.timer_start_time = None;
            next.active_timer = TimerState::default();
            next.current_project_id = None;
        }
        Action::Tick { at } => {
            if state.timer_phase() == TimerPhase::Running {
                next.active_timer.elapsed_time = next.active_timer.segment_at(at);
            }
        }
        Action::SetProjectStage { project_id, stage } => {
            project_mut(&mut next.projects, &project_id)?.current_stage = stage;
        }
        Action::SetTimeLogged {
            project_id,
            total_seconds,
        } => {
            project_mut(&mut next.projects, &project_id)?.total_time_logged = total_seconds;
        }
    }
    Ok(next)
}

/// Add the run segment of `timer` ending at `at` to `project` and record it
/// as a session. A paused timer has no segment left, so only
/// `last_worked_on` moves. Returns the committed seconds.
///
fn commit_segment(project: &mut Project, timer: &TimerState, at: DateTime<Utc>) -> u64 {
    let segment = timer.segment_at(at);
    project.total_time_logged = project.total_time_logged.saturating_add(segment);
    project.last_worked_on = Some(at);
    if let (true, Some(start_time)) = (timer.is_running, timer.start_time) {
        project.time_sessions.push(TimeSession {
            start_time,
            end_time: at,
            duration: segment,
            stage: project.current_stage,
        });
    }
    segment
}

fn project_mut<'a>(projects: &'a mut [Project], id: &str) -> Result<&'a mut Project, StoreError> {
    projects
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| StoreError::ProjectNotFound { id: id.to_owned() })
}

fn current_project_mut(state: &mut AppState) -> Result<&mut Project, StoreError> {
    let id = state.current_project_id.clone().unwrap_or_default();
    project_mut(&mut state.projects, &id)
}

fn material_mut<'a>(
    materials: &'a mut [RawMaterial],
    id: &str,
) -> Result<&'a mut RawMaterial, StoreError> {
    materials
        .iter_mut()
        .find(|m| m.id == id)
        .ok_or_else(|| StoreError::RawMaterialNotFound { id: id.to_owned() })
}

fn require_phase(
    state: &AppState,
    action: &'static str,
    allowed: &[TimerPhase],
) -> Result<(), StoreError> {
    let phase = state.timer_phase();
    if allowed.contains(&phase) {
        Ok(())
    } else {
        Err(StoreError::InvalidTransition { action, phase })
    }
}

fn validate_quantity(field: &'static str, value: f64) -> Result<(), StoreError> {
    // Written this way so NaN is rejected as well.
    if value >= 0.0 {
        Ok(())
    } else {
        Err(StoreError::InvalidQuantity { field, value })
    }
}

fn validate_item(item: &Item) -> Result<(), StoreError> {
    validate_quantity("total cost", item.total_cost)
}
