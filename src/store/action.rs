use super::model::{Item, Project, ProjectStage, RawMaterial};
use chrono::{DateTime, Utc};

/// Every way the store can change. Timestamps are captured by the caller,
/// so applying the same action to the same state always gives the same
/// result.
///
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    AddProject(Project),
    UpdateProject(Project),
    DeleteProject(String),
    AddItem(Item),
    UpdateItem(Item),
    DeleteItem(String),
    AddRawMaterial(RawMaterial),
    UpdateRawMaterial(RawMaterial),
    DeleteRawMaterial(String),
    StartTimer {
        project_id: String,
        at: DateTime<Utc>,
    },
    PauseTimer {
        at: DateTime<Utc>,
    },
    ResumeTimer {
        at: DateTime<Utc>,
    },
    StopTimer {
        at: DateTime<Utc>,
    },
    /// Recompute the running segment; never commits time.
    Tick {
        at: DateTime<Utc>,
    },
    SetProjectStage {
        project_id: String,
        stage: ProjectStage,
    },
    /// Manual correction of a project's logged time.
    SetTimeLogged {
        project_id: String,
        total_seconds: u64,
    },
    /// Set the absolute stock level of a raw material.
    AdjustStock {
        material_id: String,
        quantity: f64,
    },
}

impl Action {
    /// Short name used in log lines.
    ///
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddProject(_) => "add-project",
            Action::UpdateProject(_) => "update-project",
            Action::DeleteProject(_) => "delete-project",
            Action::AddItem(_) => "add-item",
            Action::UpdateItem(_) => "update-item",
            Action::DeleteItem(_) => "delete-item",
            Action::AddRawMaterial(_) => "add-raw-material",
            Action::UpdateRawMaterial(_) => "update-raw-material",
            Action::DeleteRawMaterial(_) => "delete-raw-material",
            Action::StartTimer { .. } => "start-timer",
            Action::PauseTimer { .. } => "pause-timer",
            Action::ResumeTimer { .. } => "resume-timer",
            Action::StopTimer { .. } => "stop-timer",
            Action::Tick { .. } => "tick",
            Action::SetProjectStage { .. } => "set-project-stage",
            Action::SetTimeLogged { .. } => "set-time-logged",
            Action::AdjustStock { .. } => "adjust-stock",
        }
    }
}
