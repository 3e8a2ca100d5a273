//! The application context that owns the store state.

use super::action::Action;
use super::clock::{Clock, SystemClock};
use super::error::StoreError;
use super::model::{Item, NewItem, NewProject, NewRawMaterial, Project, ProjectStage, RawMaterial};
use super::reducer::{reduce, AppState};
use super::timer::TimerPhase;
use log::*;
use std::sync::Arc;
use uuid::Uuid;

/// Owns the `AppState` and the clock. All changes go through `dispatch`.
///
pub struct Store {
    state: AppState,
    clock: Arc<dyn Clock>,
}

impl Default for Store {
    fn default() -> Self {
        Store::new(AppState::default())
    }
}

impl Store {
    /// Returns a store over the given state that reads the system clock.
    ///
    pub fn new(state: AppState) -> Self {
        Store::with_clock(state, Arc::new(SystemClock))
    }

    pub fn with_clock(state: AppState, clock: Arc<dyn Clock>) -> Self {
        Store { state, clock }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Apply an action. The state only changes when the reducer succeeds.
    ///
    pub fn dispatch(&mut self, action: Action) -> Result<(), StoreError> {
        let name = action.name();
        match reduce(&self.state, action) {
            Ok(next) => {
                self.state = next;
                if name != "tick" {
                    debug!("Applied action '{}'.", name);
                }
                Ok(())
            }
            Err(e) => {
                warn!("Rejected action '{}': {}", name, e);
                Err(e)
            }
        }
    }

    /// Handle for driving the work timer.
    ///
    pub fn timer(&mut self) -> TimerService<'_> {
        TimerService { store: self }
    }

    /// Create a project with a fresh id. Listed inventory materials are
    /// copied into the project as snapshots.
    ///
    pub fn create_project(&mut self, draft: NewProject) -> Result<Project, StoreError> {
        let raw_materials = draft
            .material_ids
            .iter()
            .map(|id| {
                self.state
                    .raw_material(id)
                    .cloned()
                    .ok_or_else(|| StoreError::RawMaterialNotFound { id: id.clone() })
            })
            .collect::<Result<Vec<RawMaterial>, StoreError>>()?;
        let project = Project {
            id: new_id(),
            kind: draft.kind,
            name: draft.name,
            remarks: draft.remarks,
            deadline: draft.deadline,
            current_stage: draft.current_stage,
            raw_materials,
            start_date: self.clock.now().date_naive(),
            last_worked_on: None,
            total_time_logged: 0,
            is_active: false,
            timer_start_time: None,
            time_sessions: vec![],
        };
        self.dispatch(Action::AddProject(project.clone()))?;
        info!("Created project '{}' ({}).", project.name, project.id);
        Ok(project)
    }

    pub fn create_raw_material(&mut self, draft: NewRawMaterial) -> Result<RawMaterial, StoreError> {
        let material = RawMaterial {
            id: new_id(),
            name: draft.name,
            quantity: draft.quantity,
            unit: draft.unit,
        };
        self.dispatch(Action::AddRawMaterial(material.clone()))?;
        info!("Added raw material '{}' ({}).", material.name, material.id);
        Ok(material)
    }

    pub fn create_item(&mut self, draft: NewItem) -> Result<Item, StoreError> {
        let item = Item {
            id: new_id(),
            name: draft.name,
            material: draft.material,
            color: draft.color,
            quantity: draft.quantity,
            total_cost: draft.total_cost,
        };
        self.dispatch(Action::AddItem(item.clone()))?;
        info!("Added item '{}' ({}).", item.name, item.id);
        Ok(item)
    }

    pub fn update_project_stage(
        &mut self,
        project_id: &str,
        stage: ProjectStage,
    ) -> Result<(), StoreError> {
        self.dispatch(Action::SetProjectStage {
            project_id: project_id.to_owned(),
            stage,
        })
    }
}

/// Action creators for the single work timer. Every call stamps the action
/// with the store's clock.
///
pub struct TimerService<'a> {
    store: &'a mut Store,
}

impl<'a> TimerService<'a> {
    pub fn start(&mut self, project_id: &str) -> Result<(), StoreError> {
        let at = self.store.clock.now();
        self.store.dispatch(Action::StartTimer {
            project_id: project_id.to_owned(),
            at,
        })?;
        info!("Timer started for project {}.", project_id);
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), StoreError> {
        let at = self.store.clock.now();
        self.store.dispatch(Action::PauseTimer { at })?;
        info!("Timer paused.");
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), StoreError> {
        let at = self.store.clock.now();
        self.store.dispatch(Action::ResumeTimer { at })?;
        info!("Timer resumed.");
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), StoreError> {
        let at = self.store.clock.now();
        self.store.dispatch(Action::StopTimer { at })?;
        info!("Timer stopped.");
        Ok(())
    }

    /// Recompute the running segment from the clock.
    ///
    pub fn tick(&mut self) -> Result<(), StoreError> {
        let at = self.store.clock.now();
        self.store.dispatch(Action::Tick { at })
    }

    pub fn phase(&self) -> TimerPhase {
        self.store.state.timer_phase()
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::clock::ManualClock;
    use crate::store::model::Unit;
    use chrono::{NaiveDate, TimeZone, Utc};
    use fake::{Fake, Faker};

    fn store_with_clock() -> (Store, ManualClock) {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap());
        let store = Store::with_clock(AppState::default(), Arc::new(clock.clone()));
        (store, clock)
    }

    fn draft(name: &str, material_ids: Vec<String>) -> NewProject {
        NewProject {
            kind: "Dupatta".to_string(),
            name: name.to_string(),
            remarks: "Handloom cotton".to_string(),
            deadline: NaiveDate::from_ymd_opt(2024, 9, 30).unwrap(),
            current_stage: ProjectStage::Weaving,
            material_ids,
        }
    }

    #[test]
    fn test_raw_material_round_trip() {
        let (mut store, _) = store_with_clock();
        let created = store
            .create_raw_material(NewRawMaterial {
                name: "Test Yarn".to_string(),
                quantity: 50.0,
                unit: Unit::G,
            })
            .unwrap();
        let read = store.state().raw_material(&created.id).unwrap();
        assert_eq!(read.name, "Test Yarn");
        assert_eq!(read.quantity, 50.0);
        assert_eq!(read.unit, Unit::G);
        assert!(Uuid::parse_str(&read.id).is_ok());
    }

    #[test]
    fn test_create_project_defaults() {
        let (mut store, _) = store_with_clock();
        let project = store.create_project(draft("Shawl", vec![])).unwrap();
        assert_eq!(project.total_time_logged, 0);
        assert!(!project.is_active);
        assert_eq!(project.start_date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(store.state().projects().len(), 1);
    }

    #[test]
    fn test_create_project_copies_material_snapshots() {
        let (mut store, _) = store_with_clock();
        let silk = store
            .create_raw_material(NewRawMaterial {
                name: "Silk".to_string(),
                quantity: 300.0,
                unit: Unit::G,
            })
            .unwrap();
        let project = store
            .create_project(draft("Saree", vec![silk.id.clone()]))
            .unwrap();
        store
            .dispatch(Action::AdjustStock {
                material_id: silk.id.clone(),
                quantity: 10.0,
            })
            .unwrap();
        let stored = store.state().project(&project.id).unwrap();
        assert_eq!(stored.raw_materials, vec![silk]);
    }

    #[test]
    fn test_create_project_with_unknown_material_fails_cleanly() {
        let (mut store, _) = store_with_clock();
        let result = store.create_project(draft("Saree", vec!["ghost".to_string()]));
        assert_eq!(
            result,
            Err(StoreError::RawMaterialNotFound {
                id: "ghost".to_string()
            })
        );
        assert!(store.state().projects().is_empty());
    }

    #[test]
    fn test_timer_service_scenario_with_manual_clock() {
        let (mut store, clock) = store_with_clock();
        let p1 = store.create_project(draft("P1", vec![])).unwrap();

        store.timer().start(&p1.id).unwrap();
        for _ in 0..5 {
            clock.advance_secs(1);
            store.timer().tick().unwrap();
        }
        assert_eq!(store.state().active_timer().elapsed_time(), 5);
        store.timer().pause().unwrap();
        {
            let project = store.state().project(&p1.id).unwrap();
            assert_eq!(project.total_time_logged, 5);
            assert!(project.is_active);
            assert!(!store.state().active_timer().is_running());
        }

        clock.advance_secs(60);
        store.timer().resume().unwrap();
        clock.advance_secs(3);
        store.timer().tick().unwrap();
        assert_eq!(store.state().active_timer().display_seconds(), 8);
        store.timer().stop().unwrap();

        assert_eq!(store.state().project(&p1.id).unwrap().total_time_logged, 8);
        assert_eq!(store.timer().phase(), TimerPhase::Idle);
        assert_eq!(store.state().active_timer().elapsed_time(), 0);
    }

    #[test]
    fn test_rejected_action_keeps_state() {
        let (mut store, _) = store_with_clock();
        let before = store.state().clone();
        assert!(store.timer().pause().is_err());
        assert!(store.dispatch(Action::DeleteProject("x".to_string())).is_err());
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_update_project_stage() {
        let (mut store, _) = store_with_clock();
        let project = store.create_project(draft("Runner", vec![])).unwrap();
        store
            .update_project_stage(&project.id, ProjectStage::Finishings)
            .unwrap();
        assert_eq!(
            store.state().project(&project.id).unwrap().current_stage,
            ProjectStage::Finishings
        );
        assert!(store
            .update_project_stage("missing", ProjectStage::Completed)
            .is_err());
    }

    #[test]
    fn test_create_item_assigns_unique_ids() {
        let (mut store, _) = store_with_clock();
        let a = store.create_item(Faker.fake()).unwrap();
        let b = store.create_item(Faker.fake()).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.state().items().len(), 2);
    }
}
