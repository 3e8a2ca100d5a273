//! Demo data the dashboard boots with when `seed_demo_data` is enabled.

use super::model::{Project, ProjectStage, RawMaterial, Unit};
use super::reducer::AppState;
use chrono::{NaiveDate, TimeZone, Utc};

fn material(id: &str, name: &str, quantity: f64) -> RawMaterial {
    RawMaterial {
        id: id.to_owned(),
        name: name.to_owned(),
        quantity,
        unit: Unit::G,
    }
}

impl AppState {
    /// A Banarasi saree in progress and a small silk and cotton inventory.
    ///
    pub fn seeded() -> AppState {
        let banarasi = Project {
            id: "1".to_owned(),
            kind: "Saree".to_owned(),
            name: "Banarasi Wedding Saree".to_owned(),
            remarks: "Traditional handwoven silk with zari work".to_owned(),
            deadline: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default(),
            current_stage: ProjectStage::Weaving,
            raw_materials: vec![
                material("1", "Silk Yarn", 500.0),
                material("2", "Zari Thread", 200.0),
            ],
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default(),
            last_worked_on: Utc.with_ymd_and_hms(2024, 1, 20, 0, 0, 0).single(),
            // 14 hours
            total_time_logged: 50_400,
            is_active: false,
            timer_start_time: None,
            time_sessions: vec![],
        };

        AppState {
            projects: vec![banarasi],
            items: vec![],
            raw_materials: vec![
                material("1", "Royal Purple Silk", 500.0),
                material("2", "Zari Gold Thread", 200.0),
                material("3", "Emerald Silk", 300.0),
                material("4", "Crimson Cotton", 400.0),
                material("5", "Sapphire Wool", 250.0),
                material("6", "Amber Linen", 350.0),
            ],
            ..AppState::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::timer::TimerPhase;

    #[test]
    fn test_seeded_state_is_idle_and_consistent() {
        let state = AppState::seeded();
        assert_eq!(state.timer_phase(), TimerPhase::Idle);
        assert_eq!(state.projects().len(), 1);
        assert_eq!(state.raw_materials().len(), 6);
        assert!(state.projects().iter().all(|p| !p.is_active));
        assert!(state.low_stock(100.0).is_empty());
        assert_eq!(state.projects()[0].total_time_logged, 14 * 3600);
    }
}
