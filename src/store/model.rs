//! Domain records kept by the store.
//!
//! Records serialize in camelCase so they keep the JSON shape used by the
//! weaver dashboard's REST surface.

use chrono::{DateTime, NaiveDate, Utc};
use fake::{Dummy, Faker};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stages a weaving project moves through.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStage {
    Preparation,
    Preweaving,
    Weaving,
    Finishings,
    Completed,
}

impl ProjectStage {
    /// All stages in their natural order.
    pub const ALL: [ProjectStage; 5] = [
        ProjectStage::Preparation,
        ProjectStage::Preweaving,
        ProjectStage::Weaving,
        ProjectStage::Finishings,
        ProjectStage::Completed,
    ];

    /// Zero-based position of the stage in the natural order.
    ///
    pub fn index(&self) -> usize {
        match self {
            ProjectStage::Preparation => 0,
            ProjectStage::Preweaving => 1,
            ProjectStage::Weaving => 2,
            ProjectStage::Finishings => 3,
            ProjectStage::Completed => 4,
        }
    }

    /// Percentage shown on the progress bar: `(index + 1) / stages * 100`.
    ///
    pub fn progress_percent(&self) -> u16 {
        (((self.index() + 1) * 100) / Self::ALL.len()) as u16
    }

    /// The following stage, saturating at `Completed`.
    ///
    pub fn next(&self) -> ProjectStage {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    /// The preceding stage, saturating at `Preparation`.
    ///
    pub fn previous(&self) -> ProjectStage {
        Self::ALL[self.index().saturating_sub(1)]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStage::Preparation => "Preparation",
            ProjectStage::Preweaving => "Preweaving",
            ProjectStage::Weaving => "Weaving",
            ProjectStage::Finishings => "Finishings",
            ProjectStage::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProjectStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("unknown stage '{}'", s))
    }
}

impl Dummy<Faker> for ProjectStage {
    fn dummy_with_rng<R: Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Units raw materials are counted in.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    G,
    Kg,
    M,
    Pcs,
}

impl Unit {
    pub const ALL: [Unit; 4] = [Unit::G, Unit::Kg, Unit::M, Unit::Pcs];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::G => "g",
            Unit::Kg => "kg",
            Unit::M => "m",
            Unit::Pcs => "pcs",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|unit| unit.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("unknown unit '{}' (expected g, kg, m or pcs)", s))
    }
}

impl Dummy<Faker> for Unit {
    fn dummy_with_rng<R: Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Inventory entry for a yarn, thread or other raw material.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMaterial {
    pub id: String,
    pub name: String,
    #[dummy(faker = "0.0..5000.0")]
    pub quantity: f64,
    pub unit: Unit,
}

/// Finished good, tracked independently of projects.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub material: String,
    pub color: String,
    #[dummy(faker = "1..500")]
    pub quantity: u32,
    #[dummy(faker = "0.0..100000.0")]
    pub total_cost: f64,
}

/// One uninterrupted run of the timer on a project.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSession {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Whole seconds, as added to `total_time_logged`.
    pub duration: u64,
    /// Stage the project was in while the run happened.
    pub stage: ProjectStage,
}

/// A weaving project and its time ledger.
///
/// `raw_materials` holds value snapshots taken when the project was set
/// up; inventory changes never flow back into them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub remarks: String,
    pub deadline: NaiveDate,
    pub current_stage: ProjectStage,
    pub raw_materials: Vec<RawMaterial>,
    pub start_date: NaiveDate,
    pub last_worked_on: Option<DateTime<Utc>>,
    /// Seconds of work committed to this project.
    pub total_time_logged: u64,
    pub is_active: bool,
    pub timer_start_time: Option<DateTime<Utc>>,
    /// Committed runs, oldest first.
    #[serde(default)]
    pub time_sessions: Vec<TimeSession>,
}

impl Project {
    pub fn progress_percent(&self) -> u16 {
        self.current_stage.progress_percent()
    }
}

/// Fields supplied when creating a project.
///
#[derive(Clone, Debug, PartialEq)]
pub struct NewProject {
    pub kind: String,
    pub name: String,
    pub remarks: String,
    pub deadline: NaiveDate,
    pub current_stage: ProjectStage,
    /// Inventory ids whose current values are copied into the project.
    pub material_ids: Vec<String>,
}

/// Fields supplied when creating a raw material.
///
#[derive(Clone, Debug, Dummy, PartialEq)]
pub struct NewRawMaterial {
    pub name: String,
    #[dummy(faker = "0.0..5000.0")]
    pub quantity: f64,
    pub unit: Unit,
}

/// Fields supplied when creating an item.
///
#[derive(Clone, Debug, Dummy, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub material: String,
    pub color: String,
    #[dummy(faker = "1..500")]
    pub quantity: u32,
    #[dummy(faker = "0.0..100000.0")]
    pub total_cost: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use fake::Fake;
    use serde_json::json;

    #[test]
    fn test_stage_progress_percent() {
        assert_eq!(ProjectStage::Preparation.progress_percent(), 20);
        assert_eq!(ProjectStage::Weaving.progress_percent(), 60);
        assert_eq!(ProjectStage::Completed.progress_percent(), 100);
    }

    #[test]
    fn test_stage_next_and_previous_saturate() {
        assert_eq!(ProjectStage::Preparation.previous(), ProjectStage::Preparation);
        assert_eq!(ProjectStage::Preparation.next(), ProjectStage::Preweaving);
        assert_eq!(ProjectStage::Finishings.next(), ProjectStage::Completed);
        assert_eq!(ProjectStage::Completed.next(), ProjectStage::Completed);
    }

    #[test]
    fn test_stage_from_str() {
        assert_eq!("weaving".parse::<ProjectStage>(), Ok(ProjectStage::Weaving));
        assert_eq!(" Finishings ".parse::<ProjectStage>(), Ok(ProjectStage::Finishings));
        assert!("Dyeing".parse::<ProjectStage>().is_err());
    }

    #[test]
    fn test_unit_from_str_and_display() {
        assert_eq!("KG".parse::<Unit>(), Ok(Unit::Kg));
        assert_eq!(Unit::Pcs.to_string(), "pcs");
        let error = "yards".parse::<Unit>().unwrap_err();
        assert!(error.contains("yards"));
    }

    #[test]
    fn test_raw_material_json_shape() {
        let material = RawMaterial {
            id: "1".to_string(),
            name: "Test Yarn".to_string(),
            quantity: 50.0,
            unit: Unit::G,
        };
        assert_eq!(
            serde_json::to_value(&material).unwrap(),
            json!({ "id": "1", "name": "Test Yarn", "quantity": 50.0, "unit": "g" })
        );
    }

    #[test]
    fn test_project_json_uses_type_and_camel_case() {
        let project = Project {
            id: "p1".to_string(),
            kind: "Saree".to_string(),
            name: "Banarasi".to_string(),
            remarks: String::new(),
            deadline: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            current_stage: ProjectStage::Weaving,
            raw_materials: vec![],
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            last_worked_on: None,
            total_time_logged: 50400,
            is_active: false,
            timer_start_time: None,
            time_sessions: vec![TimeSession {
                start_time: Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
                end_time: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
                duration: 1800,
                stage: ProjectStage::Weaving,
            }],
        };
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["timeSessions"][0]["duration"], 1800);
        assert_eq!(value["timeSessions"][0]["stage"], "Weaving");
        assert_eq!(value["type"], "Saree");
        assert_eq!(value["currentStage"], "Weaving");
        assert_eq!(value["totalTimeLogged"], 50400);
        assert_eq!(value["deadline"], "2024-12-31");
        let back: Project = serde_json::from_value(value).unwrap();
        assert_eq!(back, project);
    }

    #[test]
    fn test_fake_materials_are_non_negative() {
        for _ in 0..50 {
            let material: RawMaterial = Faker.fake();
            assert!(material.quantity >= 0.0);
        }
    }
}
