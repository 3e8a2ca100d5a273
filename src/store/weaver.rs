//! The weaver profile that trend matching is run for.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How practiced a weaver is in a skill, ordered from least to most.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Expert => "Expert",
        })
    }
}

/// A craft the weaver practices, e.g. "Silk Weaving".
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub level: SkillLevel,
    #[serde(default)]
    pub years_of_experience: u32,
}

/// Where the weaver works.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub state: String,
    pub district: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.village {
            Some(village) => write!(f, "{}, {}, {}", village, self.district, self.state),
            None => write!(f, "{}, {}", self.district, self.state),
        }
    }
}

/// Profile of the weaver using the dashboard. `id` is the key the trend
/// service matches on.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weaver {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub region: Region,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub preferred_materials: Vec<String>,
}

impl Default for Weaver {
    fn default() -> Self {
        Weaver {
            id: "W003".to_string(),
            name: "Lakshmi Devi".to_string(),
            region: Region {
                state: "Uttar Pradesh".to_string(),
                district: "Varanasi".to_string(),
                village: None,
            },
            skills: vec![
                Skill {
                    name: "Silk Weaving".to_string(),
                    level: SkillLevel::Expert,
                    years_of_experience: 15,
                },
                Skill {
                    name: "Zari Work".to_string(),
                    level: SkillLevel::Advanced,
                    years_of_experience: 8,
                },
            ],
            preferred_materials: vec!["Silk".to_string(), "Zari".to_string()],
        }
    }
}

impl Weaver {
    /// Skills in one line, strongest first.
    ///
    pub fn skill_summary(&self) -> String {
        let mut skills: Vec<&Skill> = self.skills.iter().collect();
        skills.sort_by(|a, b| {
            b.level
                .cmp(&a.level)
                .then(b.years_of_experience.cmp(&a.years_of_experience))
        });
        skills
            .iter()
            .map(|s| format!("{} ({}, {}y)", s.name, s.level, s.years_of_experience))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_summary_orders_by_level_then_years() {
        let weaver = Weaver {
            skills: vec![
                Skill {
                    name: "Cotton Handloom".to_string(),
                    level: SkillLevel::Intermediate,
                    years_of_experience: 20,
                },
                Skill {
                    name: "Silk Weaving".to_string(),
                    level: SkillLevel::Expert,
                    years_of_experience: 3,
                },
                Skill {
                    name: "Dyeing".to_string(),
                    level: SkillLevel::Intermediate,
                    years_of_experience: 25,
                },
            ],
            ..Weaver::default()
        };
        assert_eq!(
            weaver.skill_summary(),
            "Silk Weaving (Expert, 3y), Dyeing (Intermediate, 25y), Cotton Handloom (Intermediate, 20y)"
        );
    }

    #[test]
    fn test_weaver_yaml_fills_optional_fields() {
        let weaver: Weaver = serde_yaml::from_str(
            "id: W010\nname: Meena\nskills:\n  - name: Ikat\n",
        )
        .unwrap();
        assert_eq!(weaver.id, "W010");
        assert_eq!(weaver.skills[0].level, SkillLevel::Beginner);
        assert_eq!(weaver.skills[0].years_of_experience, 0);
        assert_eq!(weaver.region, Region::default());
        assert!(weaver.preferred_materials.is_empty());
    }

    #[test]
    fn test_region_display() {
        let mut region = Weaver::default().region;
        assert_eq!(region.to_string(), "Varanasi, Uttar Pradesh");
        region.village = Some("Sarai Mohana".to_string());
        assert_eq!(region.to_string(), "Sarai Mohana, Varanasi, Uttar Pradesh");
    }
}
