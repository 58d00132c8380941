//! Learner profile and the sentence it is ranked by.
//!
//! The recommender never sees the form fields separately. They are folded
//! into one natural-language sentence, and that sentence is what gets
//! embedded and compared against course descriptions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MIN_WEEKLY_HOURS: u8 = 1;
pub const MAX_WEEKLY_HOURS: u8 = 30;
pub const DEFAULT_WEEKLY_HOURS: u8 = 6;

/// Job roles a learner can aim for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRole {
    DataAnalyst,
    BackendDeveloper,
    ProjectManager,
    AiEngineer,
    UxDesigner,
}

impl TargetRole {
    pub const ALL: [TargetRole; 5] = [
        TargetRole::DataAnalyst,
        TargetRole::BackendDeveloper,
        TargetRole::ProjectManager,
        TargetRole::AiEngineer,
        TargetRole::UxDesigner,
    ];

    /// Label as shown to users and used in the profile sentence
    pub fn label(&self) -> &'static str {
        match self {
            TargetRole::DataAnalyst => "Data Analyst",
            TargetRole::BackendDeveloper => "Backend Developer",
            TargetRole::ProjectManager => "Project Manager",
            TargetRole::AiEngineer => "AI Engineer",
            TargetRole::UxDesigner => "UX Designer",
        }
    }
}

impl fmt::Display for TargetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TargetRole {
    type Err = String;

    /// Accepts the label in any case, with spaces, dashes or underscores
    ///
    /// Example: "data analyst", "Data-Analyst", "data_analyst" -> DataAnalyst
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        TargetRole::ALL
            .into_iter()
            .find(|role| {
                let label: String = role.label().chars().filter(|c| c.is_alphanumeric()).collect();
                label.to_lowercase() == wanted
            })
            .ok_or_else(|| {
                let known: Vec<_> = TargetRole::ALL.iter().map(|r| r.label()).collect();
                format!("unknown role '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// Reasons a profile can't be ranked
#[derive(Error, Debug, PartialEq)]
pub enum ProfileError {
    #[error("Missing {0}: please fill in all fields")]
    MissingField(&'static str),

    #[error("Weekly hours must be between 1 and 30, got {0}")]
    HoursOutOfRange(u8),
}

/// What a learner tells us about themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerProfile {
    /// Free-text career goal, e.g. "I want to become a Data Analyst"
    pub goal: String,
    /// Comma-separated current skills
    pub skills: String,
    pub target_role: TargetRole,
    /// Weekly time budget. Informational: it does not affect ranking.
    pub weekly_hours: u8,
}

impl LearnerProfile {
    pub fn new(
        goal: impl Into<String>,
        skills: impl Into<String>,
        target_role: TargetRole,
    ) -> Self {
        Self {
            goal: goal.into(),
            skills: skills.into(),
            target_role,
            weekly_hours: DEFAULT_WEEKLY_HOURS,
        }
    }

    pub fn with_weekly_hours(mut self, hours: u8) -> Self {
        self.weekly_hours = hours;
        self
    }

    /// Check that goal and skills are filled in and hours are in range
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.goal.trim().is_empty() {
            return Err(ProfileError::MissingField("career goal"));
        }
        if self.skills.trim().is_empty() {
            return Err(ProfileError::MissingField("current skills"));
        }
        if !(MIN_WEEKLY_HOURS..=MAX_WEEKLY_HOURS).contains(&self.weekly_hours) {
            return Err(ProfileError::HoursOutOfRange(self.weekly_hours));
        }
        Ok(())
    }

    /// The sentence that gets embedded
    ///
    /// Example: goal "I want to work with data", skills "Python, SQL",
    /// role Data Analyst ->
    /// "I want to work with data. My current skills are Python, SQL. I want to become a Data Analyst."
    pub fn profile_text(&self) -> String {
        format!(
            "{}. My current skills are {}. I want to become a {}.",
            self.goal.trim(),
            self.skills.trim(),
            self.target_role
        )
    }
}
