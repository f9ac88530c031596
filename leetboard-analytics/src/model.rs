use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 4] = [
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
        SkillLevel::Expert,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Expert => "Expert",
        }
    }

    /// Match a stored level exactly. Any other value is unclassified.
    pub fn from_exact(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == raw)
    }

    /// Parse a user-typed level label, ignoring ASCII case and surrounding whitespace.
    pub fn from_label(raw: &str) -> Option<Self> {
        let wanted = raw.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user's profile snapshot after ingestion. Every numeric field is non-negative.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub leetcode_id: String,
    pub display_name: String,
    pub collected_at: Option<String>,
    pub profile: Profile,
    pub analysis: DifficultyAnalysis,
    pub consistency: ConsistencyStats,
}

impl UserRecord {
    pub fn school(&self) -> Option<&str> {
        self.profile.school.as_deref()
    }

    pub fn profile_url(&self) -> String {
        format!("https://leetcode.com/{}", self.leetcode_id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub username: Option<String>,
    pub real_name: Option<String>,
    pub about_me: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub school: Option<String>,
    pub star_rating: Option<f64>,
    pub ranking: Option<u64>,
    pub reputation: u64,
    pub easy_solved: u64,
    pub medium_solved: u64,
    pub hard_solved: u64,
    pub total_solved: u64,
    pub easy_acceptance_rate: f64,
    pub medium_acceptance_rate: f64,
    pub hard_acceptance_rate: f64,
    pub overall_acceptance_rate: f64,
    pub language_stats: BTreeMap<String, u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DifficultyAnalysis {
    /// `None` when the source value is not one of the four known levels.
    pub skill_level: Option<SkillLevel>,
    pub easy: DifficultyBreakdown,
    pub medium: DifficultyBreakdown,
    pub hard: DifficultyBreakdown,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DifficultyBreakdown {
    pub solved: u64,
    /// Percent of the difficulty's problem pool, may exceed 100 in source data.
    pub completion: f64,
    pub acceptance_rate: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyStats {
    pub current_streak: u64,
    pub max_streak: u64,
    pub total_days_active: u64,
    pub recent_activity: RecentActivity,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    pub last_7_days: u64,
    pub last_30_days: u64,
}
