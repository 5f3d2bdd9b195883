//! Badge model
//!
//! Badges are derived from a user's counters and rating. The stored set only
//! ever grows: earning is evaluated at settlement time and merged in, nothing
//! is revoked when a condition later stops holding.

use serde::{Deserialize, Serialize};

use crate::constants::{
    HELPFUL_TEACHER_MIN_AVG, SKILL_STREAK_TOTAL_SESSIONS, TOP_MENTOR_TEACHING_SESSIONS,
};

use super::User;

/// Achievement badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Badge {
    #[serde(rename = "Top Mentor")]
    TopMentor,
    #[serde(rename = "Skill Streak")]
    SkillStreak,
    #[serde(rename = "Helpful Teacher")]
    HelpfulTeacher,
}

impl Badge {
    pub const ALL: [Badge; 3] = [Badge::TopMentor, Badge::SkillStreak, Badge::HelpfulTeacher];

    /// Stored label
    pub fn label(&self) -> &'static str {
        match self {
            Self::TopMentor => "Top Mentor",
            Self::SkillStreak => "Skill Streak",
            Self::HelpfulTeacher => "Helpful Teacher",
        }
    }

    /// Check the threshold for this badge against the user's current state
    pub fn is_earned_by(&self, user: &User) -> bool {
        match self {
            Self::TopMentor => user.teaching_sessions >= TOP_MENTOR_TEACHING_SESSIONS,
            Self::SkillStreak => user.total_sessions() >= SKILL_STREAK_TOTAL_SESSIONS,
            Self::HelpfulTeacher => user.rating_avg() > HELPFUL_TEACHER_MIN_AVG,
        }
    }

    /// Every badge whose threshold the user currently meets
    pub fn earned_by(user: &User) -> Vec<Badge> {
        Self::ALL.into_iter().filter(|b| b.is_earned_by(user)).collect()
    }
}
