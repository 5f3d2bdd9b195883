//! Session request DTOs

use serde::Deserialize;
use uuid::Uuid;

use crate::{models::NewSession, services::RatingSubmission};

/// Schedule a session
#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub chat_id: Uuid,
    pub teacher_id: Uuid,
    pub learner_id: Uuid,
    pub duration: i32,
    pub scheduled_time: String,
    pub meet_link: Option<String>,
    pub zoom_link: Option<String>,
}

impl From<ScheduleRequest> for NewSession {
    fn from(req: ScheduleRequest) -> Self {
        Self {
            chat_id: req.chat_id,
            teacher_id: req.teacher_id,
            learner_id: req.learner_id,
            duration: req.duration,
            scheduled_time: req.scheduled_time,
            meet_link: req.meet_link,
            zoom_link: req.zoom_link,
        }
    }
}

/// Rate a session
///
/// Identifiers stay strings here; settlement validates them itself so a
/// malformed id is reported the same way as an out-of-range score.
#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    pub session_id: String,
    pub rater_id: String,
    pub ratee_id: String,
    pub score: i64,
    pub feedback: Option<String>,
}

impl From<RatingRequest> for RatingSubmission {
    fn from(req: RatingRequest) -> Self {
        Self {
            session_id: req.session_id,
            rater_id: req.rater_id,
            ratee_id: req.ratee_id,
            score: req.score,
            feedback: req.feedback,
        }
    }
}
