//! Session settlement
//!
//! Submitting a rating settles the session it belongs to. Settlement runs a
//! fixed sequence of single-document operations:
//!
//! 1. record the rating
//! 2. add the score to the ratee's running total and count
//! 3. credit the teacher and debit the learner, bumping session counters
//! 4. mark the session completed
//! 5. merge newly earned badges into the teacher's badge set
//!
//! There is no transaction around the sequence. When a store call fails the
//! steps before it stay committed and the error names both the failing step
//! and the last one that completed.
//!
//! Settling an already completed session applies every effect again.

use serde::Serialize;
use uuid::Uuid;

use crate::{
    constants::{MAX_RATING_SCORE, MIN_RATING_SCORE, SESSION_REWARD_COINS},
    db::{RatingStore, SessionStore, StoreError, UserStore},
    error::AppError,
    models::{Badge, NewRating, SessionStatus, UserIncrement},
};

/// A rating as submitted by a caller, identifiers still unparsed
#[derive(Debug, Clone)]
pub struct RatingSubmission {
    pub session_id: String,
    pub rater_id: String,
    pub ratee_id: String,
    /// Kept wide so any integer a caller sends is judged by the range check
    pub score: i64,
    pub feedback: Option<String>,
}

/// A rating that passed argument validation
#[derive(Debug, Clone)]
struct ValidRating {
    session_id: Uuid,
    rater_id: Uuid,
    ratee_id: Uuid,
    score: i32,
    feedback: Option<String>,
}

impl RatingSubmission {
    fn validate(self) -> Result<ValidRating, SettlementError> {
        let score = i32::try_from(self.score)
            .ok()
            .filter(|s| (MIN_RATING_SCORE..=MAX_RATING_SCORE).contains(s))
            .ok_or_else(|| {
                SettlementError::InvalidArgument(format!(
                    "Score must be {MIN_RATING_SCORE}-{MAX_RATING_SCORE}"
                ))
            })?;

        Ok(ValidRating {
            session_id: parse_id("session_id", &self.session_id)?,
            rater_id: parse_id("rater_id", &self.rater_id)?,
            ratee_id: parse_id("ratee_id", &self.ratee_id)?,
            score,
            feedback: self.feedback,
        })
    }
}

fn parse_id(field: &str, raw: &str) -> Result<Uuid, SettlementError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| SettlementError::InvalidArgument(format!("Invalid {field}: {raw}")))
}

/// Settlement stage, used to report where a settlement stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStep {
    /// Reading the session; nothing has been written yet
    LoadSession,
    RecordRating,
    UpdateRateeStats,
    CreditTeacher,
    DebitLearner,
    CompleteSession,
    AwardBadges,
}

impl SettlementStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoadSession => "load_session",
            Self::RecordRating => "record_rating",
            Self::UpdateRateeStats => "update_ratee_stats",
            Self::CreditTeacher => "credit_teacher",
            Self::DebitLearner => "debit_learner",
            Self::CompleteSession => "complete_session",
            Self::AwardBadges => "award_badges",
        }
    }
}

impl std::fmt::Display for SettlementStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settlement failures
#[derive(Debug, thiserror::Error)]
pub enum SettlementError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("session {0} not found")]
    NotFound(Uuid),

    /// Store failed at `failed_at`; every step up to `last_completed` is persisted
    #[error("store unavailable at {failed_at}")]
    StoreUnavailable {
        failed_at: SettlementStep,
        last_completed: Option<SettlementStep>,
        #[source]
        source: StoreError,
    },
}

impl From<SettlementError> for AppError {
    fn from(err: SettlementError) -> Self {
        match err {
            SettlementError::InvalidArgument(msg) => AppError::InvalidInput(msg),
            SettlementError::NotFound(_) => AppError::NotFound("Session not found".to_string()),
            SettlementError::StoreUnavailable {
                failed_at,
                last_completed,
                source,
            } => AppError::SettlementInterrupted {
                failed_at: failed_at.as_str(),
                last_completed: last_completed.map(|s| s.as_str()),
                reason: source.to_string(),
            },
        }
    }
}

/// Tracks the last committed step
#[derive(Debug, Default)]
struct Progress {
    last_completed: Option<SettlementStep>,
}

impl Progress {
    fn complete(&mut self, step: SettlementStep) {
        tracing::debug!(step = %step, "Settlement step completed");
        self.last_completed = Some(step);
    }

    fn interrupted(&self, failed_at: SettlementStep, source: StoreError) -> SettlementError {
        tracing::warn!(
            failed_at = %failed_at,
            last_completed = ?self.last_completed,
            error = %source,
            "Settlement interrupted"
        );
        SettlementError::StoreUnavailable {
            failed_at,
            last_completed: self.last_completed,
            source,
        }
    }
}

/// Settlement service
pub struct SettlementService;

impl SettlementService {
    /// Record a rating and settle its session
    pub async fn submit_rating<S>(
        store: &S,
        submission: RatingSubmission,
    ) -> Result<(), SettlementError>
    where
        S: UserStore + SessionStore + RatingStore + ?Sized,
    {
        let rating = submission.validate()?;
        let mut progress = Progress::default();

        let session = store
            .find_session(&rating.session_id)
            .await
            .map_err(|e| progress.interrupted(SettlementStep::LoadSession, e))?
            .ok_or(SettlementError::NotFound(rating.session_id))?;

        store
            .insert_rating(NewRating {
                session_id: rating.session_id,
                rater_id: rating.rater_id,
                ratee_id: rating.ratee_id,
                score: rating.score,
                feedback: rating.feedback.clone(),
            })
            .await
            .map_err(|e| progress.interrupted(SettlementStep::RecordRating, e))?;
        progress.complete(SettlementStep::RecordRating);

        let rated = store
            .increment_user(&rating.ratee_id, UserIncrement::rating(rating.score))
            .await
            .map_err(|e| progress.interrupted(SettlementStep::UpdateRateeStats, e))?;
        if !rated {
            tracing::debug!(ratee_id = %rating.ratee_id, "Ratee not found, rating stats skipped");
        }
        progress.complete(SettlementStep::UpdateRateeStats);

        if let Some((teacher_id, learner_id)) = session.participants() {
            let credited = store
                .increment_user(&teacher_id, UserIncrement::taught(SESSION_REWARD_COINS))
                .await
                .map_err(|e| progress.interrupted(SettlementStep::CreditTeacher, e))?;
            if !credited {
                tracing::debug!(teacher_id = %teacher_id, "Teacher not found, credit skipped");
            }
            progress.complete(SettlementStep::CreditTeacher);

            let debited = store
                .increment_user(&learner_id, UserIncrement::learned(SESSION_REWARD_COINS))
                .await
                .map_err(|e| progress.interrupted(SettlementStep::DebitLearner, e))?;
            if !debited {
                tracing::debug!(learner_id = %learner_id, "Learner not found, debit skipped");
            }
            progress.complete(SettlementStep::DebitLearner);
        } else {
            tracing::debug!(session_id = %session.id, "Session lacks a participant, coin transfer skipped");
        }

        store
            .set_session_status(&session.id, SessionStatus::Completed)
            .await
            .map_err(|e| progress.interrupted(SettlementStep::CompleteSession, e))?;
        progress.complete(SettlementStep::CompleteSession);

        if let Some(teacher_id) = session.teacher_id {
            let teacher = store
                .find_user(&teacher_id)
                .await
                .map_err(|e| progress.interrupted(SettlementStep::AwardBadges, e))?;

            if let Some(teacher) = teacher {
                let earned = Badge::earned_by(&teacher);
                if !earned.is_empty() {
                    store
                        .add_badges(&teacher_id, &earned)
                        .await
                        .map_err(|e| progress.interrupted(SettlementStep::AwardBadges, e))?;
                }
            }
        }
        progress.complete(SettlementStep::AwardBadges);

        tracing::info!(
            session_id = %session.id,
            ratee_id = %rating.ratee_id,
            score = rating.score,
            "Session settled"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use async_trait::async_trait;
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::{
        db::{MemoryStore, StoreResult},
        models::{NewSession, NewUser, ProfileUpdate, Rating, Session, User},
    };

    /// Store operation that a `FlakyStore` fails on
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Fault {
        FindSession,
        InsertRating,
        /// Fail the n-th (0-based) `increment_user` call
        Increment(usize),
        SetStatus,
        FindUser,
        AddBadges,
    }

    /// Participant stripped from sessions read through a `FlakyStore`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Detached {
        Teacher,
        Learner,
    }

    struct FlakyStore {
        inner: MemoryStore,
        fault: Option<Fault>,
        detached: Option<Detached>,
        increments: AtomicUsize,
    }

    impl FlakyStore {
        fn new(inner: MemoryStore, fault: Fault) -> Self {
            Self {
                inner,
                fault: Some(fault),
                detached: None,
                increments: AtomicUsize::new(0),
            }
        }

        /// Never fails, but serves sessions with one participant id missing
        fn detaching(inner: MemoryStore, detached: Detached) -> Self {
            Self {
                inner,
                fault: None,
                detached: Some(detached),
                increments: AtomicUsize::new(0),
            }
        }

        fn check(&self, fault: Fault) -> StoreResult<()> {
            if self.fault == Some(fault) {
                Err(StoreError::Unavailable("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl UserStore for FlakyStore {
        async fn insert_user(&self, user: NewUser) -> StoreResult<Uuid> {
            self.inner.insert_user(user).await
        }

        async fn find_user(&self, id: &Uuid) -> StoreResult<Option<User>> {
            self.check(Fault::FindUser)?;
            self.inner.find_user(id).await
        }

        async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
            self.inner.find_user_by_email(email).await
        }

        async fn update_profile(&self, id: &Uuid, profile: &ProfileUpdate) -> StoreResult<bool> {
            self.inner.update_profile(id, profile).await
        }

        async fn increment_user(&self, id: &Uuid, delta: UserIncrement) -> StoreResult<bool> {
            let n = self.increments.fetch_add(1, Ordering::SeqCst);
            self.check(Fault::Increment(n))?;
            self.inner.increment_user(id, delta).await
        }

        async fn add_badges(&self, id: &Uuid, badges: &[Badge]) -> StoreResult<bool> {
            self.check(Fault::AddBadges)?;
            self.inner.add_badges(id, badges).await
        }

        async fn list_users_except(&self, id: &Uuid) -> StoreResult<Vec<User>> {
            self.inner.list_users_except(id).await
        }

        async fn top_teachers(&self, limit: i64) -> StoreResult<Vec<User>> {
            self.inner.top_teachers(limit).await
        }
    }

    #[async_trait]
    impl SessionStore for FlakyStore {
        async fn insert_session(&self, session: NewSession) -> StoreResult<Uuid> {
            self.inner.insert_session(session).await
        }

        async fn find_session(&self, id: &Uuid) -> StoreResult<Option<Session>> {
            self.check(Fault::FindSession)?;
            let session = self.inner.find_session(id).await?;
            Ok(session.map(|mut s| {
                match self.detached {
                    Some(Detached::Teacher) => s.teacher_id = None,
                    Some(Detached::Learner) => s.learner_id = None,
                    None => {}
                }
                s
            }))
        }

        async fn sessions_for_user(&self, user_id: &Uuid) -> StoreResult<Vec<Session>> {
            self.inner.sessions_for_user(user_id).await
        }

        async fn set_session_status(&self, id: &Uuid, status: SessionStatus) -> StoreResult<bool> {
            self.check(Fault::SetStatus)?;
            self.inner.set_session_status(id, status).await
        }
    }

    #[async_trait]
    impl RatingStore for FlakyStore {
        async fn insert_rating(&self, rating: NewRating) -> StoreResult<Uuid> {
            self.check(Fault::InsertRating)?;
            self.inner.insert_rating(rating).await
        }

        async fn ratings_for_ratee(&self, ratee_id: &Uuid) -> StoreResult<Vec<Rating>> {
            self.inner.ratings_for_ratee(ratee_id).await
        }
    }

    struct Fixture {
        store: MemoryStore,
        teacher: Uuid,
        learner: Uuid,
        session: Uuid,
    }

    async fn add_user(store: &MemoryStore, email: &str) -> Uuid {
        store
            .insert_user(NewUser {
                email: email.to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap()
    }

    async fn add_session(store: &MemoryStore, teacher: Uuid, learner: Uuid) -> Uuid {
        store
            .insert_session(NewSession {
                chat_id: Uuid::new_v4(),
                teacher_id: teacher,
                learner_id: learner,
                duration: 60,
                scheduled_time: "2024-01-15T12:00:00Z".to_string(),
                meet_link: None,
                zoom_link: None,
            })
            .await
            .unwrap()
    }

    async fn fixture() -> Fixture {
        let store = MemoryStore::new();
        let teacher = add_user(&store, "teacher@example.com").await;
        let learner = add_user(&store, "learner@example.com").await;
        let session = add_session(&store, teacher, learner).await;
        Fixture {
            store,
            teacher,
            learner,
            session,
        }
    }

    fn submission(session: Uuid, rater: Uuid, ratee: Uuid, score: i32) -> RatingSubmission {
        RatingSubmission {
            session_id: session.to_string(),
            rater_id: rater.to_string(),
            ratee_id: ratee.to_string(),
            score: i64::from(score),
            feedback: Some("great".to_string()),
        }
    }

    async fn user(store: &MemoryStore, id: Uuid) -> User {
        store.find_user(&id).await.unwrap().unwrap()
    }

    async fn session_status(store: &MemoryStore, id: Uuid) -> Option<SessionStatus> {
        store.find_session(&id).await.unwrap().unwrap().status()
    }

    #[tokio::test]
    async fn test_average_follows_incremental_formula() {
        for score in MIN_RATING_SCORE..=MAX_RATING_SCORE {
            let f = fixture().await;
            // avg 3.5 over 4 ratings
            f.store
                .increment_user(
                    &f.teacher,
                    UserIncrement {
                        rating_total: 14,
                        rating_count: 4,
                        ..UserIncrement::default()
                    },
                )
                .await
                .unwrap();

            let sub = submission(f.session, f.learner, f.teacher, score);
            assert_ok!(SettlementService::submit_rating(&f.store, sub).await);

            let teacher = user(&f.store, f.teacher).await;
            let expected = (3.5 * 4.0 + f64::from(score)) / 5.0;
            assert_eq!(teacher.rating_count, 5);
            assert!((teacher.rating_avg() - expected).abs() < 1e-9);
        }
    }

    #[tokio::test]
    async fn test_out_of_range_score_has_no_side_effects() {
        let f = fixture().await;

        for score in [0, 6] {
            let sub = submission(f.session, f.learner, f.teacher, score);
            let err = assert_err!(SettlementService::submit_rating(&f.store, sub).await);
            assert!(matches!(err, SettlementError::InvalidArgument(_)));
        }

        assert!(f.store.ratings_for_ratee(&f.teacher).await.unwrap().is_empty());
        let teacher = user(&f.store, f.teacher).await;
        assert_eq!(teacher.coins, 20);
        assert_eq!(teacher.rating_count, 0);
        assert_eq!(user(&f.store, f.learner).await.coins, 20);
        assert_eq!(session_status(&f.store, f.session).await, Some(SessionStatus::Scheduled));
    }

    #[tokio::test]
    async fn test_malformed_ids_rejected_before_lookup() {
        let f = fixture().await;
        // a failing store proves no lookup happens
        let flaky = FlakyStore::new(f.store, Fault::FindSession);

        let mut sub = submission(f.session, f.learner, f.teacher, 4);
        sub.ratee_id = "not-an-id".to_string();
        let err = assert_err!(SettlementService::submit_rating(&flaky, sub).await);
        assert!(matches!(err, SettlementError::InvalidArgument(_)));

        let mut sub = submission(f.session, f.learner, f.teacher, 4);
        sub.session_id = "65a1f0c2e4b0".to_string();
        let err = assert_err!(SettlementService::submit_rating(&flaky, sub).await);
        assert!(matches!(err, SettlementError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_unknown_session_has_no_side_effects() {
        let f = fixture().await;
        let missing = Uuid::new_v4();

        let sub = submission(missing, f.learner, f.teacher, 5);
        let err = assert_err!(SettlementService::submit_rating(&f.store, sub).await);
        assert!(matches!(err, SettlementError::NotFound(id) if id == missing));

        assert!(f.store.ratings_for_ratee(&f.teacher).await.unwrap().is_empty());
        assert_eq!(user(&f.store, f.teacher).await.coins, 20);
        assert_eq!(user(&f.store, f.learner).await.coins, 20);
    }

    #[tokio::test]
    async fn test_settlement_transfers_coins_and_completes() {
        let f = fixture().await;

        let sub = submission(f.session, f.learner, f.teacher, 5);
        assert_ok!(SettlementService::submit_rating(&f.store, sub).await);

        let teacher = user(&f.store, f.teacher).await;
        let learner = user(&f.store, f.learner).await;
        assert_eq!(teacher.coins, 30);
        assert_eq!(teacher.teaching_sessions, 1);
        assert_eq!(teacher.learning_sessions, 0);
        assert_eq!(learner.coins, 10);
        assert_eq!(learner.learning_sessions, 1);
        assert_eq!(learner.teaching_sessions, 0);
        assert_eq!(session_status(&f.store, f.session).await, Some(SessionStatus::Completed));

        let ratings = f.store.ratings_for_ratee(&f.teacher).await.unwrap();
        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings[0].rater_id, f.learner);
        assert_eq!(ratings[0].feedback.as_deref(), Some("great"));
    }

    #[tokio::test]
    async fn test_repeat_settlement_is_cumulative() {
        let f = fixture().await;

        for _ in 0..3 {
            let sub = submission(f.session, f.learner, f.teacher, 4);
            assert_ok!(SettlementService::submit_rating(&f.store, sub).await);
            assert_eq!(session_status(&f.store, f.session).await, Some(SessionStatus::Completed));
        }

        let teacher = user(&f.store, f.teacher).await;
        let learner = user(&f.store, f.learner).await;
        assert_eq!(teacher.coins, 50);
        assert_eq!(teacher.teaching_sessions, 3);
        assert_eq!(teacher.rating_count, 3);
        // learner balance goes below zero without a floor
        assert_eq!(learner.coins, -10);
        assert_eq!(learner.learning_sessions, 3);
        assert_eq!(
            f.store.ratings_for_ratee(&f.teacher).await.unwrap().len() as i64,
            teacher.rating_count
        );
    }

    #[tokio::test]
    async fn test_mentor_scenario_awards_all_badges() {
        let f = fixture().await;
        // 9 sessions taught, average 4.6 over 10 ratings
        f.store
            .increment_user(
                &f.teacher,
                UserIncrement {
                    teaching_sessions: 9,
                    rating_total: 46,
                    rating_count: 10,
                    ..UserIncrement::default()
                },
            )
            .await
            .unwrap();

        let sub = submission(f.session, f.learner, f.teacher, 5);
        assert_ok!(SettlementService::submit_rating(&f.store, sub).await);

        let teacher = user(&f.store, f.teacher).await;
        assert_eq!(teacher.teaching_sessions, 10);
        assert!((teacher.rating_avg() - 51.0 / 11.0).abs() < 1e-9);
        assert_eq!(teacher.badges, vec!["Helpful Teacher", "Skill Streak", "Top Mentor"]);
    }

    #[tokio::test]
    async fn test_badges_never_revoked() {
        let f = fixture().await;

        let sub = submission(f.session, f.learner, f.teacher, 5);
        assert_ok!(SettlementService::submit_rating(&f.store, sub).await);
        assert!(user(&f.store, f.teacher).await.has_badge("Helpful Teacher"));

        let mut previous = user(&f.store, f.teacher).await.badges;
        for _ in 0..5 {
            let sub = submission(f.session, f.learner, f.teacher, 1);
            assert_ok!(SettlementService::submit_rating(&f.store, sub).await);

            let badges = user(&f.store, f.teacher).await.badges;
            assert!(previous.iter().all(|b| badges.contains(b)));
            previous = badges;
        }

        let teacher = user(&f.store, f.teacher).await;
        assert!(teacher.rating_avg() < 4.5);
        assert!(teacher.has_badge("Helpful Teacher"));
        assert!(teacher.has_badge("Skill Streak"));
    }

    #[tokio::test]
    async fn test_learner_badges_not_evaluated() {
        let f = fixture().await;

        for _ in 0..5 {
            let sub = submission(f.session, f.teacher, f.learner, 5);
            assert_ok!(SettlementService::submit_rating(&f.store, sub).await);
        }

        let learner = user(&f.store, f.learner).await;
        assert_eq!(learner.learning_sessions, 5);
        assert!(learner.rating_avg() > 4.5);
        assert!(learner.badges.is_empty());
    }

    #[tokio::test]
    async fn test_missing_learner_still_credits_teacher() {
        let store = MemoryStore::new();
        let teacher = add_user(&store, "teacher@example.com").await;
        let gone = Uuid::new_v4();
        let session = add_session(&store, teacher, gone).await;

        let sub = submission(session, gone, teacher, 4);
        assert_ok!(SettlementService::submit_rating(&store, sub).await);

        let teacher = user(&store, teacher).await;
        assert_eq!(teacher.coins, 30);
        assert_eq!(teacher.teaching_sessions, 1);
        assert!(store.find_user(&gone).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_ratee_is_silent_skip() {
        let f = fixture().await;
        let ghost = Uuid::new_v4();

        let sub = submission(f.session, f.learner, ghost, 3);
        assert_ok!(SettlementService::submit_rating(&f.store, sub).await);

        // rating is still recorded and the session still settles
        assert_eq!(f.store.ratings_for_ratee(&ghost).await.unwrap().len(), 1);
        assert_eq!(user(&f.store, f.teacher).await.coins, 30);
        assert_eq!(user(&f.store, f.teacher).await.rating_count, 0);
    }

    #[tokio::test]
    async fn test_scores_outside_i32_rejected() {
        let f = fixture().await;

        for score in [3_000_000_000, i64::MIN] {
            let mut sub = submission(f.session, f.learner, f.teacher, 5);
            sub.score = score;
            let err = assert_err!(SettlementService::submit_rating(&f.store, sub).await);
            assert!(matches!(err, SettlementError::InvalidArgument(_)));
        }

        assert_eq!(user(&f.store, f.teacher).await.rating_count, 0);
    }

    #[tokio::test]
    async fn test_session_without_learner_skips_transfer() {
        let f = fixture().await;
        let store = FlakyStore::detaching(f.store, Detached::Learner);

        let sub = submission(f.session, f.learner, f.teacher, 5);
        assert_ok!(SettlementService::submit_rating(&store, sub).await);

        let teacher = user(&store.inner, f.teacher).await;
        let learner = user(&store.inner, f.learner).await;
        assert_eq!(teacher.coins, 20);
        assert_eq!(teacher.teaching_sessions, 0);
        assert_eq!(learner.coins, 20);
        assert_eq!(learner.learning_sessions, 0);
        // rating stats, completion and badges still apply
        assert_eq!(teacher.rating_count, 1);
        assert!(teacher.has_badge("Helpful Teacher"));
        assert_eq!(
            session_status(&store.inner, f.session).await,
            Some(SessionStatus::Completed)
        );
    }

    #[tokio::test]
    async fn test_session_without_teacher_skips_transfer_and_badges() {
        let f = fixture().await;
        let store = FlakyStore::detaching(f.store, Detached::Teacher);

        let sub = submission(f.session, f.learner, f.teacher, 5);
        assert_ok!(SettlementService::submit_rating(&store, sub).await);

        let teacher = user(&store.inner, f.teacher).await;
        assert_eq!(teacher.coins, 20);
        assert_eq!(teacher.rating_count, 1);
        assert!(teacher.badges.is_empty());
        assert_eq!(user(&store.inner, f.learner).await.coins, 20);
        assert_eq!(
            session_status(&store.inner, f.session).await,
            Some(SessionStatus::Completed)
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_settlements_lose_no_updates() {
        const N: i64 = 100;

        let f = fixture().await;
        let store = Arc::new(f.store);

        let handles: Vec<_> = (0..N)
            .map(|i| {
                let store = Arc::clone(&store);
                let score = (i % 5) as i32 + 1;
                let sub = submission(f.session, f.learner, f.teacher, score);
                tokio::spawn(async move { SettlementService::submit_rating(store.as_ref(), sub).await })
            })
            .collect();

        for handle in handles {
            assert_ok!(handle.await.unwrap());
        }

        let expected_total: i64 = (0..N).map(|i| i % 5 + 1).sum();
        let teacher = user(&store, f.teacher).await;
        let learner = user(&store, f.learner).await;
        assert_eq!(teacher.rating_count, N);
        assert_eq!(teacher.rating_total, expected_total);
        assert_eq!(teacher.teaching_sessions, N);
        assert_eq!(teacher.coins, 20 + 10 * N);
        assert_eq!(learner.learning_sessions, N);
        assert_eq!(learner.coins, 20 - 10 * N);
        assert_eq!(store.ratings_for_ratee(&f.teacher).await.unwrap().len() as i64, N);
    }

    #[tokio::test]
    async fn test_failure_before_any_write() {
        let f = fixture().await;
        let flaky = FlakyStore::new(f.store, Fault::FindSession);

        let sub = submission(f.session, f.learner, f.teacher, 5);
        let err = assert_err!(SettlementService::submit_rating(&flaky, sub).await);
        assert!(matches!(
            err,
            SettlementError::StoreUnavailable {
                failed_at: SettlementStep::LoadSession,
                last_completed: None,
                ..
            }
        ));
        assert!(flaky.inner.ratings_for_ratee(&f.teacher).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_reports_last_completed_step() {
        let cases = [
            (Fault::InsertRating, SettlementStep::RecordRating, None),
            (
                Fault::Increment(0),
                SettlementStep::UpdateRateeStats,
                Some(SettlementStep::RecordRating),
            ),
            (
                Fault::Increment(1),
                SettlementStep::CreditTeacher,
                Some(SettlementStep::UpdateRateeStats),
            ),
            (
                Fault::Increment(2),
                SettlementStep::DebitLearner,
                Some(SettlementStep::CreditTeacher),
            ),
            (
                Fault::SetStatus,
                SettlementStep::CompleteSession,
                Some(SettlementStep::DebitLearner),
            ),
            (
                Fault::FindUser,
                SettlementStep::AwardBadges,
                Some(SettlementStep::CompleteSession),
            ),
        ];

        for (fault, expected_failed, expected_last) in cases {
            let f = fixture().await;
            let flaky = FlakyStore::new(f.store, fault);

            let sub = submission(f.session, f.learner, f.teacher, 5);
            let err = assert_err!(SettlementService::submit_rating(&flaky, sub).await);
            match err {
                SettlementError::StoreUnavailable {
                    failed_at,
                    last_completed,
                    ..
                } => {
                    assert_eq!(failed_at, expected_failed, "{fault:?}");
                    assert_eq!(last_completed, expected_last, "{fault:?}");
                }
                other => panic!("unexpected error for {fault:?}: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_partial_progress_is_kept() {
        let f = fixture().await;
        // credit succeeds, debit fails
        let flaky = FlakyStore::new(f.store, Fault::Increment(2));

        let sub = submission(f.session, f.learner, f.teacher, 5);
        assert_err!(SettlementService::submit_rating(&flaky, sub).await);

        let teacher = user(&flaky.inner, f.teacher).await;
        let learner = user(&flaky.inner, f.learner).await;
        assert_eq!(teacher.rating_count, 1);
        assert_eq!(teacher.coins, 30);
        assert_eq!(learner.coins, 20);
        assert_eq!(
            session_status(&flaky.inner, f.session).await,
            Some(SessionStatus::Scheduled)
        );
    }

    #[tokio::test]
    async fn test_badge_write_failure_after_teacher_qualifies() {
        let f = fixture().await;
        let flaky = FlakyStore::new(f.store, Fault::AddBadges);

        let sub = submission(f.session, f.learner, f.teacher, 5);
        let err = assert_err!(SettlementService::submit_rating(&flaky, sub).await);
        assert!(matches!(
            err,
            SettlementError::StoreUnavailable {
                failed_at: SettlementStep::AwardBadges,
                ..
            }
        ));
        assert_eq!(
            session_status(&flaky.inner, f.session).await,
            Some(SessionStatus::Completed)
        );
    }

    #[test]
    fn test_error_maps_to_http() {
        let err: AppError = SettlementError::InvalidArgument("bad".to_string()).into();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);

        let err: AppError = SettlementError::NotFound(Uuid::new_v4()).into();
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);

        let err: AppError = SettlementError::StoreUnavailable {
            failed_at: SettlementStep::DebitLearner,
            last_completed: Some(SettlementStep::CreditTeacher),
            source: StoreError::Unavailable("down".to_string()),
        }
        .into();
        let details = err.details().unwrap();
        assert_eq!(details["failed_at"], "debit_learner");
        assert_eq!(details["last_completed"], "credit_teacher");
    }
}
