//! Skill matchmaking
//!
//! Two users match when each can teach something the other wants to learn.
//! No ranking is applied; candidates come back in store order.

use std::collections::BTreeSet;

use uuid::Uuid;

use crate::{
    db::UserStore,
    error::AppResult,
    handlers::matches::response::SkillMatch,
    models::User,
    services::ProfileService,
};

/// Matchmaking service
pub struct MatchService;

impl MatchService {
    /// Every user with a mutual teach/learn overlap with the given user
    pub async fn find_matches<S>(store: &S, user_id: &Uuid) -> AppResult<Vec<SkillMatch>>
    where
        S: UserStore + ?Sized,
    {
        let me = ProfileService::get_profile(store, user_id).await?;
        let candidates = store.list_users_except(user_id).await?;

        let matches: Vec<SkillMatch> = candidates
            .iter()
            .filter_map(|candidate| Self::match_pair(&me, candidate))
            .collect();

        tracing::debug!(user_id = %user_id, count = matches.len(), "Matches computed");

        Ok(matches)
    }

    /// Match one candidate against `me`, if the overlap is mutual
    pub fn match_pair(me: &User, candidate: &User) -> Option<SkillMatch> {
        let my_teach = skill_set(&me.teach_skills);
        let my_learn = skill_set(&me.learn_skills);
        let their_teach = skill_set(&candidate.teach_skills);
        let their_learn = skill_set(&candidate.learn_skills);

        let match_for_me: Vec<String> = intersection(&my_learn, &their_teach);
        let match_for_them: Vec<String> = intersection(&my_teach, &their_learn);

        if match_for_me.is_empty() || match_for_them.is_empty() {
            return None;
        }

        Some(SkillMatch {
            user_id: candidate.id,
            name: candidate.name.clone(),
            city: candidate.city.clone(),
            age: candidate.age,
            teach_skills: their_teach.iter().map(|s| s.to_string()).collect(),
            learn_skills: their_learn.iter().map(|s| s.to_string()).collect(),
            match_for_me,
            match_for_them,
            rating_avg: candidate.rating_avg(),
        })
    }
}

fn skill_set(skills: &[String]) -> BTreeSet<&str> {
    skills.iter().map(String::as_str).collect()
}

fn intersection(a: &BTreeSet<&str>, b: &BTreeSet<&str>) -> Vec<String> {
    a.intersection(b).map(|s| s.to_string()).collect()
}
