//! Profile request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{MAX_NAME_LENGTH, MAX_USER_AGE, MIN_USER_AGE},
    models::{AvailabilitySlot, ProfileUpdate},
};

/// Profile update request; every field is overwritten
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = MAX_NAME_LENGTH))]
    pub name: String,

    #[validate(range(min = MIN_USER_AGE, max = MAX_USER_AGE))]
    pub age: Option<i32>,

    pub city: Option<String>,

    #[serde(default)]
    pub teach_skills: Vec<String>,

    #[serde(default)]
    pub learn_skills: Vec<String>,

    #[serde(default)]
    pub availability: Vec<AvailabilitySlot>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            name: req.name,
            age: req.age,
            city: req.city,
            teach_skills: req.teach_skills,
            learn_skills: req.learn_skills,
            availability: req.availability,
        }
    }
}
