use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use validator::{Validate, ValidationError};
use uuid::Uuid;

use crate::domain::entities::{
    not_blank,
    skill::{Skill, MAX_NAME_LENGTH as MAX_SKILL_NAME_LENGTH},
};

const MAX_NAME_LENGTH: u64 = 100;


#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UserInsert {
    pub name: String,
    pub email: String,
}

/// A user together with every skill linked to it, sorted by skill name.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub skills: Vec<Skill>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn new(user: User, mut skills: Vec<Skill>) -> Self {
        skills.sort_by(|a, b| a.name.cmp(&b.name));

        UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            skills,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[validate(
        length(max = MAX_NAME_LENGTH, message = "Must be at most 100 characters"),
        custom(function = "not_blank", message = "User name cannot be empty")
    )]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

impl NewUser {
    pub fn prepare_for_insert(&self) -> UserInsert {
        UserInsert {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }
}

/// Full overwrite of a user. `skills: None` leaves the current skill set
/// untouched; `Some` replaces it wholesale with the named skills.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(
        length(max = MAX_NAME_LENGTH, message = "Must be at most 100 characters"),
        custom(function = "not_blank", message = "User name cannot be empty")
    )]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "validate_skill_names"))]
    pub skills: Option<Vec<String>>,
}

impl UpdateUser {
    pub fn prepare_for_update(&self) -> UserInsert {
        UserInsert {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct AddSkillRequest {
    #[validate(
        length(min = 1, max = MAX_SKILL_NAME_LENGTH, message = "Skill name must be 1-100 characters"),
        custom(function = "not_blank", message = "Skill name cannot be empty")
    )]
    pub skill_name: String,
}

/// Blank entries are skipped later, so only the length is checked here.
pub fn validate_skill_names(names: &[String]) -> Result<(), ValidationError> {
    if names.iter().any(|name| name.trim().chars().count() > MAX_SKILL_NAME_LENGTH as usize) {
        let mut error = ValidationError::new("skill_name_length");
        error.message = Some("Skill names must be at most 100 characters".into());
        return Err(error);
    }
    Ok(())
}
