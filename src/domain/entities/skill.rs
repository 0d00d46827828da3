use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::not_blank;

pub(crate) const MAX_NAME_LENGTH: u64 = 100;
const MAX_DESCRIPTION_LENGTH: u64 = 1000;
const MAX_CATEGORY_LENGTH: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "skill_difficulty", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[display("novice")]
    Novice,
    #[display("beginner")]
    Beginner,
    #[display("intermediate")]
    Intermediate,
    #[display("advanced")]
    Advanced,
    #[display("expert")]
    Expert,
}

/// A persisted skill. Identity is the surrogate `id` alone, so two rows
/// that share every other field are still different skills.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PartialEq for Skill {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Skill {}

impl Hash for Skill {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Column values for a skill that has not been stored yet, or the full
/// replacement set for an update.
#[derive(Debug, Clone)]
pub struct SkillInsert {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
}

impl SkillInsert {
    /// A bare skill carrying only its name, as created when a user picks up
    /// a skill nobody has registered yet.
    pub fn named(name: impl Into<String>) -> Self {
        SkillInsert {
            name: name.into(),
            description: None,
            category: None,
            difficulty: None,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewSkill {
    #[validate(
        length(min = 1, max = MAX_NAME_LENGTH, message = "Skill name must be 1-100 characters"),
        custom(function = "not_blank", message = "Skill name cannot be empty")
    )]
    pub name: String,

    #[validate(length(max = MAX_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    #[validate(length(max = MAX_CATEGORY_LENGTH))]
    pub category: Option<String>,

    pub difficulty: Option<Difficulty>,
}

impl NewSkill {
    pub fn prepare_for_insert(&self) -> SkillInsert {
        SkillInsert {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            category: self.category.clone(),
            difficulty: self.difficulty,
        }
    }
}

/// Full overwrite of a skill's mutable fields. Omitted optional fields are
/// cleared, not preserved.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSkill {
    #[validate(
        length(min = 1, max = MAX_NAME_LENGTH, message = "Skill name must be 1-100 characters"),
        custom(function = "not_blank", message = "Skill name cannot be empty")
    )]
    pub name: String,

    #[validate(length(max = MAX_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    #[validate(length(max = MAX_CATEGORY_LENGTH))]
    pub category: Option<String>,

    pub difficulty: Option<Difficulty>,
}

impl UpdateSkill {
    pub fn prepare_for_update(&self) -> SkillInsert {
        SkillInsert {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            category: self.category.clone(),
            difficulty: self.difficulty,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SkillCreated {
    #[serde(flatten)]
    pub skill: Skill,
    /// `false` when a skill with the same name already existed and was returned as-is.
    pub created: bool,
}
