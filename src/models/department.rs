use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::not_blank;

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct DepartmentInput {
    #[validate(custom = "not_blank")]
    pub name: String,
    pub description: Option<String>,
}

impl Department {
    pub fn apply(&mut self, input: DepartmentInput) {
        self.name = input.name;
        self.description = input.description;
    }
}
