use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::not_blank;

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub capacity: Option<i32>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct RoomInput {
    #[validate(custom = "not_blank")]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "capacity must be a positive number"))]
    pub capacity: Option<i32>,
    pub location: Option<String>,
}

impl Room {
    pub fn apply(&mut self, input: RoomInput) {
        self.name = input.name;
        self.description = input.description;
        self.capacity = input.capacity;
        self.location = input.location;
    }
}
