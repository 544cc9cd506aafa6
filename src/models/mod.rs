pub mod department;
pub mod meeting;
pub mod room;

use serde::Serialize;

pub use department::{Department, DepartmentInput};
pub use meeting::{
    Meeting, MeetingInput, MeetingStatistics, MeetingStatus, ParseStatusError, PeriodStatistics,
};
pub use room::{Room, RoomInput};

/// JSON envelope shared by every HTTP reply.
#[derive(Serialize, Debug)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: "OK".to_string(),
            data: Some(data),
        }
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}
