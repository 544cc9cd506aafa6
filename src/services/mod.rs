pub mod department;
pub mod meeting;
pub mod room;

pub use department::DepartmentService;
pub use meeting::MeetingService;
pub use room::RoomService;

use crate::db::Stores;

/// Shared application state handed to every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub departments: DepartmentService,
    pub rooms: RoomService,
    pub meetings: MeetingService,
}

impl AppState {
    pub fn new(stores: Stores) -> Self {
        Self {
            departments: DepartmentService::new(stores.departments),
            rooms: RoomService::new(stores.rooms),
            meetings: MeetingService::new(stores.meetings),
        }
    }
}
