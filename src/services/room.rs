use std::sync::Arc;

use log::{info, warn};
use uuid::Uuid;

use crate::db::RoomStore;
use crate::errors::{AppError, AppResult};
use crate::models::{Room, RoomInput};
use crate::utils::validation::validate_payload;

const RESOURCE: &str = "Room";

#[derive(Clone)]
pub struct RoomService {
    store: Arc<dyn RoomStore>,
}

impl RoomService {
    pub fn new(store: Arc<dyn RoomStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Room>> {
        self.store.find_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Room> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(RESOURCE, id))
    }

    pub async fn create(&self, input: RoomInput) -> AppResult<Room> {
        if let Err(err) = validate_payload(&input) {
            warn!("Rejected room create: {}", err);
            return Err(err);
        }

        if self.store.exists_by_name(&input.name).await? {
            warn!("Rejected room create: name '{}' taken", input.name);
            return Err(AppError::duplicate_name(RESOURCE, &input.name));
        }

        let room = self.store.insert(input).await?;
        info!("Created room {} ('{}')", room.id, room.name);
        Ok(room)
    }

    pub async fn update(&self, id: Uuid, input: RoomInput) -> AppResult<Room> {
        if let Err(err) = validate_payload(&input) {
            warn!("Rejected room update {}: {}", id, err);
            return Err(err);
        }
        let mut room = self.get_by_id(id).await.map_err(|err| {
            warn!("Rejected room update: {}", err);
            err
        })?;

        if let Some(existing) = self.store.find_by_name(&input.name).await? {
            if existing.id != id {
                warn!(
                    "Rejected room update {}: name '{}' belongs to {}",
                    id, input.name, existing.id
                );
                return Err(AppError::duplicate_name(RESOURCE, &input.name));
            }
        }

        room.apply(input);
        let room = self.store.update(room).await?;
        info!("Updated room {}", room.id);
        Ok(room)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.store.delete_by_id(id).await? {
            let err = AppError::not_found(RESOURCE, id);
            warn!("Rejected room delete: {}", err);
            return Err(err);
        }
        info!("Deleted room {}", id);
        Ok(())
    }
}
