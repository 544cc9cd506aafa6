use std::sync::Arc;

use log::{info, warn};
use uuid::Uuid;

use crate::db::DepartmentStore;
use crate::errors::{AppError, AppResult};
use crate::models::{Department, DepartmentInput};
use crate::utils::validation::validate_payload;

const RESOURCE: &str = "Department";

#[derive(Clone)]
pub struct DepartmentService {
    store: Arc<dyn DepartmentStore>,
}

impl DepartmentService {
    pub fn new(store: Arc<dyn DepartmentStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Department>> {
        self.store.find_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Department> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(RESOURCE, id))
    }

    pub async fn create(&self, input: DepartmentInput) -> AppResult<Department> {
        if let Err(err) = validate_payload(&input) {
            warn!("Rejected department create: {}", err);
            return Err(err);
        }

        if self.store.exists_by_name(&input.name).await? {
            warn!("Rejected department create: name '{}' taken", input.name);
            return Err(AppError::duplicate_name(RESOURCE, &input.name));
        }

        let department = self.store.insert(input).await?;
        info!("Created department {} ('{}')", department.id, department.name);
        Ok(department)
    }

    /// Renaming to the department's own current name is allowed.
    pub async fn update(&self, id: Uuid, input: DepartmentInput) -> AppResult<Department> {
        if let Err(err) = validate_payload(&input) {
            warn!("Rejected department update {}: {}", id, err);
            return Err(err);
        }
        let mut department = self.get_by_id(id).await.map_err(|err| {
            warn!("Rejected department update: {}", err);
            err
        })?;

        if let Some(existing) = self.store.find_by_name(&input.name).await? {
            if existing.id != id {
                warn!(
                    "Rejected department update {}: name '{}' belongs to {}",
                    id, input.name, existing.id
                );
                return Err(AppError::duplicate_name(RESOURCE, &input.name));
            }
        }

        department.apply(input);
        let department = self.store.update(department).await?;
        info!("Updated department {}", department.id);
        Ok(department)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.store.delete_by_id(id).await? {
            let err = AppError::not_found(RESOURCE, id);
            warn!("Rejected department delete: {}", err);
            return Err(err);
        }
        info!("Deleted department {}", id);
        Ok(())
    }
}
