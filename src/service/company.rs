//! Company business logic

use crate::domain::{Company, CompanyFilter, CompanyPatch, CreateCompanyInput};
use crate::error::{AppError, Result};
use crate::events::{EventPublisher, COMPANY_DELETE_TOPIC, COMPANY_UPDATE_TOPIC};
use crate::repository::{CompanyRepository, StoreError};
use std::sync::Arc;
use tracing::warn;
use validator::Validate;

pub struct CompanyService<R: CompanyRepository, P: EventPublisher + ?Sized> {
    repo: Arc<R>,
    publisher: Arc<P>,
}

fn not_found(id: i64) -> impl FnOnce(StoreError) -> AppError {
    move |e| match e {
        StoreError::NoRows => AppError::NotFound(format!("Company {} not found", id)),
        other => other.into(),
    }
}

impl<R: CompanyRepository, P: EventPublisher + ?Sized> CompanyService<R, P> {
    pub fn new(repo: Arc<R>, publisher: Arc<P>) -> Self {
        Self { repo, publisher }
    }

    pub async fn create(&self, input: CreateCompanyInput) -> Result<i64> {
        input.check().map_err(AppError::Validation)?;

        let id = self.repo.create(&input).await?;
        Ok(id)
    }

    pub async fn get(&self, id: i64) -> Result<Company> {
        self.repo.find_by_id(id).await.map_err(not_found(id))
    }

    pub async fn list(&self, filter: CompanyFilter) -> Result<Vec<Company>> {
        filter.validate()?;

        self.repo.list(&filter).await.map_err(|e| match e {
            StoreError::NoRows => AppError::NotFound("No companies match the filter".to_string()),
            other => other.into(),
        })
    }

    pub async fn update(&self, patch: CompanyPatch) -> Result<Company> {
        // NoRows passes through untranslated
        let company = self.repo.update(&patch).await?;

        match serde_json::to_vec(&company) {
            Ok(payload) => self.notify(COMPANY_UPDATE_TOPIC, payload).await,
            Err(e) => warn!("Failed to serialize company {} for notification: {}", company.id, e),
        }

        Ok(company)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repo.delete_by_id(id).await.map_err(not_found(id))?;

        self.notify(COMPANY_DELETE_TOPIC, id.to_string().into_bytes())
            .await;

        Ok(())
    }

    /// Publish failures never affect the outcome of the mutation
    async fn notify(&self, topic: &str, payload: Vec<u8>) {
        if let Err(e) = self.publisher.publish(topic, payload).await {
            warn!("Failed to publish to {}: {}", topic, e);
        }
    }
}
