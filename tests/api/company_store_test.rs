//! MySQL-backed company store tests
//!
//! Require a database with `schema/schema.sql` applied.
//! Run with: DATABASE_URL=mysql://... cargo test --test api_test -- --ignored

use company_registry::domain::{CompanyFilter, CompanyPatch, CompanyStatus, CreateCompanyInput};
use company_registry::repository::company::CompanyRepositoryImpl;
use company_registry::repository::{CompanyRepository, StoreError};
use sqlx::mysql::MySqlPoolOptions;

async fn create_repo() -> CompanyRepositoryImpl {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = MySqlPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to database");
    CompanyRepositoryImpl::new(pool)
}

fn unique_input() -> CreateCompanyInput {
    let tag = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    CreateCompanyInput {
        name: format!("Acme {}", tag),
        code: format!("AC{}", tag),
        country: "US".to_string(),
        website: "acme.io".to_string(),
        phone: "1".to_string(),
    }
}

#[tokio::test]
#[ignore = "Requires database"]
async fn test_create_then_find_is_active() {
    let repo = create_repo().await;
    let input = unique_input();

    let id = repo.create(&input).await.unwrap();
    let company = repo.find_by_id(id).await.unwrap();

    assert_eq!(company.name, input.name);
    assert_eq!(company.status, CompanyStatus::Active);
}

#[tokio::test]
#[ignore = "Requires database"]
async fn test_update_keeps_absent_fields() {
    let repo = create_repo().await;
    let input = unique_input();
    let id = repo.create(&input).await.unwrap();

    let updated = repo
        .update(&CompanyPatch {
            id,
            phone: Some("2".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(updated.phone, "2");
    assert_eq!(updated.name, input.name);
    assert_eq!(updated.code, input.code);
}

#[tokio::test]
#[ignore = "Requires database"]
async fn test_delete_is_terminal() {
    let repo = create_repo().await;
    let id = repo.create(&unique_input()).await.unwrap();

    repo.delete_by_id(id).await.unwrap();

    assert!(matches!(repo.delete_by_id(id).await, Err(StoreError::NoRows)));
    assert!(matches!(repo.find_by_id(id).await, Err(StoreError::NoRows)));
    assert!(matches!(
        repo.update(&CompanyPatch {
            id,
            name: Some("Zombie".to_string()),
            ..Default::default()
        })
        .await,
        Err(StoreError::NoRows)
    ));
}

#[tokio::test]
#[ignore = "Requires database"]
async fn test_list_filters_by_code() {
    let repo = create_repo().await;
    let input = unique_input();
    let id = repo.create(&input).await.unwrap();

    let found = repo
        .list(&CompanyFilter {
            code: Some(input.code.clone()),
            ..CompanyFilter::with_limit(10)
        })
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, id);

    let missing = repo
        .list(&CompanyFilter {
            code: Some(format!("{}-missing", input.code)),
            ..CompanyFilter::with_limit(10)
        })
        .await;
    assert!(matches!(missing, Err(StoreError::NoRows)));
}
