//! Company repository

use super::{StoreError, StoreResult};
use crate::domain::{Company, CompanyFilter, CompanyPatch, CreateCompanyInput};
use async_trait::async_trait;
use sqlx::MySqlPool;

const COMPANY_COLUMNS: &str =
    "id, name, code, country, website, phone, status, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Insert an active company and return its generated id
    async fn create(&self, input: &CreateCompanyInput) -> StoreResult<i64>;
    /// Fetch an active company; deleted and missing ids both yield `NoRows`
    async fn find_by_id(&self, id: i64) -> StoreResult<Company>;
    /// Active companies matching every present predicate; empty yields `NoRows`
    async fn list(&self, filter: &CompanyFilter) -> StoreResult<Vec<Company>>;
    /// Coalescing partial update of an active company
    async fn update(&self, patch: &CompanyPatch) -> StoreResult<Company>;
    /// Transition an active company to deleted
    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;
}

pub struct CompanyRepositoryImpl {
    pool: MySqlPool,
}

impl CompanyRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// Build the list statement for `filter`. Values are bound positionally in
/// field order: id, name, code, country, website, phone, limit, offset.
pub(crate) fn build_list_sql(filter: &CompanyFilter) -> String {
    let mut sql = format!(
        "SELECT {} FROM companies WHERE status = 'active'",
        COMPANY_COLUMNS
    );

    if filter.id.is_some() {
        sql.push_str(" AND id = ?");
    }
    if filter.name.is_some() {
        sql.push_str(" AND name = ?");
    }
    if filter.code.is_some() {
        sql.push_str(" AND code = ?");
    }
    if filter.country.is_some() {
        sql.push_str(" AND country = ?");
    }
    if filter.website.is_some() {
        sql.push_str(" AND website = ?");
    }
    if filter.phone.is_some() {
        sql.push_str(" AND phone = ?");
    }

    sql.push_str(" ORDER BY id LIMIT ? OFFSET ?");
    sql
}

#[async_trait]
impl CompanyRepository for CompanyRepositoryImpl {
    async fn create(&self, input: &CreateCompanyInput) -> StoreResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO companies (name, code, country, website, phone, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, 'active', NOW(), NOW())
            "#,
        )
        .bind(&input.name)
        .bind(&input.code)
        .bind(&input.country)
        .bind(&input.website)
        .bind(&input.phone)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id() as i64)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Company> {
        let sql = format!(
            "SELECT {} FROM companies WHERE id = ? AND status = 'active'",
            COMPANY_COLUMNS
        );
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        company.ok_or(StoreError::NoRows)
    }

    async fn list(&self, filter: &CompanyFilter) -> StoreResult<Vec<Company>> {
        let sql = build_list_sql(filter);
        let mut query_builder = sqlx::query_as::<_, Company>(&sql);

        if let Some(id) = filter.id {
            query_builder = query_builder.bind(id);
        }
        if let Some(ref name) = filter.name {
            query_builder = query_builder.bind(name);
        }
        if let Some(ref code) = filter.code {
            query_builder = query_builder.bind(code);
        }
        if let Some(ref country) = filter.country {
            query_builder = query_builder.bind(country);
        }
        if let Some(ref website) = filter.website {
            query_builder = query_builder.bind(website);
        }
        if let Some(ref phone) = filter.phone {
            query_builder = query_builder.bind(phone);
        }

        query_builder = query_builder
            .bind(filter.limit)
            .bind(filter.offset.unwrap_or(0));

        let companies = query_builder.fetch_all(&self.pool).await?;
        if companies.is_empty() {
            return Err(StoreError::NoRows);
        }
        Ok(companies)
    }

    async fn update(&self, patch: &CompanyPatch) -> StoreResult<Company> {
        let mut tx = self.pool.begin().await?;

        let locked: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM companies WHERE id = ? AND status = 'active' FOR UPDATE",
        )
        .bind(patch.id)
        .fetch_optional(&mut *tx)
        .await?;

        if locked.is_none() {
            tx.rollback().await?;
            return Err(StoreError::NoRows);
        }

        sqlx::query(
            r#"
            UPDATE companies
            SET name = COALESCE(?, name),
                code = COALESCE(?, code),
                country = COALESCE(?, country),
                website = COALESCE(?, website),
                phone = COALESCE(?, phone),
                updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(&patch.name)
        .bind(&patch.code)
        .bind(&patch.country)
        .bind(&patch.website)
        .bind(&patch.phone)
        .bind(patch.id)
        .execute(&mut *tx)
        .await?;

        let sql = format!("SELECT {} FROM companies WHERE id = ?", COMPANY_COLUMNS);
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(patch.id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(company)
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE companies SET status = 'deleted', updated_at = NOW() WHERE id = ? AND status <> 'deleted'",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(StoreError::NoRows);
        }

        tx.commit().await?;
        Ok(())
    }
}
