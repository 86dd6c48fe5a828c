//! Company endpoints. All routes sit behind the authorization gate.

use crate::api::ApiResponse;
use crate::domain::{Company, CompanyFilter, CompanyPatch, CreateCompanyInput};
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::state::HasServices;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::Deserialize;

/// `?id=N` query; parsed by hand so every failure reads "bad id"
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    pub fn parse(&self) -> Result<i64> {
        self.id
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or_else(|| AppError::BadRequest("bad id".to_string()))
    }
}

fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(value)| value)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

/// POST /company/create
pub async fn create_company<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    body: std::result::Result<Json<CreateCompanyInput>, JsonRejection>,
) -> Result<ApiResponse<&'static str>> {
    let input = json_body(body)?;
    let id = state.company_service().create(input).await?;

    tracing::info!(company_id = id, actor = %auth.username, "Company created");
    Ok(ApiResponse::ok("created"))
}

/// GET /company?id=N
pub async fn get_company<S: HasServices>(
    State(state): State<S>,
    Query(query): Query<IdQuery>,
) -> Result<ApiResponse<Company>> {
    let id = query.parse()?;
    let company = state.company_service().get(id).await?;
    Ok(ApiResponse::ok(company))
}

/// POST /companies
pub async fn list_companies<S: HasServices>(
    State(state): State<S>,
    body: std::result::Result<Json<CompanyFilter>, JsonRejection>,
) -> Result<ApiResponse<Vec<Company>>> {
    let filter = json_body(body)?;
    let companies = state.company_service().list(filter).await?;
    Ok(ApiResponse::ok(companies))
}

/// PATCH /company/update
pub async fn update_company<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    body: std::result::Result<Json<CompanyPatch>, JsonRejection>,
) -> Result<ApiResponse<&'static str>> {
    let patch = json_body(body)?;
    let company = state.company_service().update(patch).await?;

    tracing::info!(company_id = company.id, actor = %auth.username, "Company updated");
    Ok(ApiResponse::ok("updated"))
}

/// DELETE /company?id=N
pub async fn delete_company<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Query(query): Query<IdQuery>,
) -> Result<ApiResponse<&'static str>> {
    let id = query.parse()?;
    state.company_service().delete(id).await?;

    tracing::info!(company_id = id, actor = %auth.username, "Company deleted");
    Ok(ApiResponse::ok("deleted"))
}
