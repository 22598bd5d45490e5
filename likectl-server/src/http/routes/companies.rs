//! Company endpoints - listing and liked-collection maintenance

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::{CompanyPath, JsonBody, QueryParams};
use crate::http::server::AppState;
use crate::models::PageParams;
use likectl_core::{AnnotatedCompany, CompanyId};

/// Company with liked flag
#[derive(Debug, Serialize)]
pub struct CompanyOutput {
    pub id: i32,
    pub company_name: String,
    pub liked: bool,
}

impl From<AnnotatedCompany> for CompanyOutput {
    fn from(c: AnnotatedCompany) -> Self {
        Self {
            id: c.id.get(),
            company_name: c.company_name,
            liked: c.liked,
        }
    }
}

/// Page of companies plus the total company count
#[derive(Debug, Serialize)]
pub struct CompanyBatchOutput {
    pub companies: Vec<CompanyOutput>,
    pub total: i64,
}

/// Body of bulk-like and bulk-like-all
#[derive(Debug, Deserialize)]
pub struct BulkLikeInput {
    pub company_ids: Vec<i32>,
}

impl BulkLikeInput {
    fn ids(&self) -> Vec<CompanyId> {
        self.company_ids.iter().copied().map(CompanyId).collect()
    }
}

#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct BulkLikeOutput {
    pub status: &'static str,
    pub added_count: u64,
}

#[derive(Debug, Serialize)]
pub struct LikeAllOutput {
    pub status: &'static str,
    pub processed: usize,
    pub added: u64,
    pub chunks: usize,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StatusMessageOutput {
    pub status: &'static str,
    pub message: String,
}

/// GET /companies - page of companies with liked flags
async fn list_companies(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<PageParams>,
) -> Result<Json<CompanyBatchOutput>, ApiError> {
    let page = state.likes.list_companies(params.into()).await?;

    Ok(Json(CompanyBatchOutput {
        companies: page.items.into_iter().map(CompanyOutput::from).collect(),
        total: page.total,
    }))
}

/// POST /companies/{company_id}/like - like a single company
async fn like_company(
    State(state): State<Arc<AppState>>,
    CompanyPath(id): CompanyPath,
) -> Result<Json<StatusOutput>, ApiError> {
    let added = state.likes.like(id).await?;
    tracing::debug!(company_id = %id, added, "like");

    Ok(Json(StatusOutput { status: "success" }))
}

/// POST /companies/bulk-like - like a set of companies in one commit
async fn bulk_like(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<BulkLikeInput>,
) -> Result<Json<BulkLikeOutput>, ApiError> {
    let added_count = state.likes.bulk_like(&input.ids()).await?;

    Ok(Json(BulkLikeOutput {
        status: "success",
        added_count,
    }))
}

/// POST /companies/bulk-like-all - like every given company, chunk by chunk
async fn bulk_like_all(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<BulkLikeInput>,
) -> Result<Json<LikeAllOutput>, ApiError> {
    let report = state.likes.like_all(&input.ids()).await?;
    tracing::info!(
        processed = report.processed,
        added = report.added,
        chunks = report.chunks,
        "like-all complete"
    );

    Ok(Json(LikeAllOutput {
        status: "success",
        processed: report.processed,
        added: report.added,
        chunks: report.chunks,
        message: format!(
            "Processed {} companies, {} newly liked",
            report.processed, report.added
        ),
    }))
}

/// POST /companies/reset-liked-companies - restore the default liked subset
async fn reset_liked_companies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusMessageOutput>, ApiError> {
    state.likes.reset().await?;

    Ok(Json(StatusMessageOutput {
        status: "success",
        message: "Reset done".into(),
    }))
}

/// Company routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/companies", get(list_companies))
        .route("/companies/bulk-like", post(bulk_like))
        .route("/companies/bulk-like-all", post(bulk_like_all))
        .route("/companies/reset-liked-companies", post(reset_liked_companies))
        .route("/companies/{company_id}/like", post(like_company))
}
