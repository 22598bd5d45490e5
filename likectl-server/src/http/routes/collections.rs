//! Collection endpoints - metadata, member pages and member ids

use std::sync::Arc;

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::companies::CompanyOutput;
use crate::http::error::ApiError;
use crate::http::extractors::{CollectionPath, QueryParams};
use crate::http::server::AppState;
use crate::models::PageParams;
use likectl_core::Collection;

/// Collection metadata
#[derive(Debug, Serialize)]
pub struct CollectionMetadata {
    pub id: String,
    pub collection_name: String,
}

impl From<Collection> for CollectionMetadata {
    fn from(c: Collection) -> Self {
        Self {
            id: c.id.to_string(),
            collection_name: c.collection_name,
        }
    }
}

/// Collection with one page of its member companies
#[derive(Debug, Serialize)]
pub struct CollectionOutput {
    pub id: String,
    pub collection_name: String,
    pub companies: Vec<CompanyOutput>,
    pub total: i64,
}

/// GET /collections - all collections
async fn list_collections(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CollectionMetadata>>, ApiError> {
    let collections = state.likes.list_collections().await?;
    Ok(Json(
        collections.into_iter().map(CollectionMetadata::from).collect(),
    ))
}

/// GET /collections/{collection_id} - page of member companies
async fn get_collection(
    State(state): State<Arc<AppState>>,
    CollectionPath(id): CollectionPath,
    QueryParams(params): QueryParams<PageParams>,
) -> Result<Json<CollectionOutput>, ApiError> {
    let (collection, page) = state.likes.collection_page(id, params.into()).await?;

    Ok(Json(CollectionOutput {
        id: collection.id.to_string(),
        collection_name: collection.collection_name,
        companies: page.items.into_iter().map(CompanyOutput::from).collect(),
        total: page.total,
    }))
}

/// GET /collections/{collection_id}/all-ids - every member company id
async fn all_company_ids(
    State(state): State<Arc<AppState>>,
    CollectionPath(id): CollectionPath,
) -> Result<Json<Vec<i32>>, ApiError> {
    let ids = state.likes.collection_company_ids(id).await?;
    Ok(Json(ids.into_iter().map(|id| id.get()).collect()))
}

/// Collection routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/collections", get(list_collections))
        .route("/collections/{collection_id}", get(get_collection))
        .route("/collections/{collection_id}/all-ids", get(all_company_ids))
}
