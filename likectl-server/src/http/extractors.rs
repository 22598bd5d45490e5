//! Custom Axum extractors
//!
//! Every rejection goes through [`ApiError`], so malformed paths, query
//! strings and bodies all answer with the JSON error shape.

use axum::extract::{FromRequest, FromRequestParts, Path};
use axum::http::request::Parts;
use uuid::Uuid;

use super::error::ApiError;
use likectl_core::{CollectionId, CompanyId};

/// Extract a company id from the path
pub struct CompanyPath(pub CompanyId);

impl<S> FromRequestParts<S> for CompanyPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::BadRequest {
                message: "missing company id".into(),
            })?;

        let id = raw.parse::<i32>().map_err(|_| ApiError::BadRequest {
            message: format!("invalid company id '{}'", raw),
        })?;

        Ok(Self(CompanyId(id)))
    }
}

/// Extract and validate a collection UUID from the path
pub struct CollectionPath(pub CollectionId);

impl<S> FromRequestParts<S> for CollectionPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::BadRequest {
                message: "missing collection id".into(),
            })?;

        let uuid = Uuid::parse_str(&raw).map_err(|_| ApiError::BadRequest {
            message: format!("invalid collection id '{}': expected a UUID", raw),
        })?;

        Ok(Self(CollectionId(uuid)))
    }
}

/// `Json<T>` whose rejection is an [`ApiError`]
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// `Query<T>` whose rejection is an [`ApiError`]
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct QueryParams<T>(pub T);
