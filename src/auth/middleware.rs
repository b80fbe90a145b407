//! Authentication middleware for Axum
//!
//! Protected routes require two headers: `Hotels-Api-Key` carrying the
//! plaintext key and `Admin-User-Name` naming the admin it was issued to.
//! A missing header is a 400; a missing or mismatched key is a 403.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use super::api_key::verify_api_key;
use crate::api::error::ApiError;
use crate::infrastructure::database::entities::{admin, api_key};

/// Header carrying the plaintext API key
pub const API_KEY_HEADER: &str = "Hotels-Api-Key";
/// Header naming the admin the key belongs to
pub const ADMIN_HEADER: &str = "Admin-User-Name";

/// Authentication state shared by the middleware
#[derive(Clone)]
pub struct AuthState {
    pub db: DatabaseConnection,
}

/// The admin a request was authenticated as
#[derive(Clone, Debug)]
pub struct AdminIdentity {
    pub id: i32,
    pub username: String,
    pub hotel_id: Option<i32>,
}

/// Resolve the auth headers to an admin, or fail with the matching error.
///
/// Used by the middleware and directly by handlers on mixed-method routes
/// where only some methods are protected.
pub async fn authenticate(
    db: &DatabaseConnection,
    headers: &HeaderMap,
) -> Result<AdminIdentity, ApiError> {
    let Some(key) = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) else {
        return Err(ApiError::BadRequest(
            "Header (Hotels-Api-Key) was not provided!".to_string(),
        ));
    };

    let Some(username) = headers.get(ADMIN_HEADER).and_then(|v| v.to_str().ok()) else {
        return Err(ApiError::BadRequest(
            "Header (Admin-User-Name) was not provided!".to_string(),
        ));
    };

    let stored = api_key::Entity::find()
        .filter(api_key::Column::AdminUsername.eq(username))
        .one(db)
        .await?
        .ok_or_else(|| ApiError::Forbidden("Admin has no API key!".to_string()))?;

    if !verify_api_key(key, &stored.key_hash) {
        return Err(ApiError::Forbidden("Admin is unauthorized!".to_string()));
    }

    let admin_row = admin::Entity::find()
        .filter(admin::Column::Username.eq(username))
        .one(db)
        .await?
        .ok_or_else(|| ApiError::Forbidden("Admin is unauthorized!".to_string()))?;

    Ok(AdminIdentity {
        id: admin_row.id,
        username: admin_row.username,
        hotel_id: admin_row.hotel_id,
    })
}

/// API key middleware - requires a valid key for every request passing it.
///
/// On success the [`AdminIdentity`] is inserted into request extensions for
/// handlers and affiliation guards.
pub async fn require_api_key(
    State(state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(&state.db, request.headers()).await {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(err) => err.into_response(),
    }
}
