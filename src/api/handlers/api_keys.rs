//! API key issuance and revocation
//!
//! POST exchanges admin credentials for a fresh key and is the only
//! unauthenticated write in the API; DELETE revokes the calling admin's
//! own key.

use axum::extract::State;
use axum::http::HeaderMap;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde_json::json;
use tracing::info;

use crate::api::dto::ApiKeyPayload;
use crate::api::error::ApiError;
use crate::api::mason::{Mason, MasonBuilder, LINK_RELATIONS_URL, NAMESPACE};
use crate::api::validated_json::ValidatedJson;
use crate::api::ApiState;
use crate::auth::api_key::{generate_api_key, hash_api_key};
use crate::auth::middleware::authenticate;
use crate::auth::password::verify_password;
use crate::infrastructure::database::entities::{admin, api_key};

/// Issue a new API key
///
/// The plaintext key is returned once in the `item` array and never again;
/// only its digest is stored.
#[utoipa::path(
    post,
    path = "/api/keys/",
    tag = "API Keys",
    request_body = ApiKeyPayload,
    responses(
        (status = 200, description = "Key issued; plaintext key in the item array"),
        (status = 401, description = "Incorrect username or password"),
        (status = 409, description = "Admin already has an API key")
    )
)]
pub async fn create_api_key(
    State(state): State<ApiState>,
    ValidatedJson(payload): ValidatedJson<ApiKeyPayload>,
) -> Result<Mason, ApiError> {
    let admin_row = admin::Entity::find()
        .filter(admin::Column::Username.eq(&payload.username))
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Incorrect username or password!".to_string()))?;

    if !verify_password(&payload.password, &admin_row.password_hash)? {
        return Err(ApiError::Unauthorized(
            "Incorrect username or password!".to_string(),
        ));
    }

    let existing = api_key::Entity::find()
        .filter(api_key::Column::AdminUsername.eq(&admin_row.username))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(ApiError::Conflict(
            "Failure in POST: Admin already has an API key!".to_string(),
        ));
    }

    let token = generate_api_key();
    api_key::ActiveModel {
        key_hash: Set(hash_api_key(&token)),
        admin_username: Set(Some(admin_row.username.clone())),
    }
    .insert(&state.db)
    .await?;

    info!(username = %admin_row.username, "API key issued");

    let mut body = MasonBuilder::new();
    body.add_namespace(NAMESPACE, LINK_RELATIONS_URL);
    body.add_control_delete_apikey();
    body.insert(
        "item",
        json!([{ "key": token, "admin_username": admin_row.username }]),
    );
    Ok(Mason::ok(body))
}

/// Revoke the calling admin's API key
#[utoipa::path(
    delete,
    path = "/api/keys/",
    tag = "API Keys",
    security(
        ("hotels_api_key" = [], "admin_user_name" = [])
    ),
    responses(
        (status = 200, description = "Key revoked"),
        (status = 400, description = "Auth header missing"),
        (status = 403, description = "Key mismatch or admin has no key")
    )
)]
pub async fn delete_api_key(
    State(state): State<ApiState>,
    headers: HeaderMap,
) -> Result<Mason, ApiError> {
    // this route shares its path with the unauthenticated POST, so the key
    // check runs here instead of in the route middleware
    let identity = authenticate(&state.db, &headers).await?;

    api_key::Entity::delete_many()
        .filter(api_key::Column::AdminUsername.eq(&identity.username))
        .exec(&state.db)
        .await?;

    info!(username = %identity.username, "API key revoked");

    let mut body = MasonBuilder::new();
    body.add_namespace(NAMESPACE, LINK_RELATIONS_URL);
    body.add_control_add_apikey();
    Ok(Mason::ok(body))
}
