//! Customer CRUD handlers

use axum::extract::{Path, State};
use axum::Extension;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, ModelTrait, PaginatorTrait,
    QueryFilter, Set,
};
use serde_json::{json, Value};
use tracing::info;

use crate::api::controls::customer_href;
use crate::api::dto::CustomerPayload;
use crate::api::error::{conflict_on_unique, ApiError};
use crate::api::mason::{Mason, MasonBuilder, LINK_RELATIONS_URL, NAMESPACE};
use crate::api::validated_json::ValidatedJson;
use crate::api::ApiState;
use crate::auth::guards::ensure_customer_admin;
use crate::auth::middleware::AdminIdentity;
use crate::infrastructure::database::entities::{booking, customer};

fn customer_item(record: &customer::Model) -> Value {
    let mut item = MasonBuilder::new();
    item.insert("id", record.id);
    item.insert("name", &record.name);
    item.insert("phone", &record.phone);
    item.insert("mail", &record.mail);
    item.insert("address", &record.address);
    item.add_control("self", &customer_href(record.id), json!({}));
    item.build()
}

fn customer_document(record: &customer::Model) -> MasonBuilder {
    let mut body = MasonBuilder::new();
    body.add_namespace(NAMESPACE, LINK_RELATIONS_URL);
    body.add_control_get_customer(record.id);
    body.add_control_add_customer();
    body.add_control_edit_customer(record.id);
    body.add_control_delete_customer(record.id);
    body.insert("item", json!([customer_item(record)]));
    body
}

async fn load_customer(state: &ApiState, customer_id: i32) -> Result<customer::Model, ApiError> {
    customer::Entity::find_by_id(customer_id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)
}

/// Create a customer
#[utoipa::path(
    post,
    path = "/api/customers/",
    tag = "Customers",
    request_body = CustomerPayload,
    security(
        ("hotels_api_key" = [], "admin_user_name" = [])
    ),
    responses(
        (status = 200, description = "Customer created"),
        (status = 409, description = "E-mail already in use")
    )
)]
pub async fn create_customer(
    State(state): State<ApiState>,
    Extension(_admin): Extension<AdminIdentity>,
    ValidatedJson(payload): ValidatedJson<CustomerPayload>,
) -> Result<Mason, ApiError> {
    let inserted = customer::ActiveModel {
        name: Set(payload.name),
        phone: Set(payload.phone),
        mail: Set(payload.mail),
        address: Set(payload.address),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| conflict_on_unique(e, "Failure in POST: E-mail already in use"))?;

    info!(customer_id = inserted.id, "Customer created");
    Ok(Mason::ok(customer_document(&inserted)))
}

/// Customer details
///
/// Requires the customer to have a booking in the calling admin's hotel.
#[utoipa::path(
    get,
    path = "/api/customers/{customer_id}/",
    tag = "Customers",
    params(
        ("customer_id" = i32, Path, description = "Customer id")
    ),
    security(
        ("hotels_api_key" = [], "admin_user_name" = [])
    ),
    responses(
        (status = 200, description = "Customer document"),
        (status = 403, description = "Customer not affiliated with the admin's hotel"),
        (status = 404, description = "No such customer")
    )
)]
pub async fn get_customer(
    State(state): State<ApiState>,
    Extension(admin): Extension<AdminIdentity>,
    Path(customer_id): Path<i32>,
) -> Result<Mason, ApiError> {
    let record = load_customer(&state, customer_id).await?;
    ensure_customer_admin(&state.db, &admin, record.id).await?;
    Ok(Mason::ok(customer_document(&record)))
}

/// Update a customer
#[utoipa::path(
    put,
    path = "/api/customers/{customer_id}/",
    tag = "Customers",
    params(
        ("customer_id" = i32, Path, description = "Customer id")
    ),
    request_body = CustomerPayload,
    security(
        ("hotels_api_key" = [], "admin_user_name" = [])
    ),
    responses(
        (status = 200, description = "Customer updated"),
        (status = 403, description = "Customer not affiliated with the admin's hotel"),
        (status = 404, description = "No such customer"),
        (status = 409, description = "E-mail already in use")
    )
)]
pub async fn update_customer(
    State(state): State<ApiState>,
    Extension(admin): Extension<AdminIdentity>,
    Path(customer_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<CustomerPayload>,
) -> Result<Mason, ApiError> {
    let record = load_customer(&state, customer_id).await?;
    ensure_customer_admin(&state.db, &admin, record.id).await?;

    let mut active = record.into_active_model();
    active.name = Set(payload.name);
    active.phone = Set(payload.phone);
    active.mail = Set(payload.mail);
    active.address = Set(payload.address);

    let updated = active
        .update(&state.db)
        .await
        .map_err(|e| conflict_on_unique(e, "Failure in PUT: E-mail already in use"))?;

    Ok(Mason::ok(customer_document(&updated)))
}

/// Delete a customer
///
/// Refused while the customer still has bookings.
#[utoipa::path(
    delete,
    path = "/api/customers/{customer_id}/",
    tag = "Customers",
    params(
        ("customer_id" = i32, Path, description = "Customer id")
    ),
    security(
        ("hotels_api_key" = [], "admin_user_name" = [])
    ),
    responses(
        (status = 200, description = "Customer deleted"),
        (status = 404, description = "No such customer"),
        (status = 405, description = "Customer has bookings")
    )
)]
pub async fn delete_customer(
    State(state): State<ApiState>,
    Extension(_admin): Extension<AdminIdentity>,
    Path(customer_id): Path<i32>,
) -> Result<Mason, ApiError> {
    let record = load_customer(&state, customer_id).await?;

    let bookings = booking::Entity::find()
        .filter(booking::Column::CustomerId.eq(record.id))
        .count(&state.db)
        .await?;
    if bookings > 0 {
        return Err(ApiError::MethodNotAllowed(
            "DELETE not permitted (Customer has bookings)".to_string(),
        ));
    }

    let customer_id = record.id;
    record.delete(&state.db).await?;
    info!(customer_id, "Customer deleted");

    let mut body = MasonBuilder::new();
    body.add_namespace(NAMESPACE, LINK_RELATIONS_URL);
    body.add_control_add_customer();
    Ok(Mason::ok(body))
}
