//! Booking handlers
//!
//! Creating or moving a booking never takes a room id from the client: the
//! conflict scan picks the first room of the requested type whose booked
//! nights do not intersect the stay.

use axum::extract::{Path, State};
use axum::Extension;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, ModelTrait, Set};
use serde_json::{json, Value};
use tracing::info;

use crate::api::controls::{booking_href, BOOKINGS_HREF};
use crate::api::dto::BookingPayload;
use crate::api::error::ApiError;
use crate::api::mason::{Mason, MasonBuilder, LINK_RELATIONS_URL, NAMESPACE};
use crate::api::validated_json::ValidatedJson;
use crate::api::ApiState;
use crate::auth::guards::{ensure_booking_admin, ensure_hotel_admin};
use crate::auth::middleware::AdminIdentity;
use crate::domain::availability::Stay;
use crate::infrastructure::database::entities::{booking, customer, room};

fn booking_item(record: &booking::Model) -> Value {
    let mut item = MasonBuilder::new();
    item.insert("booking_ref", record.booking_ref);
    item.insert("room_id", record.room_id);
    item.insert("customer_id", record.customer_id);
    item.insert("check_in", record.check_in);
    item.insert("check_out", record.check_out);
    item.insert("payment", &record.payment);
    item.add_control("self", &booking_href(record.booking_ref), json!({}));
    item.build()
}

fn booking_document(record: &booking::Model) -> MasonBuilder {
    let mut body = MasonBuilder::new();
    body.add_namespace(NAMESPACE, LINK_RELATIONS_URL);
    body.add_control_get_booking(record.booking_ref);
    body.add_control_add_booking();
    body.add_control_edit_booking(record.booking_ref);
    body.add_control_delete_booking(record.booking_ref);
    body.insert("item", json!([booking_item(record)]));
    body
}

async fn load_booking(state: &ApiState, booking_ref: i32) -> Result<booking::Model, ApiError> {
    booking::Entity::find_by_id(booking_ref)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)
}

/// Resolve the payload to a free room in the admin's hotel.
///
/// Shared by create and update; the two differ only in their conflict
/// message.
async fn pick_free_room(
    state: &ApiState,
    admin: &AdminIdentity,
    payload: &BookingPayload,
    conflict_message: &str,
) -> Result<(customer::Model, room::Model, Stay), ApiError> {
    let target_hotel = ensure_hotel_admin(&state.db, admin, &payload.hotel).await?;

    let guest = customer::Entity::find_by_id(payload.customer_id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    let stay = Stay::new(payload.check_in, payload.check_out)
        .map_err(|_| ApiError::BadRequest("Incorrect check-in/check-out dates".to_string()))?;

    let rooms = state
        .bookings
        .rooms_of_type(target_hotel.id, payload.room_type.as_str())
        .await?;
    if rooms.is_empty() {
        return Err(ApiError::NotFound);
    }

    let free = state
        .bookings
        .first_free(&rooms, &stay)
        .await?
        .ok_or_else(|| ApiError::Conflict(conflict_message.to_string()))?;

    Ok((guest, free, stay))
}

/// Create a booking
///
/// The admin must run the hotel named in the body.
#[utoipa::path(
    post,
    path = "/api/bookings/",
    tag = "Bookings",
    request_body = BookingPayload,
    security(
        ("hotels_api_key" = [], "admin_user_name" = [])
    ),
    responses(
        (status = 200, description = "Booking created"),
        (status = 400, description = "Incorrect check-in/check-out dates"),
        (status = 403, description = "Admin does not run the requested hotel"),
        (status = 404, description = "Unknown customer, or no rooms of the type"),
        (status = 409, description = "No room of the requested type is available")
    )
)]
pub async fn create_booking(
    State(state): State<ApiState>,
    Extension(admin): Extension<AdminIdentity>,
    ValidatedJson(payload): ValidatedJson<BookingPayload>,
) -> Result<Mason, ApiError> {
    let (guest, free, stay) = pick_free_room(
        &state,
        &admin,
        &payload,
        "Failure in POST: No room of the requested type is available",
    )
    .await?;

    let inserted = booking::ActiveModel {
        room_id: Set(Some(free.id)),
        customer_id: Set(Some(guest.id)),
        check_in: Set(stay.check_in()),
        check_out: Set(stay.check_out()),
        payment: Set(payload.payment.as_str().to_string()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(
        booking_ref = inserted.booking_ref,
        room_id = free.id,
        "Booking created"
    );
    Ok(Mason::ok(booking_document(&inserted)))
}

/// Booking details
#[utoipa::path(
    get,
    path = "/api/bookings/{booking_ref}/",
    tag = "Bookings",
    params(
        ("booking_ref" = i32, Path, description = "Booking reference")
    ),
    security(
        ("hotels_api_key" = [], "admin_user_name" = [])
    ),
    responses(
        (status = 200, description = "Booking document"),
        (status = 403, description = "Admin does not run the booked hotel"),
        (status = 404, description = "No such booking")
    )
)]
pub async fn get_booking(
    State(state): State<ApiState>,
    Extension(admin): Extension<AdminIdentity>,
    Path(booking_ref): Path<i32>,
) -> Result<Mason, ApiError> {
    let record = load_booking(&state, booking_ref).await?;
    ensure_booking_admin(&state.db, &admin, &record).await?;

    let mut body = booking_document(&record);
    body.add_control("self", &booking_href(record.booking_ref), json!({}));
    body.add_control("bookingcollection", BOOKINGS_HREF, json!({}));
    Ok(Mason::ok(body))
}

/// Re-target a booking
///
/// Runs the same availability scan as creation over the stored bookings of
/// every candidate room.
#[utoipa::path(
    put,
    path = "/api/bookings/{booking_ref}/",
    tag = "Bookings",
    params(
        ("booking_ref" = i32, Path, description = "Booking reference")
    ),
    request_body = BookingPayload,
    security(
        ("hotels_api_key" = [], "admin_user_name" = [])
    ),
    responses(
        (status = 200, description = "Booking updated"),
        (status = 400, description = "Incorrect check-in/check-out dates"),
        (status = 403, description = "Admin does not run the requested hotel"),
        (status = 404, description = "Unknown booking or customer, or no rooms of the type"),
        (status = 409, description = "No rooms corresponding to the criteria are available")
    )
)]
pub async fn update_booking(
    State(state): State<ApiState>,
    Extension(admin): Extension<AdminIdentity>,
    Path(booking_ref): Path<i32>,
    ValidatedJson(payload): ValidatedJson<BookingPayload>,
) -> Result<Mason, ApiError> {
    let record = load_booking(&state, booking_ref).await?;

    let (guest, free, stay) = pick_free_room(
        &state,
        &admin,
        &payload,
        "No rooms corresponding to the criteria are available",
    )
    .await?;

    let mut active = record.into_active_model();
    active.room_id = Set(Some(free.id));
    active.customer_id = Set(Some(guest.id));
    active.check_in = Set(stay.check_in());
    active.check_out = Set(stay.check_out());
    active.payment = Set(payload.payment.as_str().to_string());

    let updated = active.update(&state.db).await?;

    info!(
        booking_ref = updated.booking_ref,
        room_id = free.id,
        "Booking updated"
    );
    Ok(Mason::ok(booking_document(&updated)))
}

/// Delete a booking
#[utoipa::path(
    delete,
    path = "/api/bookings/{booking_ref}/",
    tag = "Bookings",
    params(
        ("booking_ref" = i32, Path, description = "Booking reference")
    ),
    security(
        ("hotels_api_key" = [], "admin_user_name" = [])
    ),
    responses(
        (status = 200, description = "Booking deleted"),
        (status = 403, description = "Admin does not run the booked hotel"),
        (status = 404, description = "No such booking")
    )
)]
pub async fn delete_booking(
    State(state): State<ApiState>,
    Extension(admin): Extension<AdminIdentity>,
    Path(booking_ref): Path<i32>,
) -> Result<Mason, ApiError> {
    let record = load_booking(&state, booking_ref).await?;
    ensure_booking_admin(&state.db, &admin, &record).await?;

    record.delete(&state.db).await?;
    info!(booking_ref, "Booking deleted");

    let mut body = MasonBuilder::new();
    body.add_namespace(NAMESPACE, LINK_RELATIONS_URL);
    body.add_control_add_booking();
    Ok(Mason::ok(body))
}
