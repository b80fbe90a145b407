//! Room availability search

use axum::extract::{Path, Query, State};
use axum::Extension;
use chrono::NaiveDate;
use serde_json::Value;

use crate::api::dto::AvailabilityQuery;
use crate::api::error::ApiError;
use crate::api::mason::{Mason, MasonBuilder, LINK_RELATIONS_URL, NAMESPACE};
use crate::api::ApiState;
use crate::auth::middleware::AdminIdentity;
use crate::domain::availability::Stay;
use crate::infrastructure::database::entities::{hotel, room};

fn room_item(owner: &hotel::Model, record: &room::Model) -> Value {
    let mut item = MasonBuilder::new();
    item.insert("hotel_name", &owner.name);
    item.insert("hotel_address", &owner.street);
    item.insert("room_type", &record.room_type);
    item.insert("price", record.price);
    item.add_control_avl_rooms(&owner.country, &owner.city);
    item.build()
}

/// Search free rooms in a location
///
/// Scans every hotel in the given country and city for rooms of the
/// requested type that are free for the whole stay.
#[utoipa::path(
    get,
    path = "/api/rooms/{country}/{city}/",
    tag = "Rooms",
    params(
        ("country" = String, Path, description = "Hotel country"),
        ("city" = String, Path, description = "Hotel city"),
        AvailabilityQuery
    ),
    security(
        ("hotels_api_key" = [], "admin_user_name" = [])
    ),
    responses(
        (status = 200, description = "Mason document with one item per free room"),
        (status = 400, description = "Missing or invalid query parameter"),
        (status = 409, description = "No rooms fulfilling the criteria are available")
    )
)]
pub async fn available_rooms(
    State(state): State<ApiState>,
    Extension(_admin): Extension<AdminIdentity>,
    Path((country, city)): Path<(String, String)>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Mason, ApiError> {
    let Some(room_type) = query.room_type else {
        return Err(ApiError::BadRequest(
            "Missing query parameter: room_type".to_string(),
        ));
    };
    let Some(check_in) = query.check_in else {
        return Err(ApiError::BadRequest(
            "Missing query parameter: check_in".to_string(),
        ));
    };
    let Some(check_out) = query.check_out else {
        return Err(ApiError::BadRequest(
            "Missing query parameter: check_out".to_string(),
        ));
    };

    let (Ok(check_in), Ok(check_out)) = (
        NaiveDate::parse_from_str(&check_in, "%Y-%m-%d"),
        NaiveDate::parse_from_str(&check_out, "%Y-%m-%d"),
    ) else {
        return Err(ApiError::BadRequest(
            "Invalid query parameter value(s)".to_string(),
        ));
    };

    let stay = Stay::new(check_in, check_out)
        .map_err(|_| ApiError::BadRequest("Incorrect check-in/check-out dates".to_string()))?;

    let found = state
        .bookings
        .available_rooms(&country, &city, &room_type, &stay)
        .await?;
    if found.is_empty() {
        return Err(ApiError::Conflict(
            "Failure in GET: No rooms fulfilling the criteria are available".to_string(),
        ));
    }

    let items: Vec<Value> = found
        .iter()
        .map(|(owner, record)| room_item(owner, record))
        .collect();

    let mut body = MasonBuilder::new();
    body.add_namespace(NAMESPACE, LINK_RELATIONS_URL);
    body.add_control_avl_rooms(&country, &city);
    body.insert("items", items);
    Ok(Mason::ok(body))
}
