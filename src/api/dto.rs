//! Request payloads and the JSON schemas embedded in hypermedia controls.
//!
//! The schemas mirror what the POST/PUT controls advertise to clients;
//! incoming bodies are checked by the same rules through serde typing and
//! the `validator` derives.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{PaymentMethod, RoomType};

/// Credentials exchanged for a new API key.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ApiKeyPayload {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(length(min = 1, max = 64))]
    pub password: String,
}

impl ApiKeyPayload {
    pub fn json_schema() -> Value {
        json!({
            "type": "object",
            "required": ["username", "password"],
            "properties": {
                "username": {"type": "string"},
                "password": {"type": "string"},
            }
        })
    }
}

/// Customer record payload (create and full update).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CustomerPayload {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[validate(length(min = 1, max = 64))]
    pub phone: String,
    #[validate(email)]
    pub mail: String,
    #[validate(length(min = 1, max = 64))]
    pub address: String,
}

impl CustomerPayload {
    pub fn json_schema() -> Value {
        json!({
            "type": "object",
            "required": ["name", "phone", "mail", "address"],
            "properties": {
                "name": {"type": "string"},
                "phone": {"type": "string"},
                "mail": {"type": "string", "format": "email"},
                "address": {"type": "string"},
            }
        })
    }
}

/// Booking payload (create and full update). The hotel is referenced by
/// name; the room is chosen by the availability scan, not the client.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookingPayload {
    pub customer_id: i32,
    #[validate(length(min = 1, max = 64))]
    pub hotel: String,
    pub room_type: RoomType,
    pub payment: PaymentMethod,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl BookingPayload {
    pub fn json_schema() -> Value {
        json!({
            "type": "object",
            "required": ["customer_id", "hotel", "room_type", "payment", "check_in", "check_out"],
            "properties": {
                "customer_id": {"type": "integer"},
                "hotel": {"type": "string"},
                "room_type": {"type": "string", "enum": ["single", "double", "suite"]},
                "payment": {"type": "string", "enum": ["debit", "credit", "cash"]},
                "check_in": {"type": "string", "format": "date"},
                "check_out": {"type": "string", "format": "date"},
            }
        })
    }
}

/// Availability search parameters. All fields are optional so handlers can
/// report exactly which one is missing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    /// Requested room category: single, double or suite
    pub room_type: Option<String>,
    /// Check-in date (YYYY-MM-DD)
    pub check_in: Option<String>,
    /// Check-out date (YYYY-MM-DD)
    pub check_out: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_payload_parses_dates_and_enums() {
        let payload: BookingPayload = serde_json::from_value(json!({
            "customer_id": 1,
            "hotel": "Hotel Aurora",
            "room_type": "double",
            "payment": "cash",
            "check_in": "2024-06-10",
            "check_out": "2024-06-13",
        }))
        .unwrap();

        assert_eq!(payload.room_type, RoomType::Double);
        assert_eq!(payload.payment, PaymentMethod::Cash);
        assert!(payload.check_in < payload.check_out);
    }

    #[test]
    fn unknown_room_type_is_rejected_at_parse_time() {
        let result = serde_json::from_value::<BookingPayload>(json!({
            "customer_id": 1,
            "hotel": "Hotel Aurora",
            "room_type": "penthouse",
            "payment": "cash",
            "check_in": "2024-06-10",
            "check_out": "2024-06-13",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn customer_mail_must_be_an_email() {
        let payload = CustomerPayload {
            name: "Maija".to_string(),
            phone: "+358401234567".to_string(),
            mail: "not-an-email".to_string(),
            address: "Yliopistokatu 1".to_string(),
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn control_schemas_list_required_fields() {
        let schema = BookingPayload::json_schema();
        assert_eq!(schema["required"].as_array().unwrap().len(), 6);
        assert_eq!(
            schema["properties"]["payment"]["enum"],
            json!(["debit", "credit", "cash"])
        );
    }
}
