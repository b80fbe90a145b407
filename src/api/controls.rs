//! Hypermedia controls of the booking workflow.
//!
//! One helper per `bookie:*` link relation, mirroring what each endpoint
//! advertises. Kept next to the href builders so a route change touches a
//! single file.

use super::dto::{ApiKeyPayload, BookingPayload, CustomerPayload};
use super::mason::MasonBuilder;

pub const ENTRY_HREF: &str = "/api/";
pub const KEYS_HREF: &str = "/api/keys/";
pub const CUSTOMERS_HREF: &str = "/api/customers/";
pub const BOOKINGS_HREF: &str = "/api/bookings/";

pub fn customer_href(customer_id: i32) -> String {
    format!("{}{}/", CUSTOMERS_HREF, customer_id)
}

pub fn booking_href(booking_ref: i32) -> String {
    format!("{}{}/", BOOKINGS_HREF, booking_ref)
}

pub fn rooms_href(country: &str, city: &str) -> String {
    format!("/api/rooms/{}/{}/", country, city)
}

impl MasonBuilder {
    pub fn add_control_get_customer(&mut self, customer_id: i32) {
        self.add_control_get(
            "bookie:customer-details",
            "Details of the customer",
            &customer_href(customer_id),
        );
    }

    pub fn add_control_add_customer(&mut self) {
        self.add_control_post(
            "bookie:add-customer",
            "Add new customer",
            CUSTOMERS_HREF,
            CustomerPayload::json_schema(),
        );
    }

    pub fn add_control_edit_customer(&mut self, customer_id: i32) {
        self.add_control_put(
            "bookie:edit-customer",
            "Update customer",
            &customer_href(customer_id),
            CustomerPayload::json_schema(),
        );
    }

    pub fn add_control_delete_customer(&mut self, customer_id: i32) {
        self.add_control_delete(
            "bookie:delete-customer",
            "Delete the customer",
            &customer_href(customer_id),
        );
    }

    pub fn add_control_get_booking(&mut self, booking_ref: i32) {
        self.add_control_get(
            "bookie:booking-details",
            "Details of the booking",
            &booking_href(booking_ref),
        );
    }

    pub fn add_control_add_booking(&mut self) {
        self.add_control_post(
            "bookie:add-booking",
            "Add new booking",
            BOOKINGS_HREF,
            BookingPayload::json_schema(),
        );
    }

    pub fn add_control_edit_booking(&mut self, booking_ref: i32) {
        self.add_control_put(
            "bookie:edit-booking",
            "Update booking",
            &booking_href(booking_ref),
            BookingPayload::json_schema(),
        );
    }

    pub fn add_control_delete_booking(&mut self, booking_ref: i32) {
        self.add_control_delete(
            "bookie:delete-booking",
            "Delete booking",
            &booking_href(booking_ref),
        );
    }

    pub fn add_control_add_apikey(&mut self) {
        self.add_control_post(
            "bookie:add-apikey",
            "Add a new Api Key",
            KEYS_HREF,
            ApiKeyPayload::json_schema(),
        );
    }

    pub fn add_control_delete_apikey(&mut self) {
        self.add_control_delete("bookie:delete-apikey", "Delete API key", KEYS_HREF);
    }

    pub fn add_control_avl_rooms(&mut self, country: &str, city: &str) {
        self.add_control_get(
            "bookie:room-avl",
            "Available rooms",
            &rooms_href(country, city),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hrefs_embed_identifiers() {
        assert_eq!(customer_href(7), "/api/customers/7/");
        assert_eq!(booking_href(1001), "/api/bookings/1001/");
        assert_eq!(rooms_href("Finland", "Oulu"), "/api/rooms/Finland/Oulu/");
    }

    #[test]
    fn post_controls_embed_their_schema() {
        let mut body = MasonBuilder::new();
        body.add_control_add_booking();

        let doc = body.build();
        let ctrl = &doc["@controls"]["bookie:add-booking"];
        assert_eq!(ctrl["href"], json!(BOOKINGS_HREF));
        assert_eq!(
            ctrl["schema"]["required"],
            json!(["customer_id", "hotel", "room_type", "payment", "check_in", "check_out"])
        );
    }
}
