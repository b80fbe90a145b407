//! Service root and hypermedia entry point

use crate::api::mason::{Mason, MasonBuilder, LINK_RELATIONS_URL, NAMESPACE};

/// Home page
#[utoipa::path(
    get,
    path = "/",
    tag = "Entry",
    responses(
        (status = 200, description = "Plain-text service banner")
    )
)]
pub async fn index() -> &'static str {
    "Hotel Booking Assistant API"
}

/// Hypermedia entry point
///
/// Lists the controls a client can start from: adding a booking and adding
/// a customer.
#[utoipa::path(
    get,
    path = "/api/",
    tag = "Entry",
    responses(
        (status = 200, description = "Mason document with the starting controls")
    )
)]
pub async fn entry_point() -> Mason {
    let mut body = MasonBuilder::new();
    body.add_namespace(NAMESPACE, LINK_RELATIONS_URL);
    body.add_control_add_booking();
    body.add_control_add_customer();
    Mason::ok(body)
}
