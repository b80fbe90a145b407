//! API Router with Swagger UI

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::{ApiKeyPayload, BookingPayload, CustomerPayload};
use crate::api::handlers::{api_keys, bookings, customers, entry, health, rooms};
use crate::api::metrics::track_metrics;
use crate::api::ApiState;
use crate::auth::middleware::{require_api_key, AuthState};
use crate::domain::{PaymentMethod, RoomType};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "hotels_api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "Hotels-Api-Key",
                    "Plaintext API key issued via POST /api/keys/",
                ))),
            );
            components.add_security_scheme(
                "admin_user_name",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "Admin-User-Name",
                    "Admin the key was issued to",
                ))),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Entry
        entry::index,
        entry::entry_point,
        // Health
        health::health_check,
        // API Keys
        api_keys::create_api_key,
        api_keys::delete_api_key,
        // Rooms
        rooms::available_rooms,
        // Customers
        customers::create_customer,
        customers::get_customer,
        customers::update_customer,
        customers::delete_customer,
        // Bookings
        bookings::create_booking,
        bookings::get_booking,
        bookings::update_booking,
        bookings::delete_booking,
    ),
    components(
        schemas(
            ApiKeyPayload,
            CustomerPayload,
            BookingPayload,
            RoomType,
            PaymentMethod,
            health::HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Entry", description = "Service banner and the hypermedia entry point. Start from `GET /api/` and follow the `bookie:*` controls."),
        (name = "Health", description = "Service health check. Use for uptime monitoring."),
        (name = "API Keys", description = "Exchange admin credentials for an API key. The plaintext key is shown **once**; pass it in the `Hotels-Api-Key` header together with `Admin-User-Name`."),
        (name = "Rooms", description = "Room availability search across every hotel in a location. A room qualifies when none of its booked nights intersect the requested stay."),
        (name = "Customers", description = "Customer records. Reading or updating a customer requires the customer to have a booking in the calling admin's hotel."),
        (name = "Bookings", description = "Bookings. The service picks the first free room of the requested type; clients never choose a room directly."),
    ),
    info(
        title = "Hotel Booking Assistant API",
        version = "1.0.0",
        description = "REST API for hotel administrators: customers, bookings and room availability.

## Authentication

Create a key with `POST /api/keys/` using your admin credentials, then send
every protected request with two headers:

- `Hotels-Api-Key: <key>`
- `Admin-User-Name: <username>`

## Response format

All success and error bodies are Mason hypermedia documents
(`application/vnd.mason+json`). Follow the `bookie:*` controls from
`GET /api/` instead of hardcoding URLs.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `prometheus` is the installed recorder handle; pass `None` to skip the
/// `/metrics` route (tests).
pub fn create_api_router(db: DatabaseConnection, prometheus: Option<PrometheusHandle>) -> Router {
    let state = ApiState::new(db.clone());
    let auth_state = AuthState { db };

    // every route below requires the API key headers
    let protected = Router::new()
        .route("/api/rooms/{country}/{city}/", get(rooms::available_rooms))
        .route("/api/customers/", post(customers::create_customer))
        .route(
            "/api/customers/{customer_id}/",
            get(customers::get_customer)
                .put(customers::update_customer)
                .delete(customers::delete_customer),
        )
        .route("/api/bookings/", post(bookings::create_booking))
        .route(
            "/api/bookings/{booking_ref}/",
            get(bookings::get_booking)
                .put(bookings::update_booking)
                .delete(bookings::delete_booking),
        )
        .route_layer(middleware::from_fn_with_state(auth_state, require_api_key));

    let mut app = Router::new()
        .route("/", get(entry::index))
        .route("/api/", get(entry::entry_point))
        // POST is open (credentials are the body), DELETE checks the key
        // itself, so this route stays outside the protected group
        .route(
            "/api/keys/",
            post(api_keys::create_api_key).delete(api_keys::delete_api_key),
        )
        .route("/api/health", get(health::health_check))
        .merge(protected);

    if let Some(handle) = prometheus {
        app = app.route("/metrics", get(move || std::future::ready(handle.render())));
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    app.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(track_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ── End-to-end tests ───────────────────────────────────────────
