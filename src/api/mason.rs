//! Mason hypermedia document support.
//!
//! Every API response body is a Mason document: a JSON object with
//! `@namespaces`, `@controls` and plain data fields, served as
//! `application/vnd.mason+json`. Error responses carry an `@error` object
//! instead.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Mason media type
pub const MASON: &str = "application/vnd.mason+json";
/// Link-relations namespace URI advertised in every document
pub const LINK_RELATIONS_URL: &str = "/api/link-relations/";
/// Namespace prefix of the booking workflow controls
pub const NAMESPACE: &str = "bookie";

/// Incrementally built Mason document.
#[derive(Debug, Clone, Default)]
pub struct MasonBuilder {
    root: Map<String, Value>,
}

impl MasonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a plain data field on the document.
    pub fn insert(&mut self, key: &str, value: impl Serialize) {
        self.root.insert(
            key.to_string(),
            serde_json::to_value(value).unwrap_or(Value::Null),
        );
    }

    pub fn add_namespace(&mut self, ns: &str, uri: &str) {
        self.root
            .entry("@namespaces")
            .or_insert_with(|| json!({}))
            .as_object_mut()
            .expect("@namespaces is always an object")
            .insert(ns.to_string(), json!({ "name": uri }));
    }

    /// Attach a control. `extra` must be a JSON object; `href` is added to
    /// it.
    pub fn add_control(&mut self, ctrl_name: &str, href: &str, extra: Value) {
        let mut ctrl = match extra {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        ctrl.insert("href".to_string(), json!(href));

        self.root
            .entry("@controls")
            .or_insert_with(|| json!({}))
            .as_object_mut()
            .expect("@controls is always an object")
            .insert(ctrl_name.to_string(), Value::Object(ctrl));
    }

    pub fn add_control_get(&mut self, ctrl_name: &str, title: &str, href: &str) {
        self.add_control(
            ctrl_name,
            href,
            json!({
                "method": "GET",
                "title": title,
            }),
        );
    }

    pub fn add_control_post(&mut self, ctrl_name: &str, title: &str, href: &str, schema: Value) {
        self.add_control(
            ctrl_name,
            href,
            json!({
                "method": "POST",
                "encoding": "json",
                "title": title,
                "schema": schema,
            }),
        );
    }

    pub fn add_control_put(&mut self, ctrl_name: &str, title: &str, href: &str, schema: Value) {
        self.add_control(
            ctrl_name,
            href,
            json!({
                "method": "PUT",
                "encoding": "json",
                "title": title,
                "schema": schema,
            }),
        );
    }

    pub fn add_control_delete(&mut self, ctrl_name: &str, title: &str, href: &str) {
        self.add_control(
            ctrl_name,
            href,
            json!({
                "method": "DELETE",
                "title": title,
            }),
        );
    }

    pub fn add_error(&mut self, title: &str, details: &str) {
        self.root.insert(
            "@error".to_string(),
            json!({
                "@message": title,
                "@messages": [details],
            }),
        );
    }

    pub fn build(self) -> Value {
        Value::Object(self.root)
    }
}

/// A Mason response with its HTTP status.
#[derive(Debug)]
pub struct Mason {
    status: StatusCode,
    body: Value,
}

impl Mason {
    pub fn ok(builder: MasonBuilder) -> Self {
        Self::with_status(StatusCode::OK, builder)
    }

    pub fn with_status(status: StatusCode, builder: MasonBuilder) -> Self {
        Self {
            status,
            body: builder.build(),
        }
    }
}

impl IntoResponse for Mason {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body.to_string()).into_response();
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(MASON));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaces_and_fields_land_in_the_document() {
        let mut body = MasonBuilder::new();
        body.add_namespace(NAMESPACE, LINK_RELATIONS_URL);
        body.insert("items", vec![1, 2, 3]);

        let doc = body.build();
        assert_eq!(
            doc["@namespaces"][NAMESPACE]["name"],
            json!(LINK_RELATIONS_URL)
        );
        assert_eq!(doc["items"], json!([1, 2, 3]));
    }

    #[test]
    fn controls_carry_method_title_and_href() {
        let mut body = MasonBuilder::new();
        body.add_control_post(
            "bookie:add-customer",
            "Add new customer",
            "/api/customers/",
            json!({"type": "object"}),
        );
        body.add_control_delete("bookie:delete-customer", "Delete the customer", "/api/customers/1/");

        let doc = body.build();
        let post = &doc["@controls"]["bookie:add-customer"];
        assert_eq!(post["method"], json!("POST"));
        assert_eq!(post["encoding"], json!("json"));
        assert_eq!(post["href"], json!("/api/customers/"));
        assert_eq!(post["schema"]["type"], json!("object"));

        let delete = &doc["@controls"]["bookie:delete-customer"];
        assert_eq!(delete["method"], json!("DELETE"));
    }

    #[test]
    fn error_documents_wrap_title_and_details() {
        let mut body = MasonBuilder::new();
        body.add_error("Forbidden", "Admin is unauthorized!");

        let doc = body.build();
        assert_eq!(doc["@error"]["@message"], json!("Forbidden"));
        assert_eq!(doc["@error"]["@messages"], json!(["Admin is unauthorized!"]));
    }
}
