//! Notification headers attached to resource responses.
//!
//! Clients read these to show toast messages: success responses carry an
//! i18n key plus the record id, failures carry an error key plus the entity.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

/// Application name used as the i18n key prefix.
pub const APP_NAME: &str = "endqueueApp";

pub const ALERT_HEADER: HeaderName = HeaderName::from_static("x-endqueueapp-alert");
pub const ERROR_HEADER: HeaderName = HeaderName::from_static("x-endqueueapp-error");
pub const PARAMS_HEADER: HeaderName = HeaderName::from_static("x-endqueueapp-params");

/// Alert and error headers the browser may read across origins.
pub fn exposed_headers() -> [HeaderName; 4] {
    [
        ALERT_HEADER,
        ERROR_HEADER,
        PARAMS_HEADER,
        axum::http::header::LOCATION,
    ]
}

fn alert(key: String, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&key) {
        headers.insert(ALERT_HEADER, value);
    }
    if let Ok(value) = HeaderValue::from_str(param) {
        headers.insert(PARAMS_HEADER, value);
    }
    headers
}

pub fn entity_created(entity: &str, id: &str) -> HeaderMap {
    alert(format!("{APP_NAME}.{entity}.created"), id)
}

pub fn entity_updated(entity: &str, id: &str) -> HeaderMap {
    alert(format!("{APP_NAME}.{entity}.updated"), id)
}

pub fn entity_deleted(entity: &str, id: &str) -> HeaderMap {
    alert(format!("{APP_NAME}.{entity}.deleted"), id)
}

pub fn failure(entity: &str, error_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&format!("error.{error_key}")) {
        headers.insert(ERROR_HEADER, value);
    }
    if let Ok(value) = HeaderValue::from_str(entity) {
        headers.insert(PARAMS_HEADER, value);
    }
    headers
}
