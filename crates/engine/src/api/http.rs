//! HTTP routes.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use endqueue_domain::{DomainError, Record};
use serde::Serialize;

use super::{alerts, resources};
use crate::app::App;
use crate::use_cases::ResourceError;

/// Create all HTTP routes.
pub fn routes(app: Arc<App>) -> Router {
    let use_cases = &app.use_cases;

    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .merge(resources::routes(use_cases.admin.clone()))
        .merge(resources::routes(use_cases.organization.clone()))
        .merge(resources::routes(use_cases.queue.clone()))
        .merge(resources::routes(use_cases.dynamic_queue.clone()))
        .merge(resources::routes(use_cases.participant.clone()))
}

async fn health() -> &'static str {
    "OK"
}

/// JSON error body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    entity_name: &'a str,
    error_key: &'a str,
    message: &'a str,
}

/// Resource failure rendered as status, alert headers and a JSON body.
#[derive(Debug)]
pub enum ApiError {
    NotFound {
        entity: &'static str,
        message: String,
    },
    BadRequest {
        entity: &'static str,
        key: &'static str,
        message: String,
    },
    Internal {
        entity: &'static str,
    },
}

impl ApiError {
    pub fn bad_request(
        entity: &'static str,
        key: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::BadRequest {
            entity,
            key,
            message: message.into(),
        }
    }

    /// Maps a dispatcher error for record type `R`. Internal details are
    /// logged here and never returned to the client.
    pub fn from_resource<R: Record>(error: ResourceError) -> Self {
        let entity = R::ENTITY_NAME;
        match error {
            ResourceError::Conflict { .. } => Self::bad_request(
                entity,
                "idexists",
                format!("A new {entity} cannot already have an ID"),
            ),
            ResourceError::NotFound { .. } => Self::NotFound {
                entity,
                message: error.to_string(),
            },
            ResourceError::Validation(DomainError::Validation(msg)) => {
                Self::bad_request(entity, "validation", msg)
            }
            ResourceError::Validation(DomainError::InvalidQuery(msg)) => {
                Self::bad_request(entity, "invalidquery", msg)
            }
            ResourceError::Repo(e) => {
                tracing::error!(error = %e, entity, "Record store failure");
                Self::Internal { entity }
            }
            ResourceError::Search(e) => {
                tracing::error!(error = %e, entity, "Search mirror failure");
                Self::Internal { entity }
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (entity, key, message) = match &self {
            Self::NotFound { entity, message } => (*entity, "notfound", message.as_str()),
            Self::BadRequest {
                entity,
                key,
                message,
            } => (*entity, *key, message.as_str()),
            Self::Internal { entity } => (*entity, "internal", "Internal error"),
        };

        let body = Json(ErrorBody {
            entity_name: entity,
            error_key: key,
            message,
        });
        (status, alerts::failure(entity, key), body).into_response()
    }
}
