//! REST resource handlers, generic over the managed record type.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use endqueue_domain::{Record, RecordId};
use serde::Deserialize;

use super::alerts;
use super::http::ApiError;
use crate::use_cases::{ResourceCrud, Saved};

type Crud<R> = State<Arc<ResourceCrud<R>>>;

/// Routes for one record type under `/api/{path}` and `/api/_search/{path}`.
pub fn routes<R: Record>(crud: Arc<ResourceCrud<R>>) -> Router {
    let collection = format!("/api/{}", R::PATH);
    let item = format!("/api/{}/{{id}}", R::PATH);
    let search_path = format!("/api/_search/{}", R::PATH);

    Router::new()
        .route(
            &collection,
            get(list::<R>).post(create::<R>).put(update::<R>),
        )
        .route(&item, get(fetch::<R>).delete(remove::<R>))
        .route(&search_path, get(search::<R>))
        .with_state(crud)
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    query: String,
}

fn payload<R: Record>(body: Result<Json<R>, JsonRejection>) -> Result<R, ApiError> {
    body.map(|Json(record)| record).map_err(|rejection| {
        ApiError::bad_request(R::ENTITY_NAME, "invalidbody", rejection.body_text())
    })
}

fn created<R: Record>(record: R) -> Response {
    let id = record.id().map(|id| id.to_string()).unwrap_or_default();
    let mut headers = alerts::entity_created(R::ENTITY_NAME, &id);
    if let Ok(location) = HeaderValue::from_str(&format!("/api/{}/{}", R::PATH, id)) {
        headers.insert(header::LOCATION, location);
    }
    (StatusCode::CREATED, headers, Json(record)).into_response()
}

async fn create<R: Record>(
    State(crud): Crud<R>,
    body: Result<Json<R>, JsonRejection>,
) -> Result<Response, ApiError> {
    let record = payload(body)?;
    let saved = crud
        .create(record)
        .await
        .map_err(ApiError::from_resource::<R>)?;
    Ok(created(saved))
}

async fn update<R: Record>(
    State(crud): Crud<R>,
    body: Result<Json<R>, JsonRejection>,
) -> Result<Response, ApiError> {
    let record = payload(body)?;
    match crud
        .update(record)
        .await
        .map_err(ApiError::from_resource::<R>)?
    {
        Saved::Created(saved) => Ok(created(saved)),
        Saved::Updated(saved) => {
            let id = saved.id().map(|id| id.to_string()).unwrap_or_default();
            let headers = alerts::entity_updated(R::ENTITY_NAME, &id);
            Ok((StatusCode::OK, headers, Json(saved)).into_response())
        }
    }
}

async fn list<R: Record>(State(crud): Crud<R>) -> Result<Json<Vec<R>>, ApiError> {
    let records = crud.list().await.map_err(ApiError::from_resource::<R>)?;
    Ok(Json(records))
}

async fn fetch<R: Record>(State(crud): Crud<R>, Path(id): Path<i64>) -> Result<Json<R>, ApiError> {
    let record = crud
        .get(R::Id::from_raw(id))
        .await
        .map_err(ApiError::from_resource::<R>)?;
    Ok(Json(record))
}

async fn remove<R: Record>(
    State(crud): Crud<R>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    crud.delete(R::Id::from_raw(id))
        .await
        .map_err(ApiError::from_resource::<R>)?;
    let headers = alerts::entity_deleted(R::ENTITY_NAME, &id.to_string());
    Ok((StatusCode::OK, headers).into_response())
}

async fn search<R: Record>(
    State(crud): Crud<R>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<R>>, ApiError> {
    let records = crud
        .search(&params.query)
        .await
        .map_err(ApiError::from_resource::<R>)?;
    Ok(Json(records))
}
