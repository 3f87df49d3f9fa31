use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use metrics::{counter, gauge};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use catalog_core::{CreateProductRequest, Product};

use crate::error::ApiError;
use crate::router::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    category: Option<String>,
}

/// `GET /products`, optionally narrowed by `?category=`.
///
/// A query string that does not decode (such as a repeated `category`) is a 400.
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        debug!(stage = "catalog", error = %rejection, "failed to decode list query");
        counter!("catalog_requests_total", "op" => "list", "result" => "invalid").increment(1);
        ApiError::MalformedQuery
    })?;

    let catalog = state.catalog();
    let products = match query.category.as_deref().filter(|value| !value.is_empty()) {
        Some(category) => {
            let matched = catalog.list_by_category(category);
            debug!(stage = "catalog", %category, count = matched.len(), "listed products by category");
            matched
        }
        None => catalog.list_all(),
    };

    counter!("catalog_requests_total", "op" => "list", "result" => "ok").increment(1);
    Ok(Json(products))
}

/// `GET /products/:id`. Ids that do not decode to an unsigned integer are reported
/// as not found.
pub async fn show(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Product>, ApiError> {
    let raw_id = path.map(|Path(raw_id)| raw_id).ok();
    let result = raw_id
        .as_deref()
        .and_then(|raw_id| raw_id.parse::<u64>().ok())
        .ok_or(ApiError::NotFound)
        .and_then(|id| state.catalog().find_by_id(id).map_err(ApiError::from));

    match result {
        Ok(product) => {
            counter!("catalog_requests_total", "op" => "get", "result" => "ok").increment(1);
            Ok(Json(product))
        }
        Err(err) => {
            debug!(stage = "catalog", id = ?raw_id, "product lookup missed");
            counter!("catalog_requests_total", "op" => "get", "result" => "not_found").increment(1);
            Err(err)
        }
    }
}

/// `POST /products`. Validates the JSON body and appends the product.
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let new_product = parse_body(&body)
        .and_then(|payload| {
            CreateProductRequest::from_json(payload)
                .validate()
                .map_err(ApiError::from)
        })
        .map_err(|err| {
            warn!(stage = "catalog", error = %err, "rejected product create");
            counter!("catalog_requests_total", "op" => "create", "result" => "invalid").increment(1);
            err
        })?;

    let catalog = state.catalog();
    let product = catalog.append(new_product);
    gauge!("catalog_products").set(catalog.len() as f64);
    counter!("catalog_requests_total", "op" => "create", "result" => "ok").increment(1);
    info!(
        stage = "catalog",
        id = product.id,
        category = %product.category,
        "product created"
    );

    Ok((StatusCode::CREATED, Json(product)))
}

/// An empty body reads as `{}` so it fails field validation rather than JSON parsing.
fn parse_body(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|err| {
        debug!(stage = "catalog", error = %err, "failed to parse request body");
        ApiError::MalformedBody
    })
}
