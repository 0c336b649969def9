//! Ingest and retrieval HTTP handlers.
//!
//! The storage engine is synchronous rusqlite, so every database touch
//! runs on the blocking thread pool via `web::block` — one short-lived
//! unit of work per request.

use actix_web::{get, post, web, HttpResponse};
use serde_json::Value;
use till_core::{BranchDirectory, RecordTable};
use till_storage::StorageEngine;

use crate::errors::{ApiError, ApiResult};

/// Configure collector routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(push_record)
            .service(all_records)
            .service(branchwise),
    );
}

/// Ingest one record into the named table.
///
/// Unknown fields in the body are dropped by the sanitizer, never
/// rejected; an unknown table name is a 404 and never creates a table.
#[post("/push/{table}")]
async fn push_record(
    engine: web::Data<StorageEngine>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let table = parse_table(&path)?;
    let record = body
        .into_inner()
        .as_object()
        .cloned()
        .ok_or(ApiError::NotAnObject)?;

    web::block(move || engine.ingest(table, &record))
        .await
        .map_err(|_| ApiError::Cancelled)??;

    Ok(HttpResponse::Ok().json(Ack { status: "success" }))
}

/// Full unsorted scan of the named table, `received_at` included.
#[get("/all/{table}")]
async fn all_records(
    engine: web::Data<StorageEngine>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let table = parse_table(&path)?;

    let rows = web::block(move || engine.table_rows(table))
        .await
        .map_err(|_| ApiError::Cancelled)??;

    Ok(HttpResponse::Ok().json(rows))
}

/// All record tables grouped by branch display name.
#[get("/branchwise")]
async fn branchwise(
    engine: web::Data<StorageEngine>,
    directory: web::Data<BranchDirectory>,
) -> ApiResult<HttpResponse> {
    let aggregate = web::block(move || engine.aggregate_by_branch(&directory))
        .await
        .map_err(|_| ApiError::Cancelled)??;

    Ok(HttpResponse::Ok().json(aggregate))
}

fn parse_table(name: &str) -> ApiResult<RecordTable> {
    RecordTable::parse(name).ok_or_else(|| ApiError::UnknownTable(name.to_string()))
}

#[derive(serde::Serialize)]
struct Ack {
    status: &'static str,
}
