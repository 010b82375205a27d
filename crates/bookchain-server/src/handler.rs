use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use bookchain_ledger::{
    AppendOutcome, BookRegistry, LedgerReader, LedgerWriter, ValidationReport, Violation,
};
use bookchain_types::{BookDraft, CheckoutRecord};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub ok: bool,
    pub length: usize,
    pub violations: Vec<Violation>,
}

impl From<ValidationReport> for ValidateResponse {
    fn from(report: ValidationReport) -> Self {
        Self {
            ok: report.is_valid(),
            length: report.length,
            violations: report.violations,
        }
    }
}

/// Render `value` as indented JSON, surfacing encoder failures as 500s.
fn pretty_json<T: Serialize>(value: &T) -> ServerResult<Response> {
    let body =
        serde_json::to_string_pretty(value).map_err(|e| ServerError::Serialization(e.to_string()))?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

fn body_or_malformed<T>(body: Result<Json<T>, JsonRejection>, route: &str) -> ServerResult<T> {
    body.map(|Json(value)| value).map_err(|rejection| {
        tracing::warn!(route, error = %rejection.body_text(), "malformed request body");
        ServerError::MalformedBody(rejection.body_text())
    })
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// `GET /blockchain`
pub async fn blockchain_handler(State(state): State<AppState>) -> ServerResult<Response> {
    let blocks = state.ledger.snapshot()?;
    pretty_json(&blocks)
}

/// `GET /blockchain/:position`
pub async fn block_handler(
    State(state): State<AppState>,
    Path(position): Path<u64>,
) -> ServerResult<Response> {
    let block = state
        .ledger
        .get(position)?
        .ok_or(ServerError::BlockNotFound(position))?;
    pretty_json(&block)
}

/// `POST /new_checkout`: echoes the record as it was committed.
pub async fn new_checkout_handler(
    State(state): State<AppState>,
    body: Result<Json<CheckoutRecord>, JsonRejection>,
) -> ServerResult<Response> {
    let record = body_or_malformed(body, "/new_checkout")?;
    match state.ledger.append(record)? {
        AppendOutcome::Committed(block) => pretty_json(&block.payload),
        AppendOutcome::Rejected(reason) => Err(ServerError::Rejected(reason)),
    }
}

/// `POST /new_book`
pub async fn new_book_handler(
    State(state): State<AppState>,
    body: Result<Json<BookDraft>, JsonRejection>,
) -> ServerResult<Response> {
    let draft = body_or_malformed(body, "/new_book")?;
    let registration = state.books.register(draft)?;
    pretty_json(registration.book())
}

/// `GET /all_books`
pub async fn all_books_handler(State(state): State<AppState>) -> ServerResult<Response> {
    let books = state.books.all()?;
    pretty_json(&books)
}

/// `GET /validate`: full audit of the committed chain.
pub async fn validate_handler(State(state): State<AppState>) -> ServerResult<Json<ValidateResponse>> {
    let report = state.ledger.validation_report()?;
    Ok(Json(report.into()))
}
