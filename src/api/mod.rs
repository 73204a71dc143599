use axum::{
    Router,
    extract::{
        Json, Path, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::calculators::{CalculatorKind, Field};
use crate::error::CalcError;
use crate::export::to_csv_string;
use crate::form::Form;
use crate::report::Calculation;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
enum ResponseFormat {
    #[default]
    Json,
    Csv,
}

impl ResponseFormat {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(raw) if raw.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct EvaluateRequest {
    kind: CalculatorKind,
    form: Form,
    format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct CalculatorInfo {
    id: &'static str,
    title: &'static str,
    fields: &'static [Field],
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/api/calculators", get(list_handler))
        .route(
            "/api/calculators/:id",
            get(evaluate_get_handler).post(evaluate_post_handler),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(host: &str, port: u16) -> std::io::Result<()> {
    let listener = TcpListener::bind((host, port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "calculator HTTP API listening");
    info!("local access: http://127.0.0.1:{port}/api/calculators");

    axum::serve(listener, router()).await
}

async fn list_handler() -> Response {
    json_response(StatusCode::OK, calculator_list())
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn evaluate_get_handler(
    Path(id): Path<String>,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, &rejection.body_text()),
    };
    match evaluate_request_from_query(&id, params) {
        Ok(request) => evaluate_response(&request),
        Err(err) => calc_error_response(&err),
    }
}

async fn evaluate_post_handler(
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, &rejection.body_text()),
    };
    match evaluate_request_from_json(&id, &body) {
        Ok(request) => evaluate_response(&request),
        Err(err) => calc_error_response(&err),
    }
}

fn calculator_list() -> Vec<CalculatorInfo> {
    CalculatorKind::ALL
        .into_iter()
        .map(|kind| CalculatorInfo {
            id: kind.id(),
            title: kind.title(),
            fields: kind.fields(),
        })
        .collect()
}

fn lookup_calculator(id: &str) -> Result<CalculatorKind, CalcError> {
    CalculatorKind::from_id(id).ok_or_else(|| {
        warn!(calculator = id, "unknown calculator requested");
        CalcError::UnknownCalculator(id.to_string())
    })
}

fn evaluate_request_from_query(
    id: &str,
    params: HashMap<String, String>,
) -> Result<EvaluateRequest, CalcError> {
    let kind = lookup_calculator(id)?;
    let format = ResponseFormat::parse(params.get("format").map(String::as_str));
    Ok(EvaluateRequest {
        kind,
        form: Form::from_pairs(params),
        format,
    })
}

fn evaluate_request_from_json(id: &str, body: &Value) -> Result<EvaluateRequest, CalcError> {
    let kind = lookup_calculator(id)?;
    let format = ResponseFormat::parse(body.get("format").and_then(Value::as_str));
    Ok(EvaluateRequest {
        kind,
        form: Form::from_json(body),
        format,
    })
}

/// An uncomputable result is still a 200; the body says `computable: false`.
fn evaluate_response(request: &EvaluateRequest) -> Response {
    let kind = request.kind;
    let report = kind.evaluate(&request.form);

    match (request.format, &report) {
        (ResponseFormat::Csv, Some(report)) => match to_csv_string(report) {
            Ok(csv) => csv_response(kind.id(), csv),
            Err(err) => calc_error_response(&err),
        },
        _ => json_response(
            StatusCode::OK,
            Calculation::new(kind.id(), kind.title(), report.as_ref()),
        ),
    }
}

fn csv_response(id: &str, body: String) -> Response {
    with_cache_control((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{id}.csv\""),
            ),
        ],
        body,
    ))
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

fn calc_error_response(err: &CalcError) -> Response {
    let status = match err {
        CalcError::UnknownCalculator(_) => StatusCode::NOT_FOUND,
        CalcError::InvalidField(_) => StatusCode::BAD_REQUEST,
        _ => {
            error!(error = %err, "failed to build response");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_response(status, &err.to_string())
}
