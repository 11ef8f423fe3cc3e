use autopulse_dashboard::data::shared_fixture;
use autopulse_dashboard::engine::DashboardEngine;
use autopulse_dashboard::models::filter::ExportRequest;
use autopulse_dashboard::report::csv::ExportConfig;
use autopulse_dashboard::report::export_view;
use autopulse_dashboard::DashboardError;
use serde_json::json;
use tracing::warn;
use vercel_runtime::{run, Body, Error, Request, Response, StatusCode};

#[tokio::main]
async fn main() -> Result<(), Error> {
    autopulse_dashboard::init_tracing();
    run(handler).await
}

fn bad_request(err: DashboardError) -> Result<Response<Body>, Error> {
    warn!(error = %err, "rejected export request");
    let error = json!({
        "error": err.kind(),
        "message": err.to_string()
    });
    Ok(Response::builder()
        .status(StatusCode::BAD_REQUEST)
        .header("Content-Type", "application/json")
        .body(Body::Text(error.to_string()))?)
}

/// POST /api/export: Download the current view as delimited text.
///
/// Body: `{"country"?, "month"?, "model"?, "profile"?}` where `profile` is
/// "csv" (default) or "excel".
pub async fn handler(req: Request) -> Result<Response<Body>, Error> {
    if *req.method() != http::Method::POST {
        let error = json!({
            "error": "Method not allowed",
            "message": "Use POST to export dashboard data"
        });
        return Ok(Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .header("Content-Type", "application/json")
            .body(Body::Text(error.to_string()))?);
    }

    let body: &[u8] = match req.body() {
        Body::Empty => &[],
        Body::Text(text) => text.as_bytes(),
        Body::Binary(bytes) => bytes.as_slice(),
    };
    let request = match ExportRequest::from_json_bytes(body) {
        Ok(request) => request,
        Err(err) => return bad_request(err),
    };
    let config = match request.profile.as_deref().unwrap_or("csv").parse::<ExportConfig>() {
        Ok(config) => config,
        Err(err) => return bad_request(err),
    };

    let engine = DashboardEngine::with_defaults(shared_fixture());
    let view = engine.view(&request.filters);
    let text = export_view(&view, &request.filters, &config)?;
    if text.is_empty() {
        return Ok(Response::builder()
            .status(StatusCode::NO_CONTENT)
            .body(Body::Empty)?);
    }

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/csv; charset=utf-8")
        .header("Content-Disposition", "attachment; filename=\"dashboard-data.csv\"")
        .body(Body::Text(text))?)
}
