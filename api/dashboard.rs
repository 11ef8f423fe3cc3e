use autopulse_dashboard::data::shared_fixture;
use autopulse_dashboard::engine::DashboardEngine;
use autopulse_dashboard::models::filter::DashboardRequest;
use serde_json::json;
use tracing::{info, warn};
use vercel_runtime::{run, Body, Error, Request, Response, StatusCode};

#[tokio::main]
async fn main() -> Result<(), Error> {
    autopulse_dashboard::init_tracing();
    run(handler).await
}

/// GET|POST /api/dashboard: Derive every chart series for a filter combination.
///
/// GET returns the unfiltered view. POST accepts
/// `{"country": "...", "month": "...", "model": "..."}`; every field is optional.
pub async fn handler(req: Request) -> Result<Response<Body>, Error> {
    if *req.method() != http::Method::GET && *req.method() != http::Method::POST {
        let error = json!({
            "error": "Method not allowed",
            "message": "Use GET for the unfiltered view or POST with filters"
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
    // GET ignores any body and serves the unfiltered view.
    let parsed = if *req.method() == http::Method::GET {
        Ok(DashboardRequest::default())
    } else {
        DashboardRequest::from_json_bytes(body)
    };
    let request = match parsed {
        Ok(request) => request,
        Err(err) => {
            warn!(error = %err, "rejected dashboard request");
            let error = json!({
                "error": err.kind(),
                "message": err.to_string()
            });
            return Ok(Response::builder()
                .status(StatusCode::BAD_REQUEST)
                .header("Content-Type", "application/json")
                .body(Body::Text(error.to_string()))?);
        }
    };

    let engine = DashboardEngine::with_defaults(shared_fixture());
    let view = engine.view(&request.filters);
    info!(
        country = request.filters.country().unwrap_or("ALL"),
        month = request.filters.month().unwrap_or("ALL"),
        "dashboard view derived"
    );

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(Body::Text(serde_json::to_string(&view)?))?)
}
