use serde_json::json;
use autopulse_dashboard::data::shared_fixture;
use autopulse_dashboard::version;
use vercel_runtime::{run, Body, Error, Request, Response, StatusCode};

#[tokio::main]
async fn main() -> Result<(), Error> {
    autopulse_dashboard::init_tracing();
    run(handler).await
}

/// GET /api/health: Liveness probe with the fixture's size.
pub async fn handler(_req: Request) -> Result<Response<Body>, Error> {
    let fixture = shared_fixture();
    let payload = json!({
        "status": "ok",
        "version": version(),
        "countries": fixture.by_country.len(),
        "months": fixture.monthly_production.len(),
    });

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(Body::Text(payload.to_string()))?)
}
