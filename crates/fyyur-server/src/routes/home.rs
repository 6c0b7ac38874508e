use axum::Json;
use serde::Serialize;

use crate::flash::Flash;
use crate::pages::Page;

#[derive(Serialize)]
pub struct HealthStatus {
    status: &'static str,
    version: &'static str,
}

pub async fn index(flash: Flash) -> Page {
    Page::home(flash)
}

pub async fn healthz() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
