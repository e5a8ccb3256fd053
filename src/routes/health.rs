use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

/*
    /health
*/
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let listing_store = check_listing_store(&state).await;
    health
        .services
        .insert("listing_store".to_string(), listing_store);

    // Pricing and ranking still work without the store, so report degraded
    // rather than failing the probe.
    if health.services.values().any(|s| s.status != "ok") {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

async fn check_listing_store(state: &AppState) -> ServiceStatus {
    match state.listings.ping().await {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: Some("Listing store reachable".to_string()),
        },
        Err(e) => {
            log::warn!("Listing store health check failed: {}", e);

            ServiceStatus {
                status: "error".to_string(),
                details: Some(format!("Failed to reach listing store: {}", e)),
            }
        }
    }
}
