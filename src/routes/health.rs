use actix_web::{web, HttpResponse, Responder};
use log::error;
use serde::Serialize;
use std::collections::HashMap;

use crate::backend::TravelBackend;
use crate::config::AppContext;

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

pub async fn health_check<B: TravelBackend>(data: web::Data<AppContext<B>>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: data.environment.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let backend_result = check_backend(&data.backend).await;
    if backend_result.status != "ok" {
        health.status = "degraded".to_string();
    }
    health
        .services
        .insert("travel_backend".to_string(), backend_result);

    HttpResponse::Ok().json(health)
}

async fn check_backend<B: TravelBackend>(backend: &B) -> ServiceStatus {
    match backend.ping().await {
        Ok(()) => ServiceStatus {
            status: "ok".to_string(),
            details: Some("Travel backend reachable".to_string()),
        },
        Err(e) => {
            error!("Travel backend health check failed: {}", e);

            ServiceStatus {
                status: "error".to_string(),
                details: Some(format!("Failed to reach backend: {}", e)),
            }
        }
    }
}
