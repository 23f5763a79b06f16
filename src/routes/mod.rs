pub mod activity;
pub mod demand;
pub mod health;
pub mod reference;
pub mod service;
pub mod special_package;
pub mod stats;

use actix_web::{web, HttpResponse};
use log::error;

use crate::backend::{BackendError, TravelBackend};
use crate::models::ValidationError;
use crate::services::ServiceError;

pub fn config<B: TravelBackend + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check::<B>))
        .service(
            web::scope("/api/admin")
                .route("/stats", web::get().to(stats::get_stats::<B>))
                .route("/cities", web::get().to(reference::get_cities::<B>))
                .route("/hotels", web::get().to(reference::get_hotels::<B>))
                .route("/transports", web::get().to(reference::get_transports::<B>))
                .service(
                    web::scope("/activities")
                        .route("", web::get().to(activity::get_activities::<B>))
                        .route("", web::post().to(activity::create_activity::<B>))
                        .route("/{id}", web::get().to(activity::get_activity::<B>))
                        .route("/{id}", web::put().to(activity::update_activity::<B>))
                        .route("/{id}", web::delete().to(activity::delete_activity::<B>)),
                )
                .service(
                    web::scope("/services")
                        .route("", web::get().to(service::get_services::<B>))
                        .route("", web::post().to(service::create_service::<B>))
                        .route("/{id}", web::get().to(service::get_service::<B>))
                        .route("/{id}", web::put().to(service::update_service::<B>))
                        .route("/{id}", web::delete().to(service::delete_service::<B>)),
                )
                .service(
                    web::scope("/demands")
                        .route("", web::get().to(demand::get_all::<B>))
                        .route("", web::post().to(demand::create::<B>))
                        .route("/{id}", web::get().to(demand::get_by_id::<B>))
                        .route("/{id}", web::delete().to(demand::delete::<B>))
                        .route("/{id}/status", web::put().to(demand::update_status::<B>))
                        .route("/{id}/send-email", web::post().to(demand::send_email::<B>))
                        .route(
                            "/{id}/cities/{city_id}",
                            web::put().to(demand::update_city::<B>),
                        )
                        .route(
                            "/{id}/cities/{city_id}/options",
                            web::get().to(demand::city_options::<B>),
                        ),
                )
                .service(
                    web::scope("/special-packages")
                        .route("", web::get().to(special_package::get_all::<B>))
                        .route("", web::post().to(special_package::create::<B>))
                        .route("/quote", web::post().to(special_package::quote::<B>))
                        .route("/{id}", web::get().to(special_package::get_by_id::<B>))
                        .route("/{id}", web::put().to(special_package::replace::<B>))
                        .route("/{id}", web::patch().to(special_package::apply_edits::<B>))
                        .route("/{id}", web::delete().to(special_package::delete::<B>)),
                ),
        );
}

/// Maps a failure to the response the dashboard shows as an inline message.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Validation(ValidationError::CityNotInDemand(city_id)) => {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("City {} is not part of the demand", city_id),
            }))
        }
        ServiceError::Validation(err) => HttpResponse::BadRequest().json(serde_json::json!({
            "error": err.to_string(),
        })),
        ServiceError::Backend(err @ BackendError::NotFound { .. }) => {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": err.to_string(),
            }))
        }
        ServiceError::Backend(err) => {
            error!("Backend call failed: {}", err);
            HttpResponse::BadGateway().json(serde_json::json!({
                "error": format!("Failed to reach the travel backend: {}", err),
            }))
        }
    }
}
