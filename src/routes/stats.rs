use actix_web::{web, HttpResponse, Responder};

use super::error_response;
use crate::backend::TravelBackend;
use crate::config::AppContext;
use crate::services::StatsService;

pub async fn get_stats<B: TravelBackend>(data: web::Data<AppContext<B>>) -> impl Responder {
    match StatsService::collect(&data.backend).await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(err) => error_response(err),
    }
}
