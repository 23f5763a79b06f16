use actix_web::{web, HttpResponse, Responder};

use super::error_response;
use crate::backend::{Resource, TravelBackend};
use crate::config::AppContext;
use crate::models::{City, Hotel, Transport};

// Cities, hotels and transports are managed elsewhere; the dashboard only
// reads them.

pub async fn get_cities<B: TravelBackend>(data: web::Data<AppContext<B>>) -> impl Responder {
    list_all::<B, City>(&data).await
}

pub async fn get_hotels<B: TravelBackend>(data: web::Data<AppContext<B>>) -> impl Responder {
    list_all::<B, Hotel>(&data).await
}

pub async fn get_transports<B: TravelBackend>(data: web::Data<AppContext<B>>) -> impl Responder {
    list_all::<B, Transport>(&data).await
}

async fn list_all<B: TravelBackend, T: Resource>(data: &AppContext<B>) -> HttpResponse {
    match data.backend.list::<T>(&[]).await {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(err) => error_response(err.into()),
    }
}
