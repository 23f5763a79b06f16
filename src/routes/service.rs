use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use log::info;

use super::error_response;
use crate::backend::TravelBackend;
use crate::config::AppContext;
use crate::models::Service;

pub async fn get_services<B: TravelBackend>(data: web::Data<AppContext<B>>) -> impl Responder {
    match data.backend.list::<Service>(&[]).await {
        Ok(services) => HttpResponse::Ok().json(services),
        Err(err) => error_response(err.into()),
    }
}

pub async fn get_service<B: TravelBackend>(
    data: web::Data<AppContext<B>>,
    path: web::Path<String>,
) -> impl Responder {
    match data.backend.get::<Service>(&path.into_inner()).await {
        Ok(service) => HttpResponse::Ok().json(service),
        Err(err) => error_response(err.into()),
    }
}

pub async fn create_service<B: TravelBackend>(
    data: web::Data<AppContext<B>>,
    input: web::Json<Service>,
) -> impl Responder {
    let mut service = input.into_inner();
    if let Err(err) = service.validate() {
        return error_response(err.into());
    }

    let curr_time = Utc::now();
    service.id = None;
    service.created_at = Some(curr_time);
    service.updated_at = Some(curr_time);

    match data.backend.create(&service).await {
        Ok(created) => {
            info!("Created service '{}' from {}", created.name, created.provider);
            HttpResponse::Created().json(created)
        }
        Err(err) => error_response(err.into()),
    }
}

pub async fn update_service<B: TravelBackend>(
    data: web::Data<AppContext<B>>,
    path: web::Path<String>,
    input: web::Json<Service>,
) -> impl Responder {
    let id = path.into_inner();
    let mut service = input.into_inner();
    if let Err(err) = service.validate() {
        return error_response(err.into());
    }

    service.id = Some(id.clone());
    service.updated_at = Some(Utc::now());

    match data.backend.update(&id, &service).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(err) => error_response(err.into()),
    }
}

pub async fn delete_service<B: TravelBackend>(
    data: web::Data<AppContext<B>>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();
    match data.backend.delete::<Service>(&id).await {
        Ok(()) => {
            info!("Deleted service {}", id);
            HttpResponse::NoContent().finish()
        }
        Err(err) => error_response(err.into()),
    }
}
