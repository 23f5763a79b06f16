use actix_web::{web, HttpResponse, Responder};

use super::error_response;
use crate::backend::TravelBackend;
use crate::config::AppContext;
use crate::models::demand::StatusUpdate;
use crate::models::{CityAssignment, ClientDemand};
use crate::services::DemandService;

/*
    /api/admin/demands
*/
pub async fn get_all<B: TravelBackend>(data: web::Data<AppContext<B>>) -> impl Responder {
    match DemandService::new(&data.backend).list().await {
        Ok(demands) => HttpResponse::Ok().json(demands),
        Err(err) => error_response(err),
    }
}

pub async fn get_by_id<B: TravelBackend>(
    data: web::Data<AppContext<B>>,
    path: web::Path<String>,
) -> impl Responder {
    match DemandService::new(&data.backend).get(&path.into_inner()).await {
        Ok(demand) => HttpResponse::Ok().json(demand),
        Err(err) => error_response(err),
    }
}

pub async fn create<B: TravelBackend>(
    data: web::Data<AppContext<B>>,
    input: web::Json<ClientDemand>,
) -> impl Responder {
    match DemandService::new(&data.backend)
        .create(input.into_inner())
        .await
    {
        Ok(demand) => HttpResponse::Created().json(demand),
        Err(err) => error_response(err),
    }
}

/*
    /api/admin/demands/{id}/status
*/
pub async fn update_status<B: TravelBackend>(
    data: web::Data<AppContext<B>>,
    path: web::Path<String>,
    input: web::Json<StatusUpdate>,
) -> impl Responder {
    match DemandService::new(&data.backend)
        .update_status(&path.into_inner(), input.status)
        .await
    {
        Ok(demand) => HttpResponse::Ok().json(demand),
        Err(err) => error_response(err),
    }
}

/*
    /api/admin/demands/{id}/cities/{city_id}
*/
pub async fn update_city<B: TravelBackend>(
    data: web::Data<AppContext<B>>,
    path: web::Path<(String, String)>,
    input: web::Json<CityAssignment>,
) -> impl Responder {
    let (id, city_id) = path.into_inner();
    match DemandService::new(&data.backend)
        .update_city(&id, &city_id, input.into_inner())
        .await
    {
        Ok(demand) => HttpResponse::Ok().json(demand),
        Err(err) => error_response(err),
    }
}

pub async fn city_options<B: TravelBackend>(
    data: web::Data<AppContext<B>>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (id, city_id) = path.into_inner();
    match DemandService::new(&data.backend)
        .city_options(&id, &city_id)
        .await
    {
        Ok(options) => HttpResponse::Ok().json(options),
        Err(err) => error_response(err),
    }
}

pub async fn delete<B: TravelBackend>(
    data: web::Data<AppContext<B>>,
    path: web::Path<String>,
) -> impl Responder {
    match DemandService::new(&data.backend)
        .delete(&path.into_inner())
        .await
    {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

pub async fn send_email<B: TravelBackend>(
    data: web::Data<AppContext<B>>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();
    match DemandService::new(&data.backend).send_email(&id).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "sent": true, "demandId": id })),
        Err(err) => error_response(err),
    }
}
