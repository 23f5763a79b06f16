use actix_web::{web, HttpResponse, Responder};

use super::error_response;
use crate::backend::TravelBackend;
use crate::config::AppContext;
use crate::models::{PackageEdit, SpecialPackage};
use crate::services::PackageService;

/*
    /api/admin/special-packages
*/
pub async fn get_all<B: TravelBackend>(data: web::Data<AppContext<B>>) -> impl Responder {
    match PackageService::new(&data.backend).list().await {
        Ok(packages) => HttpResponse::Ok().json(packages),
        Err(err) => error_response(err),
    }
}

pub async fn get_by_id<B: TravelBackend>(
    data: web::Data<AppContext<B>>,
    path: web::Path<String>,
) -> impl Responder {
    match PackageService::new(&data.backend)
        .get(&path.into_inner())
        .await
    {
        Ok(package) => HttpResponse::Ok().json(package),
        Err(err) => error_response(err),
    }
}

pub async fn create<B: TravelBackend>(
    data: web::Data<AppContext<B>>,
    input: web::Json<SpecialPackage>,
) -> impl Responder {
    match PackageService::new(&data.backend)
        .create(input.into_inner())
        .await
    {
        Ok(package) => HttpResponse::Created().json(package),
        Err(err) => error_response(err),
    }
}

/*
    /api/admin/special-packages/quote
    Live pricing for the package form, nothing is stored.
*/
pub async fn quote<B: TravelBackend>(
    data: web::Data<AppContext<B>>,
    input: web::Json<SpecialPackage>,
) -> impl Responder {
    match PackageService::new(&data.backend)
        .quote(input.into_inner())
        .await
    {
        Ok(package) => HttpResponse::Ok().json(package),
        Err(err) => error_response(err),
    }
}

pub async fn replace<B: TravelBackend>(
    data: web::Data<AppContext<B>>,
    path: web::Path<String>,
    input: web::Json<SpecialPackage>,
) -> impl Responder {
    match PackageService::new(&data.backend)
        .replace(&path.into_inner(), input.into_inner())
        .await
    {
        Ok(package) => HttpResponse::Ok().json(package),
        Err(err) => error_response(err),
    }
}

pub async fn apply_edits<B: TravelBackend>(
    data: web::Data<AppContext<B>>,
    path: web::Path<String>,
    input: web::Json<Vec<PackageEdit>>,
) -> impl Responder {
    match PackageService::new(&data.backend)
        .apply_edits(&path.into_inner(), input.into_inner())
        .await
    {
        Ok(package) => HttpResponse::Ok().json(package),
        Err(err) => error_response(err),
    }
}

pub async fn delete<B: TravelBackend>(
    data: web::Data<AppContext<B>>,
    path: web::Path<String>,
) -> impl Responder {
    match PackageService::new(&data.backend)
        .delete(&path.into_inner())
        .await
    {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}
