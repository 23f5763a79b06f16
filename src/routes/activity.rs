use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use log::info;
use serde::Deserialize;

use super::error_response;
use crate::backend::TravelBackend;
use crate::config::AppContext;
use crate::models::Activity;
use crate::services::ServiceError;

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    #[serde(rename = "cityId")]
    pub city_id: Option<String>,
}

/*
    /api/admin/activities?cityId=
*/
pub async fn get_activities<B: TravelBackend>(
    data: web::Data<AppContext<B>>,
    query: web::Query<ActivityQuery>,
) -> impl Responder {
    let filter: Vec<(&str, &str)> = match query.city_id.as_deref() {
        Some(city_id) if !city_id.is_empty() => vec![("cityId", city_id)],
        _ => Vec::new(),
    };

    match data.backend.list::<Activity>(&filter).await {
        Ok(activities) => HttpResponse::Ok().json(activities),
        Err(err) => error_response(err.into()),
    }
}

pub async fn get_activity<B: TravelBackend>(
    data: web::Data<AppContext<B>>,
    path: web::Path<String>,
) -> impl Responder {
    match data.backend.get::<Activity>(&path.into_inner()).await {
        Ok(activity) => HttpResponse::Ok().json(activity),
        Err(err) => error_response(err.into()),
    }
}

pub async fn create_activity<B: TravelBackend>(
    data: web::Data<AppContext<B>>,
    input: web::Json<Activity>,
) -> impl Responder {
    let mut activity = input.into_inner();
    if let Err(err) = activity.validate() {
        return error_response(err.into());
    }

    let now = Utc::now();
    activity.id = None;
    activity.created_at = Some(now);
    activity.updated_at = Some(now);

    match data.backend.create(&activity).await {
        Ok(created) => {
            info!("Created activity '{}'", created.name);
            HttpResponse::Created().json(created)
        }
        Err(err) => error_response(ServiceError::from(err)),
    }
}

pub async fn update_activity<B: TravelBackend>(
    data: web::Data<AppContext<B>>,
    path: web::Path<String>,
    input: web::Json<Activity>,
) -> impl Responder {
    let id = path.into_inner();
    let mut activity = input.into_inner();
    if let Err(err) = activity.validate() {
        return error_response(err.into());
    }

    activity.id = Some(id.clone());
    activity.updated_at = Some(Utc::now());

    match data.backend.update(&id, &activity).await {
        Ok(updated) => {
            info!("Updated activity {}", id);
            HttpResponse::Ok().json(updated)
        }
        Err(err) => error_response(err.into()),
    }
}

pub async fn delete_activity<B: TravelBackend>(
    data: web::Data<AppContext<B>>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();
    match data.backend.delete::<Activity>(&id).await {
        Ok(()) => {
            info!("Deleted activity {}", id);
            HttpResponse::NoContent().finish()
        }
        Err(err) => error_response(err.into()),
    }
}
