#![allow(dead_code)]

use actix_web::{web, App};
use serde_json::json;

use travel_admin_api::backend::MemoryBackend;
use travel_admin_api::config::AppContext;
use travel_admin_api::models::{Activity, City, ClientDemand, Hotel, Service, Transport};
use travel_admin_api::routes;

pub struct TestApp {
    pub context: web::Data<AppContext<MemoryBackend>>,
}

impl TestApp {
    /// App backed by an in-memory backend holding the sample catalog.
    pub fn new() -> Self {
        let backend = MemoryBackend::new();
        seed_catalog(&backend);

        Self {
            context: web::Data::new(AppContext::new(backend, "test")),
        }
    }

    pub fn backend(&self) -> &MemoryBackend {
        &self.context.backend
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.context.clone())
            .configure(routes::config::<MemoryBackend>)
    }

    /// Stores a demand exactly as given, stale prices included.
    pub fn seed_demand(&self, demand: serde_json::Value) -> String {
        let demand: ClientDemand = serde_json::from_value(demand).unwrap();
        let id = demand.id.clone().unwrap();
        self.backend().seed(&demand).unwrap();
        id
    }
}

fn seed_catalog(backend: &MemoryBackend) {
    let cities: Vec<City> = serde_json::from_value(json!([
        {"id": "marrakech", "name": "Marrakech", "region": "Marrakech-Safi", "description": "The red city"},
        {"id": "fes", "name": "Fes", "region": "Fes-Meknes", "description": "Imperial city"},
        {"id": "merzouga", "name": "Merzouga", "region": "Draa-Tafilalet", "description": "Erg Chebbi dunes"}
    ]))
    .unwrap();
    let hotels: Vec<Hotel> = serde_json::from_value(json!([
        {"id": "riad", "name": "Riad Yasmine", "city": "Marrakech", "basePrice": 500, "currency": "MAD"},
        {"id": "palais", "name": "Palais Faraj", "city": "Fes", "price": 900, "currency": "MAD"},
        {"id": "camp", "name": "Desert Camp", "city": "Merzouga", "basePrice": 0, "price": 700}
    ]))
    .unwrap();
    let transports: Vec<Transport> = serde_json::from_value(json!([
        {"id": "4x4", "name": "4x4 with driver", "city": "Merzouga", "price": 300},
        {"id": "van", "name": "Minivan", "city": "Marrakech", "price": 250}
    ]))
    .unwrap();
    let activities: Vec<Activity> = serde_json::from_value(json!([
        {"id": "souk", "name": "Souk walk", "cityId": "marrakech", "price": 200,
         "currency": "MAD", "duration": "3h", "difficulty": "EASY", "category": "CULTURAL"},
        {"id": "camel", "name": "Camel trek", "cityId": "merzouga", "price": 350,
         "currency": "MAD", "duration": "2h", "difficulty": "MODERATE", "category": "ADVENTURE"},
        {"id": "cooking", "name": "Cooking class", "cityId": "fes", "price": 400,
         "currency": "MAD", "duration": "4h", "difficulty": "EASY", "category": "CULINARY"}
    ]))
    .unwrap();
    let services: Vec<Service> = serde_json::from_value(json!([
        {"id": "guide", "name": "Local guide", "type": "GUIDE", "provider": "Atlas Guides",
         "price": 250, "currency": "MAD", "description": "Licensed city guide"},
        {"id": "photo", "name": "Photo session", "type": "PHOTOGRAPHY", "provider": "Lens & Dunes",
         "price": 400, "currency": "MAD", "description": "Golden hour shoot"}
    ]))
    .unwrap();

    for city in &cities {
        backend.seed(city).unwrap();
    }
    for hotel in &hotels {
        backend.seed(hotel).unwrap();
    }
    for transport in &transports {
        backend.seed(transport).unwrap();
    }
    for activity in &activities {
        backend.seed(activity).unwrap();
    }
    for service in &services {
        backend.seed(service).unwrap();
    }
}

pub fn sample_demand(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "clientName": "Amina Benali",
        "email": "amina@example.com",
        "phone": "+212600000000",
        "numberOfTravelers": 2,
        "tripPeriod": 0,
        "cities": [
            {"cityId": "marrakech", "startDate": "2025-03-01", "endDate": "2025-03-04",
             "duration": 0, "activities": ["souk"]},
            {"cityId": "merzouga", "startDate": "2025-03-04", "endDate": "2025-03-06",
             "duration": 0, "activities": []}
        ],
        "status": "PENDING",
        "totalPrice": 0
    })
}
