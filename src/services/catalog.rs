use serde::Serialize;
use std::collections::HashMap;

use crate::backend::{BackendError, TravelBackend};
use crate::models::{Activity, City, Hotel, Service, Transport};

/// Reference data pricing is computed against, indexed by id.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    cities: Vec<City>,
    hotels: HashMap<String, Hotel>,
    transports: HashMap<String, Transport>,
    activities: HashMap<String, Activity>,
    services: HashMap<String, Service>,
}

/// What the admin can assign to one city of a demand.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityOptions {
    pub city: Option<City>,
    pub hotels: Vec<Hotel>,
    pub transports: Vec<Transport>,
    pub activities: Vec<Activity>,
    pub services: Vec<Service>,
}

impl Catalog {
    pub fn new(
        cities: Vec<City>,
        hotels: Vec<Hotel>,
        transports: Vec<Transport>,
        activities: Vec<Activity>,
        services: Vec<Service>,
    ) -> Self {
        Self {
            cities,
            hotels: hotels.into_iter().map(|h| (h.id.clone(), h)).collect(),
            transports: transports.into_iter().map(|t| (t.id.clone(), t)).collect(),
            activities: activities
                .into_iter()
                .filter_map(|a| a.id.clone().map(|id| (id, a)))
                .collect(),
            services: services
                .into_iter()
                .filter_map(|s| s.id.clone().map(|id| (id, s)))
                .collect(),
        }
    }

    /// Loads every reference list, issuing the requests concurrently.
    pub async fn fetch<B: TravelBackend>(backend: &B) -> Result<Self, BackendError> {
        let (cities, hotels, transports, activities, services) = futures::try_join!(
            backend.list::<City>(&[]),
            backend.list::<Hotel>(&[]),
            backend.list::<Transport>(&[]),
            backend.list::<Activity>(&[]),
            backend.list::<Service>(&[]),
        )?;

        Ok(Self::new(cities, hotels, transports, activities, services))
    }

    pub fn city(&self, id: &str) -> Option<&City> {
        self.cities.iter().find(|c| c.id == id)
    }

    pub fn hotel(&self, id: &str) -> Option<&Hotel> {
        self.hotels.get(id)
    }

    pub fn transport(&self, id: &str) -> Option<&Transport> {
        self.transports.get(id)
    }

    pub fn activity(&self, id: &str) -> Option<&Activity> {
        self.activities.get(id)
    }

    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.get(id)
    }

    pub fn counts(&self) -> CatalogCounts {
        CatalogCounts {
            cities: self.cities.len(),
            hotels: self.hotels.len(),
            transports: self.transports.len(),
            activities: self.activities.len(),
            services: self.services.len(),
        }
    }

    /// Hotels and transports are linked to a city by name, activities by id.
    pub fn city_options(&self, city_id: &str) -> CityOptions {
        let city = self.city(city_id).cloned();
        let city_name = city.as_ref().map(|c| c.name.to_lowercase());
        let in_city = |name: &str| {
            city_name
                .as_deref()
                .is_some_and(|city_name| name.to_lowercase() == city_name)
        };

        let mut hotels: Vec<Hotel> = self
            .hotels
            .values()
            .filter(|h| in_city(&h.city))
            .cloned()
            .collect();
        hotels.sort_by(|a, b| a.name.cmp(&b.name));

        let mut transports: Vec<Transport> = self
            .transports
            .values()
            .filter(|t| in_city(&t.city))
            .cloned()
            .collect();
        transports.sort_by(|a, b| a.name.cmp(&b.name));

        let mut activities: Vec<Activity> = self
            .activities
            .values()
            .filter(|a| a.city_id == city_id)
            .cloned()
            .collect();
        activities.sort_by(|a, b| a.name.cmp(&b.name));

        let mut services: Vec<Service> = self.services.values().cloned().collect();
        services.sort_by(|a, b| a.name.cmp(&b.name));

        CityOptions {
            city,
            hotels,
            transports,
            activities,
            services,
        }
    }
}

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct CatalogCounts {
    pub cities: usize,
    pub hotels: usize,
    pub transports: usize,
    pub activities: usize,
    pub services: usize,
}
