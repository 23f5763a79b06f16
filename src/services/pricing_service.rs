use log::warn;
use std::collections::HashSet;

use super::catalog::Catalog;
use crate::models::dates::days_between;
use crate::models::{CitySelection, ClientDemand, SpecialPackage};

pub struct PricingService;

impl PricingService {
    /// Hotel nightly rate times the number of nights
    pub fn hotel_cost(catalog: &Catalog, hotel_id: Option<&str>, nights: u32) -> f64 {
        match hotel_id {
            Some(id) => match catalog.hotel(id) {
                Some(hotel) => hotel.nightly_rate() * f64::from(nights),
                None => {
                    warn!("Hotel {} not found in catalog, priced at 0", id);
                    0.0
                }
            },
            None => 0.0,
        }
    }

    /// Transport daily rate times the number of days
    pub fn transport_cost(catalog: &Catalog, transport_id: Option<&str>, days: u32) -> f64 {
        match transport_id {
            Some(id) => match catalog.transport(id) {
                Some(transport) => transport.daily_rate() * f64::from(days),
                None => {
                    warn!("Transport {} not found in catalog, priced at 0", id);
                    0.0
                }
            },
            None => 0.0,
        }
    }

    /// Sum of flat activity prices. Each activity is charged once however
    /// often it is listed.
    pub fn activities_cost(catalog: &Catalog, activity_ids: &[String]) -> f64 {
        unique(activity_ids)
            .filter_map(|id| {
                let activity = catalog.activity(id);
                if activity.is_none() {
                    warn!("Activity {} not found in catalog, priced at 0", id);
                }
                activity
            })
            .map(|activity| activity.price.max(0.0))
            .sum()
    }

    /// Sum of flat service prices, each service charged once
    pub fn services_cost(catalog: &Catalog, service_ids: &[String]) -> f64 {
        unique(service_ids)
            .filter_map(|id| {
                let service = catalog.service(id);
                if service.is_none() {
                    warn!("Service {} not found in catalog, priced at 0", id);
                }
                service
            })
            .map(|service| service.price.max(0.0))
            .sum()
    }

    pub fn city_price(selection: &CitySelection, catalog: &Catalog) -> f64 {
        let nights = selection.duration();

        Self::hotel_cost(catalog, selection.hotel_id.as_deref(), nights)
            + Self::transport_cost(catalog, selection.transport_id.as_deref(), nights)
            + Self::services_cost(catalog, &selection.services)
            + Self::activities_cost(catalog, &selection.activities)
    }

    pub fn demand_total(cities: &[CitySelection], catalog: &Catalog) -> f64 {
        cities
            .iter()
            .map(|selection| Self::city_price(selection, catalog))
            .sum()
    }

    pub fn trip_period(cities: &[CitySelection]) -> u32 {
        cities.iter().map(CitySelection::duration).sum()
    }

    /// Re-derives durations, per-city prices, trip period and total price.
    pub fn price_demand(demand: &mut ClientDemand, catalog: &Catalog) {
        for selection in demand.cities.iter_mut() {
            selection.dates.duration =
                days_between(selection.dates.start_date, selection.dates.end_date);
            selection.price = Self::city_price(selection, catalog);
        }
        demand.trip_period = Self::trip_period(&demand.cities);
        demand.total_price = demand.cities.iter().map(|selection| selection.price).sum();
    }

    /// Every included hotel and the transport are charged over the nights of
    /// all included cities.
    pub fn package_base_price(package: &SpecialPackage, catalog: &Catalog) -> f64 {
        let days = package.total_days();

        let hotels_cost: f64 = package
            .hotels
            .iter()
            .map(|id| Self::hotel_cost(catalog, Some(id), days))
            .sum();

        hotels_cost
            + Self::transport_cost(catalog, package.transport.as_deref(), days)
            + Self::activities_cost(catalog, &package.activities)
            + Self::services_cost(catalog, &package.services)
    }

    /// Base price minus `discount_percent` of it. The discount is clamped to
    /// [0, 100] so the result never exceeds the base or drops below zero.
    pub fn final_price(base_price: f64, discount_percent: f64) -> f64 {
        let discount = if discount_percent.is_finite() {
            discount_percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
        base_price - base_price * (discount / 100.0)
    }

    /// Re-derives city durations, base price and final price.
    pub fn price_package(package: &mut SpecialPackage, catalog: &Catalog) {
        for dates in package.city_dates.values_mut() {
            dates.duration = days_between(dates.start_date, dates.end_date);
        }
        package.base_price = Self::package_base_price(package, catalog);
        package.final_price = Self::final_price(package.base_price, package.discount_percent);
    }
}

fn unique(ids: &[String]) -> impl Iterator<Item = &str> {
    let mut seen = HashSet::new();
    ids.iter()
        .map(String::as_str)
        .filter(move |id| seen.insert(*id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateRange, PackageEdit};
    use crate::services::test_support::{date, sample_catalog, selection};

    #[test]
    fn test_hotel_and_activity_scenario() {
        // 500 MAD/night for 3 nights plus a 200 MAD activity
        let catalog = sample_catalog();
        let mut city = selection("marrakech", date(2025, 3, 1), date(2025, 3, 4));
        city.hotel_id = Some("riad".to_string());
        city.activities = vec!["souk".to_string()];

        assert_eq!(PricingService::city_price(&city, &catalog), 1700.0);
    }

    #[test]
    fn test_every_cost_component() {
        let catalog = sample_catalog();
        let mut city = selection("marrakech", date(2025, 3, 1), date(2025, 3, 3));
        city.hotel_id = Some("riad".to_string());
        city.transport_id = Some("4x4".to_string());
        city.services = vec!["guide".to_string(), "photo".to_string()];
        city.activities = vec!["souk".to_string()];

        // 500*2 + 300*2 + 250 + 400 + 200
        assert_eq!(PricingService::city_price(&city, &catalog), 2450.0);
    }

    #[test]
    fn test_missing_references_cost_nothing() {
        let catalog = sample_catalog();
        let mut city = selection("marrakech", date(2025, 3, 1), date(2025, 3, 4));
        city.hotel_id = Some("ghost-hotel".to_string());
        city.transport_id = Some("ghost-transport".to_string());
        city.services = vec!["ghost-service".to_string()];
        city.activities = vec!["ghost-activity".to_string(), "souk".to_string()];

        assert_eq!(PricingService::city_price(&city, &catalog), 200.0);
    }

    #[test]
    fn test_repeated_ids_charged_once() {
        let catalog = sample_catalog();
        let mut city = selection("marrakech", date(2025, 3, 1), date(2025, 3, 2));
        city.activities = vec!["souk".to_string(), "souk".to_string()];
        city.services = vec!["guide".to_string(), "guide".to_string()];

        assert_eq!(PricingService::city_price(&city, &catalog), 450.0);
    }

    #[test]
    fn test_final_price_discounts() {
        assert_eq!(PricingService::final_price(1000.0, 20.0), 800.0);
        assert_eq!(PricingService::final_price(1000.0, 0.0), 1000.0);
        assert_eq!(PricingService::final_price(1000.0, 100.0), 0.0);
        assert_eq!(PricingService::final_price(0.0, 50.0), 0.0);
    }

    #[test]
    fn test_final_price_never_exceeds_base() {
        for base in [0.0, 1.0, 99.99, 1234.5, 250000.0] {
            for step in 0..=100 {
                let discount = f64::from(step);
                let final_price = PricingService::final_price(base, discount);
                assert!((final_price - (base - base * discount / 100.0)).abs() < 1e-6);
                assert!(final_price <= base);
                assert!(final_price >= 0.0);
            }
        }
    }

    #[test]
    fn test_demand_total_and_trip_period() {
        let catalog = sample_catalog();
        let mut marrakech = selection("marrakech", date(2025, 3, 1), date(2025, 3, 4));
        marrakech.hotel_id = Some("riad".to_string());
        marrakech.activities = vec!["souk".to_string()];
        let mut fes = selection("fes", date(2025, 3, 4), date(2025, 3, 6));
        fes.hotel_id = Some("palais".to_string());

        let mut demand = crate::services::test_support::demand(vec![marrakech, fes]);
        PricingService::price_demand(&mut demand, &catalog);

        assert_eq!(demand.trip_period, 5);
        assert_eq!(demand.cities[0].price, 1700.0);
        assert_eq!(demand.cities[1].price, 1800.0);
        assert_eq!(demand.total_price, 3500.0);
        assert_eq!(
            demand.total_price,
            PricingService::demand_total(&demand.cities, &catalog)
        );
    }

    #[test]
    fn test_repricing_is_idempotent() {
        let catalog = sample_catalog();
        let mut city = selection("marrakech", date(2025, 3, 1), date(2025, 3, 4));
        city.hotel_id = Some("riad".to_string());
        let mut demand = crate::services::test_support::demand(vec![city]);

        PricingService::price_demand(&mut demand, &catalog);
        let first = (demand.total_price, demand.trip_period);
        PricingService::price_demand(&mut demand, &catalog);

        assert_eq!((demand.total_price, demand.trip_period), first);
    }

    #[test]
    fn test_package_prices_follow_edits() {
        let catalog = sample_catalog();
        let mut package = SpecialPackage {
            title: "Imperial cities".to_string(),
            ..Default::default()
        };

        let edits = vec![
            PackageEdit::ToggleCity { city_id: "marrakech".into() },
            PackageEdit::ToggleCity { city_id: "fes".into() },
            PackageEdit::SetCityDates {
                city_id: "marrakech".into(),
                start_date: date(2025, 6, 1),
                end_date: date(2025, 6, 3),
            },
            PackageEdit::SetCityDates {
                city_id: "fes".into(),
                start_date: date(2025, 6, 3),
                end_date: date(2025, 6, 4),
            },
            PackageEdit::ToggleHotel { hotel_id: "riad".into() },
            PackageEdit::SetTransport { transport_id: Some("4x4".into()) },
            PackageEdit::ToggleActivity { activity_id: "tannery".into() },
            PackageEdit::ToggleService { service_id: "guide".into() },
            PackageEdit::SetDiscount { discount_percent: 10.0 },
        ];
        for edit in edits {
            package.apply(edit).unwrap();
        }
        PricingService::price_package(&mut package, &catalog);

        // 3 nights: 500*3 + 300*3 + 150 + 250
        assert_eq!(package.base_price, 2800.0);
        assert_eq!(package.final_price, 2520.0);

        package
            .apply(PackageEdit::ToggleCity { city_id: "fes".into() })
            .unwrap();
        PricingService::price_package(&mut package, &catalog);

        // 2 nights left
        assert_eq!(package.base_price, 2000.0);
        assert_eq!(package.final_price, 1800.0);
    }

    #[test]
    fn test_package_ignores_sent_durations() {
        let catalog = sample_catalog();
        let mut package = SpecialPackage {
            title: "Red city".to_string(),
            cities: vec!["marrakech".to_string()],
            hotels: vec!["riad".to_string()],
            base_price: 99999.0,
            ..Default::default()
        };
        let mut stale = DateRange::new(date(2025, 6, 1), date(2025, 6, 2)).unwrap();
        stale.duration = 30;
        package.city_dates.insert("marrakech".to_string(), stale);

        PricingService::price_package(&mut package, &catalog);
        assert_eq!(package.base_price, 500.0);
        assert_eq!(package.final_price, 500.0);
    }
}
