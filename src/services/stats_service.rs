use serde::Serialize;
use std::collections::BTreeMap;

use super::catalog::{Catalog, CatalogCounts};
use super::pricing_service::PricingService;
use super::ServiceError;
use crate::backend::TravelBackend;
use crate::models::{ClientDemand, DemandStatus, PackageStatus, SpecialPackage};

/// Figures shown on the dashboard overview.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub demands_by_status: BTreeMap<String, usize>,
    pub packages_by_status: BTreeMap<String, usize>,
    pub featured_packages: usize,
    pub catalog: CatalogCounts,
    /// Sum of total prices of validated and sent demands.
    pub confirmed_revenue: f64,
}

pub struct StatsService;

impl StatsService {
    pub async fn collect<B: TravelBackend>(backend: &B) -> Result<DashboardStats, ServiceError> {
        let (mut demands, packages, catalog) = futures::try_join!(
            backend.list::<ClientDemand>(&[]),
            backend.list::<SpecialPackage>(&[]),
            Catalog::fetch(backend),
        )?;

        for demand in demands.iter_mut() {
            PricingService::price_demand(demand, &catalog);
        }

        Ok(Self::summarize(&demands, &packages, &catalog))
    }

    pub fn summarize(
        demands: &[ClientDemand],
        packages: &[SpecialPackage],
        catalog: &Catalog,
    ) -> DashboardStats {
        let mut demands_by_status: BTreeMap<String, usize> = [
            DemandStatus::Pending,
            DemandStatus::Validated,
            DemandStatus::Sent,
        ]
        .iter()
        .map(|status| (status.to_string(), 0))
        .collect();
        for demand in demands {
            *demands_by_status.entry(demand.status.to_string()).or_default() += 1;
        }

        let mut packages_by_status: BTreeMap<String, usize> = BTreeMap::new();
        for status in [PackageStatus::Draft, PackageStatus::Published, PackageStatus::Archived] {
            let count = packages.iter().filter(|p| p.status == status).count();
            packages_by_status.insert(status.to_string(), count);
        }

        let confirmed_revenue = demands
            .iter()
            .filter(|d| matches!(d.status, DemandStatus::Validated | DemandStatus::Sent))
            .map(|d| d.total_price)
            .sum();

        DashboardStats {
            demands_by_status,
            packages_by_status,
            featured_packages: packages.iter().filter(|p| p.featured).count(),
            catalog: catalog.counts(),
            confirmed_revenue,
        }
    }
}
