use chrono::Utc;
use log::info;

use super::catalog::{Catalog, CityOptions};
use super::pricing_service::PricingService;
use super::ServiceError;
use crate::backend::TravelBackend;
use crate::models::{CityAssignment, ClientDemand, DemandStatus, ValidationError};

/// Client demands as seen by the admin. Prices handed out or written back
/// are always recomputed from the current catalog.
pub struct DemandService<'a, B> {
    backend: &'a B,
}

impl<'a, B: TravelBackend> DemandService<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    pub async fn list(&self) -> Result<Vec<ClientDemand>, ServiceError> {
        let (mut demands, catalog) = futures::try_join!(
            self.backend.list::<ClientDemand>(&[]),
            Catalog::fetch(self.backend),
        )?;

        for demand in demands.iter_mut() {
            PricingService::price_demand(demand, &catalog);
        }
        Ok(demands)
    }

    pub async fn get(&self, id: &str) -> Result<ClientDemand, ServiceError> {
        let (mut demand, catalog) = self.load(id).await?;
        PricingService::price_demand(&mut demand, &catalog);
        Ok(demand)
    }

    pub async fn create(&self, mut demand: ClientDemand) -> Result<ClientDemand, ServiceError> {
        demand.validate()?;
        let catalog = Catalog::fetch(self.backend).await?;
        PricingService::price_demand(&mut demand, &catalog);

        let now = Utc::now();
        demand.id = None;
        demand.created_at = Some(now);
        demand.updated_at = Some(now);

        let created = self.backend.create(&demand).await?;
        info!(
            "Created demand {} for {} ({} cities, total {:.2})",
            created.id.as_deref().unwrap_or("?"),
            created.client_name,
            created.cities.len(),
            created.total_price
        );
        Ok(created)
    }

    /// Any status may replace any other. Prices are refreshed against the
    /// catalog, never changed by the status itself.
    pub async fn update_status(
        &self,
        id: &str,
        status: DemandStatus,
    ) -> Result<ClientDemand, ServiceError> {
        let (mut demand, catalog) = self.load(id).await?;
        PricingService::price_demand(&mut demand, &catalog);
        let previous = demand.status;
        demand.status = status;
        demand.updated_at = Some(Utc::now());

        let updated = self.backend.update(id, &demand).await?;
        info!("Demand {} status {} -> {}", id, previous, status);
        Ok(updated)
    }

    pub async fn update_city(
        &self,
        id: &str,
        city_id: &str,
        assignment: CityAssignment,
    ) -> Result<ClientDemand, ServiceError> {
        let (mut demand, catalog) = self.load(id).await?;

        let selection = demand
            .city_mut(city_id)
            .ok_or_else(|| ValidationError::CityNotInDemand(city_id.to_string()))?;
        assignment.apply_to(selection)?;

        PricingService::price_demand(&mut demand, &catalog);
        demand.updated_at = Some(Utc::now());

        let updated = self.backend.update(id, &demand).await?;
        info!(
            "Demand {} city {} reassigned, total now {:.2}",
            id, city_id, updated.total_price
        );
        Ok(updated)
    }

    pub async fn city_options(&self, id: &str, city_id: &str) -> Result<CityOptions, ServiceError> {
        let (demand, catalog) = self.load(id).await?;
        if demand.city(city_id).is_none() {
            return Err(ValidationError::CityNotInDemand(city_id.to_string()).into());
        }
        Ok(catalog.city_options(city_id))
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.backend.delete::<ClientDemand>(id).await?;
        info!("Deleted demand {}", id);
        Ok(())
    }

    /// Mails the program to the client. Does not touch the status.
    pub async fn send_email(&self, id: &str) -> Result<(), ServiceError> {
        self.backend.send_demand_email(id).await?;
        info!("Sent program email for demand {}", id);
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<(ClientDemand, Catalog), ServiceError> {
        let (demand, catalog) = futures::try_join!(
            self.backend.get::<ClientDemand>(id),
            Catalog::fetch(self.backend),
        )?;
        Ok((demand, catalog))
    }
}
