use chrono::Utc;
use log::info;

use super::catalog::Catalog;
use super::pricing_service::PricingService;
use super::ServiceError;
use crate::backend::TravelBackend;
use crate::models::{PackageEdit, SpecialPackage};

pub struct PackageService<'a, B> {
    backend: &'a B,
}

impl<'a, B: TravelBackend> PackageService<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    pub async fn list(&self) -> Result<Vec<SpecialPackage>, ServiceError> {
        let (mut packages, catalog) = futures::try_join!(
            self.backend.list::<SpecialPackage>(&[]),
            Catalog::fetch(self.backend),
        )?;

        for package in packages.iter_mut() {
            PricingService::price_package(package, &catalog);
        }
        Ok(packages)
    }

    pub async fn get(&self, id: &str) -> Result<SpecialPackage, ServiceError> {
        let (mut package, catalog) = self.load(id).await?;
        PricingService::price_package(&mut package, &catalog);
        Ok(package)
    }

    /// Prices a package being edited in the form without storing it.
    pub async fn quote(&self, mut draft: SpecialPackage) -> Result<SpecialPackage, ServiceError> {
        draft.normalize()?;
        let catalog = Catalog::fetch(self.backend).await?;
        PricingService::price_package(&mut draft, &catalog);
        Ok(draft)
    }

    pub async fn create(&self, mut package: SpecialPackage) -> Result<SpecialPackage, ServiceError> {
        package.validate()?;
        let catalog = Catalog::fetch(self.backend).await?;
        PricingService::price_package(&mut package, &catalog);

        let now = Utc::now();
        package.id = None;
        package.created_at = Some(now);
        package.updated_at = Some(now);

        let created = self.backend.create(&package).await?;
        info!(
            "Created package '{}' base {:.2} final {:.2}",
            created.title, created.base_price, created.final_price
        );
        Ok(created)
    }

    pub async fn replace(
        &self,
        id: &str,
        mut package: SpecialPackage,
    ) -> Result<SpecialPackage, ServiceError> {
        package.validate()?;
        let (existing, catalog) = self.load(id).await?;
        PricingService::price_package(&mut package, &catalog);

        package.id = Some(id.to_string());
        package.created_at = existing.created_at;
        package.updated_at = Some(Utc::now());

        let updated = self.backend.update(id, &package).await?;
        info!("Replaced package {}", id);
        Ok(updated)
    }

    /// Applies the edits in order. If any edit is rejected nothing is
    /// written.
    pub async fn apply_edits(
        &self,
        id: &str,
        edits: Vec<PackageEdit>,
    ) -> Result<SpecialPackage, ServiceError> {
        let (mut package, catalog) = self.load(id).await?;

        let count = edits.len();
        for edit in edits {
            package.apply(edit)?;
        }
        PricingService::price_package(&mut package, &catalog);
        package.updated_at = Some(Utc::now());

        let updated = self.backend.update(id, &package).await?;
        info!(
            "Applied {} edit(s) to package {}, final price {:.2}",
            count, id, updated.final_price
        );
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.backend.delete::<SpecialPackage>(id).await?;
        info!("Deleted package {}", id);
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<(SpecialPackage, Catalog), ServiceError> {
        let (package, catalog) = futures::try_join!(
            self.backend.get::<SpecialPackage>(id),
            Catalog::fetch(self.backend),
        )?;
        Ok((package, catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PackageStatus, ValidationError};
    use crate::services::test_support::{date, seeded_backend};

    fn draft() -> SpecialPackage {
        SpecialPackage {
            title: "Red city weekend".to_string(),
            cities: vec!["marrakech".to_string()],
            hotels: vec!["riad".to_string()],
            activities: vec!["souk".to_string()],
            discount_percent: 20.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_create_ignores_sent_prices() {
        let backend = seeded_backend();
        let service = PackageService::new(&backend);
        let mut package = draft();
        package.base_price = 1.0;
        package.final_price = 1.0;

        let created = tokio_test::block_on(service.create(package)).unwrap();

        // no dates yet, so only the activity counts
        assert_eq!(created.base_price, 200.0);
        assert_eq!(created.final_price, 160.0);
        assert_eq!(created.status, PackageStatus::Draft);
    }

    #[test]
    fn test_edits_reprice_and_persist() {
        let backend = seeded_backend();
        let service = PackageService::new(&backend);
        let id = tokio_test::block_on(service.create(draft()))
            .unwrap()
            .id
            .unwrap();

        let edits = vec![
            PackageEdit::SetCityDates {
                city_id: "marrakech".into(),
                start_date: date(2025, 9, 1),
                end_date: date(2025, 9, 3),
            },
            PackageEdit::SetFeatured { featured: true },
            PackageEdit::SetStatus {
                status: PackageStatus::Published,
            },
        ];
        let updated = tokio_test::block_on(service.apply_edits(&id, edits)).unwrap();

        // 500*2 + 200, minus 20%
        assert_eq!(updated.base_price, 1200.0);
        assert_eq!(updated.final_price, 960.0);
        assert!(updated.featured);
        assert_eq!(updated.status, PackageStatus::Published);

        let stored = tokio_test::block_on(service.get(&id)).unwrap();
        assert_eq!(stored.final_price, 960.0);
    }

    #[test]
    fn test_rejected_edit_writes_nothing() {
        let backend = seeded_backend();
        let service = PackageService::new(&backend);
        let id = tokio_test::block_on(service.create(draft()))
            .unwrap()
            .id
            .unwrap();

        let edits = vec![
            PackageEdit::SetFeatured { featured: true },
            PackageEdit::SetDiscount {
                discount_percent: 120.0,
            },
        ];
        let result = tokio_test::block_on(service.apply_edits(&id, edits));
        assert!(matches!(
            result,
            Err(ServiceError::Validation(ValidationError::DiscountOutOfRange(_)))
        ));

        let stored = tokio_test::block_on(service.get(&id)).unwrap();
        assert!(!stored.featured);
        assert_eq!(stored.discount_percent, 20.0);
    }

    #[test]
    fn test_quote_does_not_store() {
        let backend = seeded_backend();
        let service = PackageService::new(&backend);
        let mut untitled = draft();
        untitled.title = String::new();

        let quoted = tokio_test::block_on(service.quote(untitled)).unwrap();
        assert_eq!(quoted.final_price, 160.0);
        assert!(tokio_test::block_on(service.list()).unwrap().is_empty());
    }

    #[test]
    fn test_replace_keeps_creation_time() {
        let backend = seeded_backend();
        let service = PackageService::new(&backend);
        let created = tokio_test::block_on(service.create(draft())).unwrap();
        let id = created.id.clone().unwrap();

        let mut replacement = draft();
        replacement.title = "Red city long weekend".to_string();
        replacement.discount_percent = 0.0;
        let replaced = tokio_test::block_on(service.replace(&id, replacement)).unwrap();

        assert_eq!(replaced.id.as_deref(), Some(id.as_str()));
        assert_eq!(replaced.created_at, created.created_at);
        assert_eq!(replaced.final_price, 200.0);
    }
}
