//! Source of catalog listings for the browsing views. The live source asks the server, the
//! fixture source serves a bundled snapshot for offline demos and tests.

use async_trait::async_trait;
use common::error::PortalResult;
use portal_common::catalog::{Doctor, Duration, Product, Service, ServiceCategory, Workshop};
use serde::Deserialize;

use crate::{
    api,
    http::{HttpClient, Result},
};

/// Read side of the catalog shared by every service vertical
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Services of `category`, or every service when no category is given
    async fn services(&self, category: Option<ServiceCategory>) -> Result<Vec<Service>>;
    async fn products(&self) -> Result<Vec<Product>>;
    async fn durations(&self) -> Result<Vec<Duration>>;
    async fn doctors(&self) -> Result<Vec<Doctor>>;
    async fn workshops(&self) -> Result<Vec<Workshop>>;
}

/// [CatalogSource] backed by the REST api
#[derive(Clone)]
pub struct LiveCatalog {
    client: HttpClient,
}

impl LiveCatalog {
    pub const fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogSource for LiveCatalog {
    async fn services(&self, category: Option<ServiceCategory>) -> Result<Vec<Service>> {
        let response = match category {
            Some(category) => api::services::get_services_by_category(&self.client, category).await?,
            None => api::services::get_all_services(&self.client).await?,
        };
        Ok(response.data)
    }

    async fn products(&self) -> Result<Vec<Product>> {
        Ok(api::products::get_all_products(&self.client).await?.data)
    }

    async fn durations(&self) -> Result<Vec<Duration>> {
        Ok(api::durations::get_all_durations(&self.client).await?.data)
    }

    async fn doctors(&self) -> Result<Vec<Doctor>> {
        Ok(api::doctors::get_all_doctors(&self.client).await?.data)
    }

    async fn workshops(&self) -> Result<Vec<Workshop>> {
        Ok(api::workshops::get_all_workshops(&self.client).await?.data)
    }
}

/// Fixed catalog held in memory
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FixtureCatalog {
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub durations: Vec<Duration>,
    #[serde(default)]
    pub doctors: Vec<Doctor>,
    #[serde(default)]
    pub workshops: Vec<Workshop>,
}

impl FixtureCatalog {
    /// Parse a catalog snapshot in the same JSON shape the api returns per listing
    /// # Errors
    /// This function will return an error if `json` is not a valid catalog document
    pub fn from_json(json: &str) -> PortalResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Snapshot shipped with the crate
    /// # Errors
    /// See [FixtureCatalog::from_json]
    pub fn bundled() -> PortalResult<Self> {
        Self::from_json(include_str!("../fixtures/catalog.json"))
    }
}

#[async_trait]
impl CatalogSource for FixtureCatalog {
    async fn services(&self, category: Option<ServiceCategory>) -> Result<Vec<Service>> {
        Ok(self
            .services
            .iter()
            .filter(|service| category.map_or(true, |c| service.details.category == c))
            .cloned()
            .collect())
    }

    async fn products(&self) -> Result<Vec<Product>> {
        Ok(self.products.clone())
    }

    async fn durations(&self) -> Result<Vec<Duration>> {
        Ok(self.durations.clone())
    }

    async fn doctors(&self) -> Result<Vec<Doctor>> {
        Ok(self.doctors.clone())
    }

    async fn workshops(&self) -> Result<Vec<Workshop>> {
        Ok(self.workshops.clone())
    }
}
