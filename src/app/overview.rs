//! Entity count overview.
//!
//! Asks each entity list for a single-row page and keeps only the reported
//! totals. The four requests run concurrently; if any of them fails the screen
//! keeps its previous counts and shows a banner.

use crate::api::resources::{Departments, Employees, Locations, Resource, ResourceClient, Tiers};
use crate::api::ApiClient;
use crate::domain::error::Result;

pub const FETCH_ERROR: &str = "Failed to fetch dashboard statistics";

/// Record totals per entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntityCounts {
    pub employees: u64,
    pub departments: u64,
    pub locations: u64,
    pub tiers: u64,
}

impl EntityCounts {
    /// `(label, count)` pairs in display order.
    #[must_use]
    pub const fn labelled(&self) -> [(&'static str, u64); 4] {
        [
            ("Employees", self.employees),
            ("Departments", self.departments),
            ("Locations", self.locations),
            ("Tiers", self.tiers),
        ]
    }
}

#[derive(Debug)]
pub struct OverviewController {
    client: ApiClient,
    counts: EntityCounts,
    is_loading: bool,
    error_message: Option<String>,
}

impl OverviewController {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            counts: EntityCounts::default(),
            is_loading: false,
            error_message: None,
        }
    }

    #[must_use]
    pub const fn counts(&self) -> EntityCounts {
        self.counts
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    /// Refetches all four totals.
    #[tracing::instrument(name = "overview_refresh", level = "debug", skip(self))]
    pub async fn refresh(&mut self) {
        self.is_loading = true;

        match self.fetch_counts().await {
            Ok(counts) => {
                tracing::debug!(?counts, "overview refreshed");
                self.counts = counts;
            }
            Err(e) => {
                tracing::warn!(error = %e, "overview fetch failed");
                self.error_message = Some(FETCH_ERROR.to_string());
            }
        }

        self.is_loading = false;
    }

    async fn fetch_counts(&self) -> Result<EntityCounts> {
        let (employees, departments, locations, tiers) = futures_util::try_join!(
            total::<Employees>(&self.client),
            total::<Departments>(&self.client),
            total::<Locations>(&self.client),
            total::<Tiers>(&self.client),
        )?;

        Ok(EntityCounts {
            employees,
            departments,
            locations,
            tiers,
        })
    }
}

async fn total<R: Resource>(client: &ApiClient) -> Result<u64> {
    let page = ResourceClient::<R>::new(client.clone()).list(0, 1).await?;
    Ok(page.total_elements)
}
