//! Locator resolution
//!
//! Single, loud, quiet and multi-element lookups.

use std::sync::Arc;
use tracing::{debug, error};

use super::{Locator, Page};
use crate::driver::Element;
use crate::error::Result;

impl Page {
    /// Resolve without logging scope; shared by every lookup path
    pub(super) async fn resolve(&self, locator: &Locator) -> Result<Arc<dyn Element>> {
        let (by, query) = locator.to_query()?;
        self.driver.find_element(by, &query).await
    }

    /// Find a single element
    ///
    /// A miss is returned as [`Error::ElementNotFound`](crate::Error::ElementNotFound)
    /// without a screenshot.
    pub async fn find_element(&self, locator: &Locator) -> Result<Arc<dyn Element>> {
        self.scoped(async {
            debug!(locator = %locator, "Finding element");
            self.resolve(locator).await
        })
        .await
    }

    /// Find an element by its exact visible text
    pub async fn find_text(&self, text: &str) -> Result<Arc<dyn Element>> {
        self.find_element(&Locator::text(text)).await
    }

    /// Find an element by resource id
    pub async fn find_id(&self, resource_id: &str) -> Result<Arc<dyn Element>> {
        self.find_element(&Locator::id(resource_id)).await
    }

    /// Find an element by iOS predicate
    pub async fn find_predicate(&self, predicate: &str) -> Result<Arc<dyn Element>> {
        self.find_element(&Locator::predicate(predicate)).await
    }

    /// Find an element matching both iOS predicate fragments
    pub async fn find_predicates(&self, first: &str, second: &str) -> Result<Arc<dyn Element>> {
        self.find_element(&Locator::predicates(first, second)).await
    }

    /// Find an element, saving a screenshot and logging an error on a miss
    pub async fn find(&self, locator: &Locator) -> Result<Arc<dyn Element>> {
        self.scoped(async {
            debug!(locator = %locator, "Finding element");
            match self.resolve(locator).await {
                Err(e) if e.is_not_found() => {
                    tokio::time::sleep(self.config.snapshot_settle()).await;
                    self.capture_failure(&format!("NotFound_{}", locator.label()))
                        .await;
                    error!(locator = %locator, "Failed to locate element {}", locator);
                    Err(e)
                }
                other => other,
            }
        })
        .await
    }

    /// Find an element, returning `None` on a miss
    pub async fn try_find_element(&self, locator: &Locator) -> Result<Option<Arc<dyn Element>>> {
        self.scoped(async {
            match self.resolve(locator).await {
                Ok(element) => Ok(Some(element)),
                Err(e) if e.is_not_found() => {
                    debug!(locator = %locator, "Element {} not located", locator);
                    Ok(None)
                }
                Err(e) => Err(e),
            }
        })
        .await
    }

    /// Whether an element matching the locator currently exists
    pub async fn is_element_exist(&self, locator: &Locator) -> Result<bool> {
        Ok(self.try_find_element(locator).await?.is_some())
    }

    /// Find all matching elements, in document order
    ///
    /// Only id, class name and XPath locators are supported.
    pub async fn find_elements(&self, locator: &Locator) -> Result<Vec<Arc<dyn Element>>> {
        self.scoped(async {
            let (by, query) = locator.to_multi_query()?;
            debug!(locator = %locator, "Finding elements");
            self.driver.find_elements(by, &query).await
        })
        .await
    }
}
