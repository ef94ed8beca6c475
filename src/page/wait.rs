//! Fixed-interval waits
//!
//! Every wait polls the resolution path until it succeeds or the deadline
//! passes. Only a missing element is retried.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error};

use super::{Locator, Page};
use crate::driver::Element;
use crate::error::{Error, Result};

impl Page {
    /// Wait for an element using the element timeout and poll interval
    pub async fn wait_element(&self, locator: &Locator) -> Result<Arc<dyn Element>> {
        self.wait_for(
            locator,
            self.config.element_timeout(),
            self.config.element_poll_interval(),
        )
        .await
    }

    /// Wait for an element with the exact visible text
    pub async fn wait_text(&self, text: &str) -> Result<Arc<dyn Element>> {
        self.wait_for(
            &Locator::text(text),
            self.config.wait_timeout(),
            self.config.poll_interval(),
        )
        .await
    }

    /// Wait for a toast message, matched by exact text over XPath
    pub async fn wait_toast(&self, msg: &str) -> Result<Arc<dyn Element>> {
        self.wait_element(&Locator::msg(msg)).await
    }

    /// Wait for an element matching an iOS predicate
    pub async fn wait_predicate(&self, predicate: &str) -> Result<Arc<dyn Element>> {
        self.wait_for(
            &Locator::predicate(predicate),
            self.config.wait_timeout(),
            self.config.poll_interval(),
        )
        .await
    }

    /// Wait for an element matching both iOS predicate fragments
    pub async fn wait_predicates(&self, first: &str, second: &str) -> Result<Arc<dyn Element>> {
        self.wait_for(
            &Locator::predicates(first, second),
            self.config.wait_timeout(),
            self.config.poll_interval(),
        )
        .await
    }

    /// Poll, then on timeout save a screenshot and log before returning the error
    async fn wait_for(
        &self,
        locator: &Locator,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<Arc<dyn Element>> {
        self.scoped(async {
            debug!(
                locator = %locator,
                timeout_ms = timeout.as_millis() as u64,
                "Waiting for element"
            );

            match self.poll(locator, timeout, poll_interval).await {
                Err(e) if e.is_timeout() => {
                    self.capture_failure(&format!("NotFound_{}", locator.label()))
                        .await;
                    error!(
                        locator = %locator,
                        "Element {} not located within {}ms",
                        locator,
                        timeout.as_millis()
                    );
                    Err(e)
                }
                other => other,
            }
        })
        .await
    }

    async fn poll(
        &self,
        locator: &Locator,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<Arc<dyn Element>> {
        let start = Instant::now();

        loop {
            match self.resolve(locator).await {
                Ok(element) => return Ok(element),
                Err(e) if e.is_not_found() => {}
                Err(e) => return Err(e),
            }

            let elapsed = start.elapsed();
            if elapsed >= timeout {
                break;
            }
            tokio::time::sleep(poll_interval.min(timeout - elapsed)).await;
        }

        Err(Error::timeout(format!(
            "Element not found within {}ms: {}",
            timeout.as_millis(),
            locator
        )))
    }
}
