//! # Page objects
//!
//! [`Page`] wraps one remote driver session and exposes the operations UI test
//! scripts are written in: locate, click, type, wait, swipe, key presses and
//! screenshots.
//!
//! ## Failure policy
//! - **loud** lookups (`find`, `click*`, `type_text*`, `check_checkbox`) save a
//!   `NotFound_<strategy>_<value>` screenshot and log an error before returning
//!   [`Error::ElementNotFound`](crate::Error::ElementNotFound)
//! - **quiet** lookups (`try_*`, `is_element_exist`) log at debug and report
//!   the miss through their return value
//! - waits poll at a fixed interval and fail loudly with
//!   [`Error::Timeout`](crate::Error::Timeout)
//!
//! Input errors (blank values, unsupported strategies, non-finite fractions)
//! are returned before any driver call.
//!
//! ## Example
//! ```rust,no_run
//! use appium_page::{driver::Driver, Locator, Page, PageConfig};
//! use std::{sync::Arc, time::Duration};
//!
//! # async fn example(driver: Arc<dyn Driver>) -> appium_page::Result<()> {
//! let page = Page::new(driver, PageConfig::new(Duration::from_secs(10)));
//!
//! page.click_id("com.example:id/login").await?;
//! page.type_and_enter(&Locator::id("com.example:id/user"), "alice").await?;
//! page.wait_toast("Welcome back").await?;
//! # Ok(())
//! # }
//! ```

pub mod locator;
mod finder;
mod wait;
mod interactor;
mod gesture;
mod snapshot;


use std::future::Future;
use std::sync::Arc;
use tracing::instrument::WithSubscriber;
use tracing::Dispatch;

use crate::config::PageConfig;
use crate::driver::Driver;

pub use gesture::{SwipeDirection, DEFAULT_SWIPE_FRACTION, SWIPE_TO_LOCATION_ATTEMPTS};
pub use locator::Locator;
pub use snapshot::snapshot_file_name;

/// Page object over a remote driver session
pub struct Page {
    driver: Arc<dyn Driver>,
    config: PageConfig,
    dispatch: Option<Dispatch>,
}

impl Page {
    /// Create a new page over the given driver
    pub fn new(driver: Arc<dyn Driver>, config: PageConfig) -> Self {
        Self {
            driver,
            config,
            dispatch: None,
        }
    }

    /// Route every event emitted by this page to `dispatch`
    ///
    /// Without one, events go to the subscriber that is current when an
    /// operation runs.
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// Underlying driver
    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    /// Page configuration
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Run `fut` under the injected dispatcher, if any
    async fn scoped<F: Future>(&self, fut: F) -> F::Output {
        match &self.dispatch {
            Some(dispatch) => fut.with_subscriber(dispatch.clone()).await,
            None => fut.await,
        }
    }
}
