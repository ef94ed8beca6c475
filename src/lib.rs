//! appium-page: page objects for mobile UI automation
//!
//! This library wraps an Appium/Selenium-style remote driver session in a
//! [`Page`] that locates elements, clicks, types, waits, swipes and captures
//! screenshots on behalf of UI test scripts.

pub mod error;
pub mod config;
pub mod logging;

pub mod driver;
pub mod page;

// Re-exports
pub use config::PageConfig;
pub use error::{Error, Result};
pub use page::{Locator, Page, SwipeDirection};

/// appium-page library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
