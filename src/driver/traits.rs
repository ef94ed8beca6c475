//! Driver traits
//!
//! This module defines the abstract interfaces of the remote automation session
//! a [`Page`](crate::page::Page) drives. The wire protocol behind them belongs to
//! the driver client, not to this crate.

use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::Error;

/// Hardware key codes understood by the Android key-event endpoint
pub mod keycode {
    pub const HOME: u32 = 3;
    pub const BACK: u32 = 4;
    pub const ENTER: u32 = 66;
}

/// Driver-level lookup strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum By {
    Id,
    ClassName,
    XPath,
    AccessibilityId,
    /// Raw UiSelector expression (Android)
    AndroidUiAutomator,
    /// Raw NSPredicate expression (iOS)
    IosPredicate,
}

impl By {
    /// W3C/Appium strategy name
    pub const fn as_str(&self) -> &'static str {
        match self {
            By::Id => "id",
            By::ClassName => "class name",
            By::XPath => "xpath",
            By::AccessibilityId => "accessibility id",
            By::AndroidUiAutomator => "-android uiautomator",
            By::IosPredicate => "-ios predicate string",
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current window size in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Screen coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Element handle trait
///
/// Represents a remote UI element. Its lifetime is bound to the remote session.
#[async_trait]
pub trait Element: Send + Sync + fmt::Debug {
    /// Remote element ID
    fn id(&self) -> &str;

    /// Click element
    async fn click(&self) -> Result<(), Error>;

    /// Clear editable content
    async fn clear(&self) -> Result<(), Error>;

    /// Send key strokes to the element
    async fn send_keys(&self, text: &str) -> Result<(), Error>;

    /// Whether the element reports itself as selected/checked
    async fn is_selected(&self) -> Result<bool, Error>;
}

/// Remote automation driver trait
///
/// Implementations report a missing element as [`Error::ElementNotFound`];
/// every other failure uses another variant.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Find the first element matching the strategy and value
    async fn find_element(&self, by: By, value: &str) -> Result<Arc<dyn Element>, Error>;

    /// Find all elements matching the strategy and value
    async fn find_elements(&self, by: By, value: &str) -> Result<Vec<Arc<dyn Element>>, Error>;

    /// Inject a hardware key event
    async fn key_event(&self, code: u32) -> Result<(), Error>;

    /// Execute a platform script such as `mobile: performEditorAction`
    async fn execute_script(
        &self,
        script: &str,
        args: serde_json::Value,
    ) -> Result<serde_json::Value, Error>;

    /// Get the current window size
    async fn window_size(&self) -> Result<ScreenSize, Error>;

    /// Perform a timed swipe gesture
    async fn swipe(&self, start: Point, end: Point, duration: Duration) -> Result<(), Error>;

    /// Capture the screen into a PNG file
    async fn save_screenshot(&self, path: &Path) -> Result<(), Error>;
}
