//! Mock driver implementation for testing
//!
//! A scripted in-memory session. Elements are registered per `(By, value)` key
//! and can be made to appear only after a number of lookups or swipes. Every
//! driver call is recorded so tests can assert on what reached the driver.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::traits::{By, Driver, Element, Point, ScreenSize};
use crate::Error;

/// Minimal 1x1 PNG written by [`MockDriver::save_screenshot`]
const MOCK_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
    0x00, 0x00, 0x00, 0x0D, // IHDR length
    0x49, 0x48, 0x44, 0x52, // IHDR
    0x00, 0x00, 0x00, 0x01, // Width: 1
    0x00, 0x00, 0x00, 0x01, // Height: 1
    0x08, 0x02, 0x00, 0x00, 0x00, // Bit depth: 8, Color type: 2 (RGB)
    0x90, 0x77, 0x53, 0xDE, // CRC
];

/// A call received by the mock driver
#[derive(Debug, Clone, PartialEq)]
pub enum DriverCall {
    FindElement { by: By, value: String },
    FindElements { by: By, value: String },
    KeyEvent(u32),
    ExecuteScript { script: String, args: serde_json::Value },
    WindowSize,
    Swipe { start: Point, end: Point, duration: Duration },
    SaveScreenshot(PathBuf),
}

#[derive(Debug)]
struct Registered {
    element: Arc<MockElement>,
    hidden_lookups: usize,
    hidden_swipes: usize,
}

#[derive(Debug, Default)]
struct MockState {
    elements: HashMap<(By, String), Vec<Registered>>,
    failures: HashMap<(By, String), String>,
    lookups: HashMap<(By, String), usize>,
    swipes: usize,
    calls: Vec<DriverCall>,
    fail_screenshots: bool,
}

/// Mock remote driver
#[derive(Debug)]
pub struct MockDriver {
    screen: ScreenSize,
    state: Mutex<MockState>,
}

impl MockDriver {
    /// Create a mock driver with a 1080x1920 screen
    pub fn new() -> Self {
        Self::with_screen(ScreenSize::new(1080, 1920))
    }

    /// Create a mock driver with the given screen size
    pub fn with_screen(screen: ScreenSize) -> Self {
        Self {
            screen,
            state: Mutex::new(MockState::default()),
        }
    }

    /// Register an element that is always present
    pub async fn add_element(&self, by: By, value: &str, element: Arc<MockElement>) {
        self.register(by, value, element, 0, 0).await;
    }

    /// Register an element that stays hidden for the first `lookups` lookups of its key
    pub async fn add_element_after_lookups(
        &self,
        by: By,
        value: &str,
        element: Arc<MockElement>,
        lookups: usize,
    ) {
        self.register(by, value, element, lookups, 0).await;
    }

    /// Register an element that appears once `swipes` swipe gestures were issued
    pub async fn add_element_after_swipes(
        &self,
        by: By,
        value: &str,
        element: Arc<MockElement>,
        swipes: usize,
    ) {
        self.register(by, value, element, 0, swipes).await;
    }

    /// Make every lookup of the key fail with a driver error
    pub async fn add_failure(&self, by: By, value: &str, message: &str) {
        self.state
            .lock()
            .await
            .failures
            .insert((by, value.to_string()), message.to_string());
    }

    /// Make screenshot capture fail
    pub async fn fail_screenshots(&self) {
        self.state.lock().await.fail_screenshots = true;
    }

    /// All calls received so far, in order
    pub async fn calls(&self) -> Vec<DriverCall> {
        self.state.lock().await.calls.clone()
    }

    /// Number of calls received so far
    pub async fn call_count(&self) -> usize {
        self.state.lock().await.calls.len()
    }

    /// Swipe gestures received so far
    pub async fn swipes(&self) -> Vec<(Point, Point, Duration)> {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter_map(|call| match call {
                DriverCall::Swipe { start, end, duration } => Some((*start, *end, *duration)),
                _ => None,
            })
            .collect()
    }

    /// Screenshot paths requested so far
    pub async fn screenshots(&self) -> Vec<PathBuf> {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter_map(|call| match call {
                DriverCall::SaveScreenshot(path) => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    async fn register(
        &self,
        by: By,
        value: &str,
        element: Arc<MockElement>,
        hidden_lookups: usize,
        hidden_swipes: usize,
    ) {
        self.state
            .lock()
            .await
            .elements
            .entry((by, value.to_string()))
            .or_default()
            .push(Registered {
                element,
                hidden_lookups,
                hidden_swipes,
            });
    }

    /// Record the lookup and return the currently visible matches
    async fn lookup(&self, call: DriverCall, by: By, value: &str) -> Result<Vec<Arc<MockElement>>, Error> {
        let mut state = self.state.lock().await;
        state.calls.push(call);

        let key = (by, value.to_string());
        if let Some(message) = state.failures.get(&key) {
            return Err(Error::driver(message.clone()));
        }

        let seen = {
            let counter = state.lookups.entry(key.clone()).or_insert(0);
            *counter += 1;
            *counter
        };
        let swipes = state.swipes;

        Ok(state
            .elements
            .get(&key)
            .map(|registered| {
                registered
                    .iter()
                    .filter(|r| seen > r.hidden_lookups && swipes >= r.hidden_swipes)
                    .map(|r| r.element.clone())
                    .collect()
            })
            .unwrap_or_default())
    }
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn find_element(&self, by: By, value: &str) -> Result<Arc<dyn Element>, Error> {
        let call = DriverCall::FindElement {
            by,
            value: value.to_string(),
        };
        self.lookup(call, by, value)
            .await?
            .into_iter()
            .next()
            .map(|element| element as Arc<dyn Element>)
            .ok_or_else(|| Error::element_not_found(format!("{}={}", by, value)))
    }

    async fn find_elements(&self, by: By, value: &str) -> Result<Vec<Arc<dyn Element>>, Error> {
        let call = DriverCall::FindElements {
            by,
            value: value.to_string(),
        };
        Ok(self
            .lookup(call, by, value)
            .await?
            .into_iter()
            .map(|element| element as Arc<dyn Element>)
            .collect())
    }

    async fn key_event(&self, code: u32) -> Result<(), Error> {
        self.state.lock().await.calls.push(DriverCall::KeyEvent(code));
        Ok(())
    }

    async fn execute_script(
        &self,
        script: &str,
        args: serde_json::Value,
    ) -> Result<serde_json::Value, Error> {
        self.state.lock().await.calls.push(DriverCall::ExecuteScript {
            script: script.to_string(),
            args,
        });
        Ok(serde_json::Value::Null)
    }

    async fn window_size(&self) -> Result<ScreenSize, Error> {
        self.state.lock().await.calls.push(DriverCall::WindowSize);
        Ok(self.screen)
    }

    async fn swipe(&self, start: Point, end: Point, duration: Duration) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        state.calls.push(DriverCall::Swipe { start, end, duration });
        state.swipes += 1;
        Ok(())
    }

    async fn save_screenshot(&self, path: &Path) -> Result<(), Error> {
        let fail = {
            let mut state = self.state.lock().await;
            state.calls.push(DriverCall::SaveScreenshot(path.to_path_buf()));
            state.fail_screenshots
        };

        if fail {
            return Err(Error::driver("screenshot capture failed"));
        }

        tokio::fs::write(path, MOCK_PNG).await?;
        Ok(())
    }
}

/// An action received by a mock element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementAction {
    Click,
    Clear,
    SendKeys(String),
}

/// Mock element handle
#[derive(Debug)]
pub struct MockElement {
    id: String,
    selected: bool,
    actions: Mutex<Vec<ElementAction>>,
}

impl MockElement {
    /// Create a new mock element
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            selected: false,
            actions: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock element reporting itself as selected
    pub fn selected() -> Self {
        Self {
            selected: true,
            ..Self::new()
        }
    }

    /// Actions received so far, in order
    pub async fn actions(&self) -> Vec<ElementAction> {
        self.actions.lock().await.clone()
    }

    /// Number of clicks received
    pub async fn click_count(&self) -> usize {
        self.actions
            .lock()
            .await
            .iter()
            .filter(|a| **a == ElementAction::Click)
            .count()
    }
}

impl Default for MockElement {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Element for MockElement {
    fn id(&self) -> &str {
        &self.id
    }

    async fn click(&self) -> Result<(), Error> {
        self.actions.lock().await.push(ElementAction::Click);
        Ok(())
    }

    async fn clear(&self) -> Result<(), Error> {
        self.actions.lock().await.push(ElementAction::Clear);
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> Result<(), Error> {
        self.actions
            .lock()
            .await
            .push(ElementAction::SendKeys(text.to_string()));
        Ok(())
    }

    async fn is_selected(&self) -> Result<bool, Error> {
        Ok(self.selected)
    }
}
