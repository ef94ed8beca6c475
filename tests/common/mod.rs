//! Common test utilities
//!
//! Shared fixtures for the integration tests: a scripted mock session holding a
//! small login screen, and a page wired to a temporary snapshot directory.

#![allow(dead_code)]

use appium_page::driver::{By, MockDriver, MockElement, ScreenSize};
use appium_page::logging::{init_logging, LogCapture};
use appium_page::{Page, PageConfig};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const USERNAME_ID: &str = "com.example.shop:id/username";
pub const PASSWORD_ID: &str = "com.example.shop:id/password";
pub const LOGIN_ID: &str = "com.example.shop:id/login";
pub const REMEMBER_ID: &str = "com.example.shop:id/remember";

/// Elements of the login screen
pub struct LoginScreen {
    pub username: Arc<MockElement>,
    pub password: Arc<MockElement>,
    pub login: Arc<MockElement>,
    pub remember: Arc<MockElement>,
}

/// A page over a mock session, with captured logs and snapshot directory
pub struct TestPage {
    pub driver: Arc<MockDriver>,
    pub page: Page,
    pub logs: LogCapture,
    pub snapshots: TempDir,
}

/// Configuration with short waits suitable for tests
pub fn test_config(snapshot_dir: &Path) -> PageConfig {
    PageConfig::new(Duration::from_millis(150))
        .with_poll_interval(Duration::from_millis(10))
        .with_element_wait(Duration::from_millis(150), Duration::from_millis(5))
        .with_snapshot_settle(Duration::ZERO)
        .with_snapshot_dir(snapshot_dir)
}

/// Setup a page over a fresh mock session
pub fn setup_test_page(screen: ScreenSize) -> TestPage {
    init_logging("warn");

    let snapshots = tempfile::tempdir().expect("Failed to create snapshot dir");
    let driver = Arc::new(MockDriver::with_screen(screen));
    let logs = LogCapture::new();
    let page = Page::new(driver.clone(), test_config(snapshots.path()))
        .with_dispatch(logs.dispatch());

    TestPage {
        driver,
        page,
        logs,
        snapshots,
    }
}

/// Register the login screen on the mock session
pub async fn setup_login_screen(driver: &MockDriver) -> LoginScreen {
    let screen = LoginScreen {
        username: Arc::new(MockElement::new()),
        password: Arc::new(MockElement::new()),
        login: Arc::new(MockElement::new()),
        remember: Arc::new(MockElement::selected()),
    };

    driver.add_element(By::Id, USERNAME_ID, screen.username.clone()).await;
    driver.add_element(By::Id, PASSWORD_ID, screen.password.clone()).await;
    driver.add_element(By::Id, LOGIN_ID, screen.login.clone()).await;
    driver.add_element(By::Id, REMEMBER_ID, screen.remember.clone()).await;

    screen
}

/// Names of the files in a snapshot directory
pub fn snapshot_files(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}
