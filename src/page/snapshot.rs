//! Screenshots
//!
//! Files are named `<label>_<YYYY-MM-DD HH_MM_SS>.png` under the configured
//! snapshot directory.

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;
use std::path::PathBuf;
use tracing::{debug, warn};

use super::Page;
use crate::error::Result;

const SNAPSHOT_TIME_FORMAT: &str = "%Y-%m-%d %H_%M_%S";

#[cfg(windows)]
const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
#[cfg(not(windows))]
const RESERVED: &[char] = &['/', '\\'];

/// File name for a screenshot taken at `at`
///
/// Path separators and control characters in `label` are replaced with `_`,
/// as are the characters Windows reserves when building there.
pub fn snapshot_file_name<Tz>(label: &str, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let label: String = label
        .chars()
        .map(|c| {
            if RESERVED.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    format!("{}_{}.png", label, at.format(SNAPSHOT_TIME_FORMAT))
}

impl Page {
    /// Capture the screen, returning the written file path
    pub async fn screenshot(&self, label: &str) -> Result<PathBuf> {
        self.scoped(async {
            let dir = self.config.snapshot_dir();
            tokio::fs::create_dir_all(&dir).await?;

            let path = dir.join(snapshot_file_name(label, &Local::now()));
            debug!(label, path = %path.display(), "Capturing screenshot");

            self.driver.save_screenshot(&path).await?;
            Ok(path)
        })
        .await
    }

    /// Diagnostic screenshot for a failed lookup; its own failure is only logged
    pub(super) async fn capture_failure(&self, label: &str) {
        if let Err(e) = self.screenshot(label).await {
            warn!(label, "Failed to capture diagnostic screenshot: {}", e);
        }
    }
}
