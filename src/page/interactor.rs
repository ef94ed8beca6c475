//! Element actions and key presses

use serde_json::json;
use tracing::{debug, info, warn};

use super::{Locator, Page};
use crate::driver::keycode;
use crate::error::Result;

const EDITOR_ACTION_SCRIPT: &str = "mobile: performEditorAction";

impl Page {
    /// Click an element, saving a screenshot if it cannot be located
    pub async fn click(&self, locator: &Locator) -> Result<()> {
        self.scoped(async {
            debug!(locator = %locator, "Clicking");
            self.find(locator).await?.click().await
        })
        .await
    }

    /// Click the element with the exact visible text
    pub async fn click_text(&self, text: &str) -> Result<()> {
        self.click(&Locator::text(text)).await
    }

    /// Click the element with the resource id
    pub async fn click_id(&self, resource_id: &str) -> Result<()> {
        self.click(&Locator::id(resource_id)).await
    }

    /// Click the element matching an iOS predicate
    pub async fn click_predicate(&self, predicate: &str) -> Result<()> {
        self.click(&Locator::predicate(predicate)).await
    }

    /// Click the element matching both iOS predicate fragments
    pub async fn click_predicates(&self, first: &str, second: &str) -> Result<()> {
        self.click(&Locator::predicates(first, second)).await
    }

    /// Wait for an element, then click it
    pub async fn wait_click(&self, locator: &Locator) -> Result<()> {
        self.scoped(async {
            debug!(locator = %locator, "Waiting to click");
            self.wait_element(locator).await?.click().await
        })
        .await
    }

    /// Click an element if present; `Ok(false)` when it cannot be located
    pub async fn try_click(&self, locator: &Locator) -> Result<bool> {
        self.scoped(async {
            debug!(locator = %locator, "Trying to click");
            match self.try_find_element(locator).await? {
                Some(element) => {
                    element.click().await?;
                    Ok(true)
                }
                None => Ok(false),
            }
        })
        .await
    }

    pub async fn try_click_text(&self, text: &str) -> Result<bool> {
        self.try_click(&Locator::text(text)).await
    }

    pub async fn try_click_id(&self, resource_id: &str) -> Result<bool> {
        self.try_click(&Locator::id(resource_id)).await
    }

    pub async fn try_click_predicate(&self, predicate: &str) -> Result<bool> {
        self.try_click(&Locator::predicate(predicate)).await
    }

    pub async fn try_click_predicates(&self, first: &str, second: &str) -> Result<bool> {
        self.try_click(&Locator::predicates(first, second)).await
    }

    /// Clear an input and type text into it
    ///
    /// The text is trimmed. Blank text only logs a warning; the input is still
    /// cleared and sent an empty string.
    pub async fn type_text(&self, locator: &Locator, text: &str) -> Result<()> {
        self.scoped(async {
            debug!(locator = %locator, "Typing {:?}", text);
            let text = text.trim();
            if text.is_empty() {
                warn!(locator = %locator, "type_text called with blank text");
            }

            let input = self.find(locator).await?;
            input.clear().await?;
            input.send_keys(text).await
        })
        .await
    }

    /// Type text, then press ENTER
    pub async fn type_and_enter(&self, locator: &Locator, text: &str) -> Result<()> {
        self.type_text(locator, text).await?;
        self.press_enter().await
    }

    /// Type text, then trigger the input method's search action
    pub async fn type_and_search(&self, locator: &Locator, text: &str) -> Result<()> {
        self.type_text(locator, text).await?;
        self.press_search().await
    }

    /// Whether a checkbox reports itself as checked
    pub async fn check_checkbox(&self, locator: &Locator) -> Result<bool> {
        self.scoped(async { self.find(locator).await?.is_selected().await })
            .await
    }

    pub async fn press_back(&self) -> Result<()> {
        self.press_key(keycode::BACK, "BACK").await
    }

    pub async fn press_home(&self) -> Result<()> {
        self.press_key(keycode::HOME, "HOME").await
    }

    pub async fn press_enter(&self) -> Result<()> {
        self.press_key(keycode::ENTER, "ENTER").await
    }

    /// Trigger the keyboard's search action
    pub async fn press_search(&self) -> Result<()> {
        self.scoped(async {
            info!("Pressing SEARCH");
            self.driver
                .execute_script(EDITOR_ACTION_SCRIPT, json!({ "action": "search" }))
                .await
                .map(|_| ())
        })
        .await
    }

    async fn press_key(&self, code: u32, name: &str) -> Result<()> {
        self.scoped(async {
            debug!(code, "Pressing {}", name);
            self.driver.key_event(code).await
        })
        .await
    }
}
