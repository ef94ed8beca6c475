//! Element locators
//!
//! A [`Locator`] names one UI element by strategy and value. Resolution turns it
//! into the driver-level [`By`] strategy and query string.

use std::fmt;

use crate::driver::By;
use crate::error::{Error, Result};

/// Strategy + value pair identifying a UI element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// Resource id
    Id(String),
    /// Widget class name
    ClassName(String),
    /// Raw XPath expression
    XPath(String),
    /// Accessibility id (content-desc on Android, accessibilityIdentifier on iOS)
    AccessibilityId(String),
    /// Exact visible text, matched with a UiSelector query
    Text(String),
    /// Exact text of a transient message (toast), matched with XPath
    Msg(String),
    /// Single iOS predicate expression
    Predicate(String),
    /// Two iOS predicate fragments combined with AND
    Predicates(String, String),
}

impl Locator {
    pub fn id(value: impl Into<String>) -> Self {
        Locator::Id(value.into())
    }

    pub fn class_name(value: impl Into<String>) -> Self {
        Locator::ClassName(value.into())
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        Locator::XPath(value.into())
    }

    pub fn accessibility_id(value: impl Into<String>) -> Self {
        Locator::AccessibilityId(value.into())
    }

    pub fn text(value: impl Into<String>) -> Self {
        Locator::Text(value.into())
    }

    pub fn msg(value: impl Into<String>) -> Self {
        Locator::Msg(value.into())
    }

    pub fn predicate(value: impl Into<String>) -> Self {
        Locator::Predicate(value.into())
    }

    pub fn predicates(first: impl Into<String>, second: impl Into<String>) -> Self {
        Locator::Predicates(first.into(), second.into())
    }

    /// Parse a `(strategy, value)` pair; strategy names are case-insensitive
    pub fn parse(strategy: &str, value: &str) -> Result<Self> {
        let locator = match strategy.trim().to_lowercase().as_str() {
            "id" => Locator::id(value),
            "class_name" | "class name" => Locator::class_name(value),
            "xpath" => Locator::xpath(value),
            "accessibility_id" | "accessibility id" => Locator::accessibility_id(value),
            "text" => Locator::text(value),
            "msg" => Locator::msg(value),
            "predicate" => Locator::predicate(value),
            other => {
                return Err(Error::invalid_input(format!(
                    "Unsupported locator strategy: {}",
                    other
                )))
            }
        };
        Ok(locator)
    }

    /// Parse a locator given as a slice of exactly two parts
    pub fn from_parts(parts: &[&str]) -> Result<Self> {
        match parts {
            [strategy, value] => Self::parse(strategy, value),
            _ => Err(Error::invalid_input(format!(
                "Locator must have exactly 2 parts, got {}",
                parts.len()
            ))),
        }
    }

    /// Strategy name
    pub fn strategy(&self) -> &'static str {
        match self {
            Locator::Id(_) => "id",
            Locator::ClassName(_) => "class_name",
            Locator::XPath(_) => "xpath",
            Locator::AccessibilityId(_) => "accessibility_id",
            Locator::Text(_) => "text",
            Locator::Msg(_) => "msg",
            Locator::Predicate(_) => "predicate",
            Locator::Predicates(_, _) => "predicates",
        }
    }

    /// Label used in failure screenshot names, e.g. `id_login_button`
    pub fn label(&self) -> String {
        match self {
            Locator::Predicates(first, second) => {
                format!("{}_{}_{}", self.strategy(), first, second)
            }
            Locator::Id(v)
            | Locator::ClassName(v)
            | Locator::XPath(v)
            | Locator::AccessibilityId(v)
            | Locator::Text(v)
            | Locator::Msg(v)
            | Locator::Predicate(v) => format!("{}_{}", self.strategy(), v),
        }
    }

    /// Driver strategy and query for a single-element lookup
    ///
    /// Fails with [`Error::InvalidInput`] on blank values, so no driver call
    /// is made for them. Only text values are trimmed; every other value is
    /// passed on as given.
    pub fn to_query(&self) -> Result<(By, String)> {
        let query = match self {
            Locator::Id(v) => (By::Id, non_blank(self, v)?.to_string()),
            Locator::ClassName(v) => (By::ClassName, non_blank(self, v)?.to_string()),
            Locator::XPath(v) => (By::XPath, non_blank(self, v)?.to_string()),
            Locator::AccessibilityId(v) => {
                (By::AccessibilityId, non_blank(self, v)?.to_string())
            }
            Locator::Text(v) => (
                By::AndroidUiAutomator,
                ui_selector_text(non_blank(self, v)?.trim()),
            ),
            Locator::Msg(v) => (By::XPath, exact_text_xpath(non_blank(self, v)?)),
            Locator::Predicate(v) => (By::IosPredicate, non_blank(self, v)?.to_string()),
            Locator::Predicates(first, second) => {
                let first = non_blank(self, first)?;
                let second = non_blank(self, second)?;
                (By::IosPredicate, format!("{} AND {}", first, second))
            }
        };
        Ok(query)
    }

    /// Driver strategy and query for a multi-element lookup
    ///
    /// Only id, class name and XPath are supported.
    pub fn to_multi_query(&self) -> Result<(By, String)> {
        match self {
            Locator::Id(_) | Locator::ClassName(_) | Locator::XPath(_) => self.to_query(),
            _ => Err(Error::invalid_input(format!(
                "Strategy {} is not supported for multi-element lookup",
                self.strategy()
            ))),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Predicates(first, second) => {
                write!(f, "{}=({}, {})", self.strategy(), first, second)
            }
            Locator::Id(v)
            | Locator::ClassName(v)
            | Locator::XPath(v)
            | Locator::AccessibilityId(v)
            | Locator::Text(v)
            | Locator::Msg(v)
            | Locator::Predicate(v) => write!(f, "{}={}", self.strategy(), v),
        }
    }
}

/// The value unchanged, or an input error when it is blank
fn non_blank<'a>(locator: &Locator, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::invalid_input(format!(
            "{} locator value must not be blank",
            locator.strategy()
        )));
    }
    Ok(value)
}

/// UiSelector query matching an exact text
pub fn ui_selector_text(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('"', r#"\""#);
    format!(r#"new UiSelector().text("{}")"#, escaped)
}

/// XPath query matching any node whose `text` attribute equals `text`
pub fn exact_text_xpath(text: &str) -> String {
    format!("//*[@text={}]", xpath_literal(text))
}

/// Quote a string as an XPath 1.0 literal
///
/// XPath has no escape sequences, so a value holding both quote kinds is
/// assembled with `concat()`.
fn xpath_literal(value: &str) -> String {
    if !value.contains('"') {
        format!("\"{}\"", value)
    } else if !value.contains('\'') {
        format!("'{}'", value)
    } else {
        let parts: Vec<String> = value
            .split('"')
            .map(|part| format!("\"{}\"", part))
            .collect();
        format!("concat({})", parts.join(", '\"', "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strategies() {
        assert_eq!(Locator::parse("id", "login").unwrap(), Locator::id("login"));
        assert_eq!(Locator::parse("ID", "login").unwrap(), Locator::id("login"));
        assert_eq!(
            Locator::parse("class name", "android.widget.Button").unwrap(),
            Locator::class_name("android.widget.Button")
        );
        assert_eq!(
            Locator::parse("Accessibility Id", "Back").unwrap(),
            Locator::accessibility_id("Back")
        );
        assert_eq!(Locator::parse("msg", "Saved").unwrap(), Locator::msg("Saved"));
    }

    #[test]
    fn test_parse_unknown_strategy() {
        let err = Locator::parse("css", "button").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_from_parts_arity() {
        assert!(Locator::from_parts(&["id", "login"]).is_ok());
        assert!(Locator::from_parts(&["id"]).unwrap_err().is_invalid_input());
        assert!(Locator::from_parts(&["id", "a", "b"])
            .unwrap_err()
            .is_invalid_input());
    }

    #[test]
    fn test_direct_strategies_pass_value_through() {
        assert_eq!(
            Locator::xpath("//android.widget.TextView").to_query().unwrap(),
            (By::XPath, "//android.widget.TextView".to_string())
        );
        assert_eq!(
            Locator::accessibility_id("Menu").to_query().unwrap(),
            (By::AccessibilityId, "Menu".to_string())
        );
        assert_eq!(
            Locator::xpath(" //a ").to_query().unwrap(),
            (By::XPath, " //a ".to_string())
        );
        assert_eq!(
            Locator::msg(" Saved ").to_query().unwrap(),
            (By::XPath, r#"//*[@text=" Saved "]"#.to_string())
        );
    }

    #[test]
    fn test_text_query() {
        assert_eq!(
            Locator::text("  Sign in ").to_query().unwrap(),
            (
                By::AndroidUiAutomator,
                r#"new UiSelector().text("Sign in")"#.to_string()
            )
        );
        assert_eq!(
            ui_selector_text(r#"say "hi""#),
            r#"new UiSelector().text("say \"hi\"")"#
        );
    }

    #[test]
    fn test_msg_query() {
        assert_eq!(exact_text_xpath("Saved"), r#"//*[@text="Saved"]"#);
        assert_eq!(exact_text_xpath(r#"a "b""#), r#"//*[@text='a "b"']"#);
        assert_eq!(
            exact_text_xpath(r#"it's "x""#),
            r#"//*[@text=concat("it's ", '"', "x", '"', "")]"#
        );
    }

    #[test]
    fn test_predicates_combined_with_and() {
        let (by, query) = Locator::predicates("type == 'XCUIElementTypeButton'", "name == 'OK'")
            .to_query()
            .unwrap();
        assert_eq!(by, By::IosPredicate);
        assert_eq!(query, "type == 'XCUIElementTypeButton' AND name == 'OK'");
    }

    #[test]
    fn test_blank_values_rejected() {
        assert!(Locator::text("   ").to_query().unwrap_err().is_invalid_input());
        assert!(Locator::predicate("").to_query().unwrap_err().is_invalid_input());
        assert!(Locator::predicates("name == 'OK'", " ")
            .to_query()
            .unwrap_err()
            .is_invalid_input());
        assert!(Locator::id("").to_query().unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_multi_query_restricted() {
        assert!(Locator::id("row").to_multi_query().is_ok());
        assert!(Locator::class_name("Cell").to_multi_query().is_ok());
        assert!(Locator::text("Row").to_multi_query().unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_label_and_display() {
        assert_eq!(Locator::id("login").label(), "id_login");
        assert_eq!(Locator::predicates("a", "b").label(), "predicates_a_b");
        assert_eq!(Locator::text("Next").to_string(), "text=Next");
    }
}
