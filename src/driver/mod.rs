//! # Driver layer
//!
//! The remote automation session a page talks to, expressed as two traits:
//!
//! - [`Driver`]: element lookup, key events, platform scripts, window size,
//!   swipe gestures and screenshots
//! - [`Element`]: a remote element handle (click, clear, send keys, selected state)
//!
//! Session creation and the wire protocol live in the driver client that
//! implements these traits. [`MockDriver`] is a scripted in-memory session for
//! tests.

pub mod traits;
pub mod mock;

pub use traits::{keycode, By, Driver, Element, Point, ScreenSize};
pub use mock::{DriverCall, ElementAction, MockDriver, MockElement};
