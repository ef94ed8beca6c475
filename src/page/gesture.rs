//! Swipe gestures
//!
//! Swipes run between 95% and 25% of the screen along their axis, at a
//! fraction of the other axis.

use tracing::{debug, info, warn};

use super::{Locator, Page};
use crate::driver::{Point, ScreenSize};
use crate::error::{Error, Result};

/// Cross-axis fraction of the screen centre
pub const DEFAULT_SWIPE_FRACTION: f64 = 0.5;

/// Swipes performed by [`Page::swipe_up_to_location`] before giving up
pub const SWIPE_TO_LOCATION_ATTEMPTS: usize = 10;

const FAR_EDGE: f64 = 0.95;
const NEAR_EDGE: f64 = 0.25;

/// Finger movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    /// Start and end points on a screen, `fraction` placing the gesture on the
    /// cross axis (from the top for horizontal swipes, from the left otherwise)
    pub fn path(self, size: ScreenSize, fraction: f64) -> (Point, Point) {
        let width = f64::from(size.width);
        let height = f64::from(size.height);
        let scale = |length: f64, fraction: f64| (length * fraction) as i64;

        match self {
            SwipeDirection::Left | SwipeDirection::Right => {
                let y = scale(height, fraction);
                let (from, to) = if self == SwipeDirection::Left {
                    (FAR_EDGE, NEAR_EDGE)
                } else {
                    (NEAR_EDGE, FAR_EDGE)
                };
                (Point::new(scale(width, from), y), Point::new(scale(width, to), y))
            }
            SwipeDirection::Up | SwipeDirection::Down => {
                let x = scale(width, fraction);
                let (from, to) = if self == SwipeDirection::Up {
                    (FAR_EDGE, NEAR_EDGE)
                } else {
                    (NEAR_EDGE, FAR_EDGE)
                };
                (Point::new(x, scale(height, from)), Point::new(x, scale(height, to)))
            }
        }
    }
}

fn check_fraction(fraction: f64, name: &str) -> Result<()> {
    if !fraction.is_finite() {
        return Err(Error::invalid_input(format!(
            "{} must be a finite number, got {}",
            name, fraction
        )));
    }
    Ok(())
}

impl Page {
    /// Current window size
    pub async fn screen_size(&self) -> Result<ScreenSize> {
        self.driver.window_size().await
    }

    /// Swipe in `direction`, `fraction` placing the gesture on the cross axis
    pub async fn swipe(&self, direction: SwipeDirection, fraction: f64) -> Result<()> {
        self.scoped(async {
            check_fraction(fraction, "swipe fraction")?;
            debug!(?direction, fraction, "Swiping");

            let size = self.screen_size().await?;
            let (start, end) = direction.path(size, fraction);
            self.driver
                .swipe(start, end, self.config.swipe_duration())
                .await
        })
        .await
    }

    pub async fn swipe_left(&self, from_top: f64) -> Result<()> {
        self.swipe(SwipeDirection::Left, from_top).await
    }

    pub async fn swipe_right(&self, from_top: f64) -> Result<()> {
        self.swipe(SwipeDirection::Right, from_top).await
    }

    pub async fn swipe_up(&self, from_left: f64) -> Result<()> {
        self.swipe(SwipeDirection::Up, from_left).await
    }

    pub async fn swipe_down(&self, from_left: f64) -> Result<()> {
        self.swipe(SwipeDirection::Down, from_left).await
    }

    /// Swipe up until the target can be located, then click it
    ///
    /// Makes at most [`SWIPE_TO_LOCATION_ATTEMPTS`] swipes. Returns `Ok(true)`
    /// once the target was clicked and `Ok(false)` when every attempt missed.
    pub async fn swipe_up_to_location(&self, locator: &Locator, from_left: f64) -> Result<bool> {
        self.scoped(async {
            check_fraction(from_left, "from_left")?;
            locator.to_query()?;
            debug!(locator = %locator, "Swiping up to {}", locator);

            let size = self.screen_size().await?;
            let (start, end) = SwipeDirection::Up.path(size, from_left);

            for attempt in 1..=SWIPE_TO_LOCATION_ATTEMPTS {
                if let Some(element) = self.try_find_element(locator).await? {
                    element.click().await?;
                    info!(locator = %locator, attempt, "Clicked {} after swiping", locator);
                    return Ok(true);
                }
                self.driver
                    .swipe(start, end, self.config.swipe_duration())
                    .await?;
            }

            warn!(
                locator = %locator,
                "{} not located after {} swipes",
                locator,
                SWIPE_TO_LOCATION_ATTEMPTS
            );
            Ok(false)
        })
        .await
    }
}
