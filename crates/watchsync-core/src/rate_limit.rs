use std::time::Duration;

pub const DEFAULT_ITEM_DELAY: Duration = Duration::from_millis(500);

/// Pacing between consecutive items of a pass. Items are always processed sequentially.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimit {
    Unlimited,
    FixedDelay(Duration),
}

impl RateLimit {
    pub async fn pause(&self) {
        if let RateLimit::FixedDelay(delay) = self {
            tokio::time::sleep(*delay).await;
        }
    }
}

impl Default for RateLimit {
    fn default() -> Self {
        RateLimit::FixedDelay(DEFAULT_ITEM_DELAY)
    }
}
