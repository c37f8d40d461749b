//! Request rate limiting for the deck import client.
//!
//! Limiters are owned by whoever builds the client; there is no global state.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Decides whether a request for `key` may go out now
pub trait RateLimiter: Send + Sync {
    fn allow(&self, key: &str) -> bool;
}

/// Never limits
#[derive(Debug, Default, Clone, Copy)]
pub struct Unlimited;

impl RateLimiter for Unlimited {
    fn allow(&self, _key: &str) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at: Instant,
}

/// Allows `max_requests` per key inside each fixed window.
///
/// A window opens with the first request for a key and resets once it has
/// elapsed.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

impl FixedWindowLimiter {
    pub const DEFAULT_MAX_REQUESTS: u32 = 30;
    pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Same as [`RateLimiter::allow`] with an explicit clock reading
    pub fn allow_at(&self, key: &str, now: Instant) -> bool {
        let mut windows = match self.windows.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let fresh = Window {
            count: 0,
            reset_at: now + self.window,
        };
        let window = windows.entry(key.to_string()).or_insert(fresh);
        if now > window.reset_at {
            *window = fresh;
        }

        window.count += 1;
        let allowed = window.count <= self.max_requests;
        if !allowed {
            log::warn!("Rate limit exceeded for {}", key);
        }
        allowed
    }
}

impl Default for FixedWindowLimiter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_REQUESTS, Self::DEFAULT_WINDOW)
    }
}

impl RateLimiter for FixedWindowLimiter {
    fn allow(&self, key: &str) -> bool {
        self.allow_at(key, Instant::now())
    }
}
