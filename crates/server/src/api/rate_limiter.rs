//! Per-client token bucket rate limiting for the scraping endpoints.

use std::collections::HashMap;
use std::net::IpAddr;
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

/// Idle buckets are pruned once this many clients are tracked.
const MAX_TRACKED_CLIENTS: usize = 10_000;

/// Token bucket for a single client.
///
/// Tokens refill at a constant rate up to the capacity and each request
/// consumes one. The bucket starts full.
#[derive(Debug)]
pub struct TokenBucket {
    /// Max tokens (= requests per minute).
    capacity: f32,
    tokens: f32,
    /// Tokens added per second.
    refill_rate: f32,
    last_refill: Instant,
}

impl TokenBucket {
    pub fn new(requests_per_minute: u32) -> Self {
        let capacity = requests_per_minute as f32;
        Self {
            capacity,
            tokens: capacity,
            refill_rate: capacity / 60.0,
            last_refill: Instant::now(),
        }
    }

    /// Take one token, or report how long until one is available.
    pub fn try_acquire(&mut self) -> Result<(), Duration> {
        self.refill();

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            Ok(())
        } else {
            let tokens_needed = 1.0 - self.tokens;
            Err(Duration::from_secs_f32(tokens_needed / self.refill_rate))
        }
    }

    fn is_full(&mut self) -> bool {
        self.refill();
        self.tokens >= self.capacity
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f32();
        self.tokens = (self.tokens + elapsed * self.refill_rate).min(self.capacity);
        self.last_refill = now;
    }
}

/// Pool of token buckets, one per client IP, created on first request.
#[derive(Debug)]
pub struct RateLimiterPool {
    requests_per_minute: u32,
    buckets: RwLock<HashMap<IpAddr, TokenBucket>>,
}

impl RateLimiterPool {
    pub fn new(requests_per_minute: u32) -> Self {
        Self {
            requests_per_minute,
            buckets: RwLock::new(HashMap::new()),
        }
    }

    pub fn requests_per_minute(&self) -> u32 {
        self.requests_per_minute
    }

    /// Try to acquire a token for `client`.
    ///
    /// Returns the wait until the next token when the client is limited.
    pub async fn try_acquire(&self, client: IpAddr) -> Result<(), Duration> {
        let mut buckets = self.buckets.write().await;

        if buckets.len() >= MAX_TRACKED_CLIENTS && !buckets.contains_key(&client) {
            buckets.retain(|_, bucket| !bucket.is_full());
        }

        buckets
            .entry(client)
            .or_insert_with(|| TokenBucket::new(self.requests_per_minute))
            .try_acquire()
    }

    /// Number of clients currently tracked.
    pub async fn tracked_clients(&self) -> usize {
        self.buckets.read().await.len()
    }
}
