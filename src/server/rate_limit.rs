//! Fixed-window per-IP rate limiting.
//!
//! One in-memory map per process: counters reset on restart and are not
//! shared across instances. Basic protection against form spam, not a
//! guarantee. The limiter is a constructed instance handed to the server,
//! so a shared-store implementation can replace it without handler changes.

use std::collections::HashMap;
use std::net::IpAddr;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    /// Over the limit; retry after this many seconds.
    Limited { retry_after_secs: u64 },
}

struct WindowEntry {
    count: u32,
    reset_at: Instant,
}

pub struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    entries: Mutex<HashMap<IpAddr, WindowEntry>>,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Record a request from `ip` and decide whether it is within the window
    /// budget. The window starts at an IP's first request; once it elapses the
    /// entry is dropped and the next request opens a fresh one.
    pub async fn check(&self, ip: IpAddr) -> Decision {
        self.check_at(ip, Instant::now()).await
    }

    async fn check_at(&self, ip: IpAddr, now: Instant) -> Decision {
        let mut entries = self.entries.lock().await;

        // Every check sweeps expired windows, keeping the map bounded by the
        // number of IPs active within one window.
        entries.retain(|_, entry| now < entry.reset_at);

        let entry = entries.entry(ip).or_insert_with(|| WindowEntry {
            count: 0,
            reset_at: now + self.window,
        });

        if entry.count >= self.max_requests {
            let retry_after_secs = entry.reset_at.saturating_duration_since(now).as_secs().max(1);
            return Decision::Limited { retry_after_secs };
        }

        entry.count += 1;
        Decision::Allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(last: u8) -> IpAddr {
        IpAddr::from([203, 0, 113, last])
    }

    #[tokio::test]
    async fn test_sixth_request_in_window_is_limited() {
        let limiter = FixedWindowLimiter::new(5, Duration::from_secs(3600));
        let now = Instant::now();

        for _ in 0..5 {
            assert_eq!(limiter.check_at(ip(1), now).await, Decision::Allowed);
        }

        match limiter.check_at(ip(1), now).await {
            Decision::Limited { retry_after_secs } => assert!(retry_after_secs > 0),
            Decision::Allowed => panic!("sixth request should be limited"),
        }
    }

    #[tokio::test]
    async fn test_ips_are_tracked_independently() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_secs(3600));
        let now = Instant::now();

        assert_eq!(limiter.check_at(ip(1), now).await, Decision::Allowed);
        assert_eq!(limiter.check_at(ip(2), now).await, Decision::Allowed);
        assert!(matches!(
            limiter.check_at(ip(1), now).await,
            Decision::Limited { .. }
        ));
    }

    #[tokio::test]
    async fn test_window_resets_counter() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_secs(3600));
        let start = Instant::now();

        assert_eq!(limiter.check_at(ip(1), start).await, Decision::Allowed);
        assert!(matches!(
            limiter.check_at(ip(1), start).await,
            Decision::Limited { .. }
        ));

        let after_window = start + Duration::from_secs(3601);
        assert_eq!(limiter.check_at(ip(1), after_window).await, Decision::Allowed);
    }

    #[tokio::test]
    async fn test_expired_entries_are_swept_by_later_checks() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_secs(3600));
        let start = Instant::now();

        limiter.check_at(ip(1), start).await;

        // Traffic from an unrelated IP after the window must clear the
        // stale entry, not just this IP's own next request.
        let after_window = start + Duration::from_secs(3601);
        limiter.check_at(ip(2), after_window).await;

        let entries = limiter.entries.lock().await;
        assert!(!entries.contains_key(&ip(1)));
        assert!(entries.contains_key(&ip(2)));
    }
}
