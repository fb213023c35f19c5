//! Fixed-delay retry schedule for upstream calls.

use reqwest::StatusCode;
use std::time::Duration;
use tokio_retry::strategy::FixedInterval;

/// Delays between attempts: `retry_amount` entries of `throttle` each.
///
/// An empty schedule means a single attempt.
pub fn fixed_delays(retry_amount: u32, throttle: Duration) -> impl Iterator<Item = Duration> {
    FixedInterval::new(throttle).take(retry_amount as usize)
}

/// Statuses worth another attempt: any server error and 429.
///
/// Other 4xx answers are deterministic and returned to the caller as-is.
pub fn is_retryable_status(status: StatusCode) -> bool {
    status.as_u16() >= 500 || status == StatusCode::TOO_MANY_REQUESTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_length_matches_retry_amount() {
        assert_eq!(fixed_delays(0, Duration::from_millis(100)).count(), 0);

        let delays: Vec<_> = fixed_delays(3, Duration::from_millis(250)).collect();
        assert_eq!(delays, vec![Duration::from_millis(250); 3]);
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_retryable_status(StatusCode::BAD_GATEWAY));
        assert!(is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(!is_retryable_status(StatusCode::OK));
        assert!(!is_retryable_status(StatusCode::NOT_FOUND));
        assert!(!is_retryable_status(StatusCode::UNAUTHORIZED));
    }
}
