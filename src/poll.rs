//! Poll-with-deadline primitive.
//!
//! Sensor readings on the rig arrive asynchronously; the acquisition loops
//! need to wait for "the next value" without busy-waiting forever. This
//! module provides a single bounded polling helper returning a
//! present/absent result instead of ad hoc timeout loops.

use crate::error::Result;
use std::time::{Duration, Instant};

/// Repeatedly invoke `poll` until it yields a value or `timeout` elapses.
///
/// Sleeps `interval` between attempts (clamped to the remaining time).
/// Returns `Ok(None)` when the deadline passes without a value; errors
/// from `poll` are propagated immediately so device I/O failures stay
/// distinct from "no data yet".
pub fn poll_deadline<T, F>(timeout: Duration, interval: Duration, mut poll: F) -> Result<Option<T>>
where
    F: FnMut() -> Result<Option<T>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(value) = poll()? {
            return Ok(Some(value));
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(None);
        }
        std::thread::sleep(interval.min(remaining));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_immediate_value() {
        let result =
            poll_deadline(Duration::from_millis(100), Duration::from_millis(1), || {
                Ok(Some(42))
            })
            .unwrap();
        assert_eq!(result, Some(42));
    }

    #[test]
    fn test_value_after_retries() {
        let mut attempts = 0;
        let result =
            poll_deadline(Duration::from_millis(500), Duration::from_millis(1), || {
                attempts += 1;
                if attempts < 4 {
                    Ok(None)
                } else {
                    Ok(Some("ready"))
                }
            })
            .unwrap();
        assert_eq!(result, Some("ready"));
        assert_eq!(attempts, 4);
    }

    #[test]
    fn test_deadline_expires() {
        let result: Option<u8> =
            poll_deadline(Duration::from_millis(10), Duration::from_millis(1), || {
                Ok(None)
            })
            .unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_error_propagates() {
        let result: Result<Option<u8>> =
            poll_deadline(Duration::from_millis(100), Duration::from_millis(1), || {
                Err(Error::Other("bus fault".into()))
            });
        assert!(result.is_err());
    }
}
