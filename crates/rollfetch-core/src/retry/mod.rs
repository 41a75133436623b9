//! Retry policy and fetch error classification.
//!
//! Failures here are dominated by transient server throttling, so the policy
//! is a small fixed ceiling with a fixed (non-exponential) backoff. Any
//! non-200 status or transport error is retryable; storage failures are not.

mod error;
mod policy;

pub use error::FetchError;
pub use policy::{RetryDecision, RetryPolicy};

/// Whether an error is worth another attempt. Disk problems (permission,
/// full filesystem) will not improve on retry; everything network-shaped
/// might.
pub fn is_retryable(error: &FetchError) -> bool {
    !matches!(error, FetchError::Storage(_))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_and_curl_errors_are_retryable() {
        assert!(is_retryable(&FetchError::Http(500)));
        assert!(is_retryable(&FetchError::Http(404)));
    }

    #[test]
    fn storage_errors_are_not_retryable() {
        let e = FetchError::Storage(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(!is_retryable(&e));
    }
}
