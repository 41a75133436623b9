//! Fetch attempt error type.

use std::fmt;

/// Error from one fetch-and-store attempt. Kept as an explicit type so the
/// worker's retry loop can classify it; nothing of this escapes the worker
/// boundary except as the detail string of a `Failed` outcome.
#[derive(Debug)]
pub enum FetchError {
    /// Curl reported a transport error (timeout, connection, DNS, etc.).
    Curl(curl::Error),
    /// HTTP response had a status other than 200.
    Http(u32),
    /// Directory creation or file write failed. Not retried.
    Storage(std::io::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Curl(e) => write!(f, "{}", e),
            FetchError::Http(code) => write!(f, "HTTP {}", code),
            FetchError::Storage(e) => write!(f, "storage: {}", e),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Curl(e) => Some(e),
            FetchError::Storage(e) => Some(e),
            FetchError::Http(_) => None,
        }
    }
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        FetchError::Curl(e)
    }
}
