//! Single HTTP GET attempt, buffered in memory.

use crate::config::FetchConfig;
use crate::retry::FetchError;

/// Perform one GET of `url`, returning the full body on HTTP 200.
///
/// Any other status code and any transport error (timeout, connect, DNS)
/// become a `FetchError` for the caller's retry loop. The per-attempt
/// timeout covers the whole transfer. Booth PDFs are small (a few hundred
/// KiB), so buffering the body is fine.
pub fn fetch_once(url: &str, cfg: &FetchConfig) -> Result<Vec<u8>, FetchError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.useragent(&cfg.user_agent)?;
    easy.connect_timeout(cfg.request_timeout())?;
    easy.timeout(cfg.request_timeout())?;

    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if code != 200 {
        return Err(FetchError::Http(code));
    }
    Ok(body)
}
