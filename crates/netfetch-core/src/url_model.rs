//! URL validation ahead of any network call.
//!
//! Only absolute `http`/`https` URLs with a host are accepted. Anything else is
//! rejected with [`FetchError::MalformedUrl`] before reachability is checked or
//! a connection is opened.

use url::Url;

use crate::error::FetchError;

/// Parses and validates a fetch target.
pub fn parse_fetch_url(raw: &str) -> Result<Url, FetchError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FetchError::MalformedUrl("empty URL".to_string()));
    }
    let url = Url::parse(trimmed).map_err(|e| FetchError::MalformedUrl(format!("{}: {}", e, trimmed)))?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(FetchError::MalformedUrl(format!(
                "unsupported scheme '{}': {}",
                other, trimmed
            )))
        }
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(FetchError::MalformedUrl(format!("missing host: {}", trimmed)));
    }
    Ok(url)
}
