//! Single blocking HTTP GET that buffers the whole body.

use super::FetchError;
use std::time::Duration;

/// GET `url` with a `User-Agent` header, following redirects.
/// Returns the body on a 2xx response.
pub fn get(url: &str, user_agent: &str, timeout: Option<Duration>) -> Result<Vec<u8>, FetchError> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    if let Some(t) = timeout {
        easy.timeout(t)?;
    }

    let mut list = curl::easy::List::new();
    list.append(&format!("User-Agent: {}", user_agent.trim()))?;
    easy.http_headers(list)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }
    Ok(body)
}
