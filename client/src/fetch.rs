use serde::de::DeserializeOwned;

use alpha_shared::FetchError;
use alpha_shared::stats::cache_busted;

pub(crate) fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// GET `url` and return the body of a 2xx response.
pub(crate) async fn get_text(url: &str) -> Result<String, FetchError> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    if !resp.ok() {
        return Err(FetchError::Status(resp.status()));
    }

    resp.text()
        .await
        .map_err(|e| FetchError::Decode(e.to_string()))
}

/// Fetch a page-relative JSON resource, bypassing caches.
pub(crate) async fn get_static_json<T: DeserializeOwned>(path: &str) -> Result<T, FetchError> {
    let body = get_text(&cache_busted(path, now_ms())).await?;
    Ok(serde_json::from_str(&body)?)
}
