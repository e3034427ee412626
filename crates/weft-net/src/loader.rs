//! Resource Loader
//!
//! Fetches template resources. Every request is a GET; the response is
//! returned whatever its status so callers decide what counts as failure.

use crate::{NetError, Response};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Request configuration
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub url: String,
    pub headers: HashMap<String, String>,
}

impl Request {
    pub fn get(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }
}

/// Load resources from the network or the local filesystem
#[derive(Debug, Clone)]
pub struct ResourceLoader {
    client: reqwest::blocking::Client,
}

impl ResourceLoader {
    pub fn new() -> Result<Self, NetError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("weft/0.1")
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| NetError::Network(e.to_string()))?;

        Ok(Self { client })
    }

    /// Fetch a URL with GET
    pub async fn fetch(&self, url: &str) -> Result<Response, NetError> {
        self.request(Request::get(url)).await
    }

    /// Perform a request
    pub async fn request(&self, req: Request) -> Result<Response, NetError> {
        let url = Url::parse(&req.url).map_err(|_| NetError::InvalidUrl(req.url.clone()))?;
        tracing::info!("GET {}", url);

        match url.scheme() {
            "file" => read_file(&url).await,
            "http" | "https" => {
                let client = self.client.clone();
                smol::unblock(move || send_blocking(&client, req)).await
            }
            other => Err(NetError::InvalidUrl(format!("unsupported scheme {other}: {}", req.url))),
        }
    }
}

fn send_blocking(client: &reqwest::blocking::Client, req: Request) -> Result<Response, NetError> {
    let mut builder = client.get(&req.url);
    for (key, value) in &req.headers {
        builder = builder.header(key.as_str(), value.as_str());
    }

    let response = builder.send().map_err(|e| NetError::Network(e.to_string()))?;
    let status = response.status().as_u16();
    let headers = response.headers()
        .iter()
        .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
        .collect();
    let body = response.bytes()
        .map_err(|e| NetError::Network(e.to_string()))?
        .to_vec();

    Ok(Response { status, headers, body })
}

async fn read_file(url: &Url) -> Result<Response, NetError> {
    let path = url.to_file_path()
        .map_err(|_| NetError::InvalidUrl(url.to_string()))?;

    match smol::fs::read(&path).await {
        Ok(body) => Ok(Response { status: 200, headers: Vec::new(), body }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Ok(Response { status: 404, headers: Vec::new(), body: Vec::new() })
        }
        Err(e) => Err(e.into()),
    }
}

/// Resolve `path` against `base`. Absolute URLs pass through unchanged.
pub fn resolve_url(base: &str, path: &str) -> Result<String, NetError> {
    if let Ok(absolute) = Url::parse(path) {
        return Ok(absolute.into());
    }
    let base = Url::parse(base).map_err(|_| NetError::InvalidUrl(base.to_string()))?;
    base.join(path)
        .map(String::from)
        .map_err(|_| NetError::InvalidUrl(path.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = Request::get("https://example.com/a.html")
            .with_header("Accept", "text/html");

        assert_eq!(req.url, "https://example.com/a.html");
        assert_eq!(req.headers.get("Accept").map(String::as_str), Some("text/html"));
    }

    #[test]
    fn test_resolve_relative() {
        let url = resolve_url("https://example.com/app/", "components/x/x.html").unwrap();
        assert_eq!(url, "https://example.com/app/components/x/x.html");
    }

    #[test]
    fn test_resolve_absolute_passthrough() {
        let url = resolve_url("https://example.com/", "file:///tmp/t.css").unwrap();
        assert_eq!(url, "file:///tmp/t.css");
    }

    #[test]
    fn test_unsupported_scheme() {
        let loader = ResourceLoader::new().unwrap();
        let result = smol::block_on(loader.fetch("ftp://example.com/x"));
        assert!(matches!(result, Err(NetError::InvalidUrl(_))));
    }
}
