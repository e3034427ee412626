//! weft Networking
//!
//! GET-only resource loading for component templates. HTTP(S) goes through
//! a blocking reqwest client moved onto smol's blocking pool; `file://` URLs
//! are read with `smol::fs`.

pub mod loader;

pub use loader::{Request, ResourceLoader, resolve_url};
pub use url::Url;

/// Fetch a URL with a default loader
pub async fn fetch(url: &str) -> Result<Response, NetError> {
    ResourceLoader::new()?.fetch(url).await
}

/// HTTP Response
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// Only 200 counts as success for template loading
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Look up a header (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Network error
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    #[error("HTTP error {status} for {url}")]
    HttpError { status: u16, url: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
