//! Fetching and re-encoding slide images for embedding.
//!
//! Every image is decoded and written back out as PNG, whatever format the
//! source used, so the package only ever carries one media type.

use std::io::Cursor;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use crate::error::ExportError;

/// Where image bytes come from.
pub trait ImageSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ExportError>;
}

/// A decoded image, re-encoded as PNG.
#[derive(Debug, Clone)]
pub struct EmbeddedImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Fetches `http(s)` URLs over the network and decodes `data:` URLs inline.
pub struct HttpImageSource {
    agent: ureq::Agent,
}

impl HttpImageSource {
    pub fn new(timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self { agent }
    }
}

impl Default for HttpImageSource {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl ImageSource for HttpImageSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ExportError> {
        if url.starts_with("data:") {
            return decode_data_url(url);
        }

        let fetch_err = |e: ureq::Error| ExportError::ImageFetch {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let mut response = self.agent.get(url).call().map_err(fetch_err)?;
        let bytes = response.body_mut().read_to_vec().map_err(fetch_err)?;
        debug!(url, bytes = bytes.len(), "fetched image");
        Ok(bytes)
    }
}

/// Decode the payload of a base64 `data:` URL.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, ExportError> {
    let invalid = |reason: &str| ExportError::ImageFetch {
        url: truncate(url),
        reason: reason.to_string(),
    };

    let rest = url.strip_prefix("data:").ok_or_else(|| invalid("not a data URL"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| invalid("missing data URL payload"))?;
    if !meta.ends_with(";base64") {
        return Err(invalid("only base64 data URLs are supported"));
    }

    STANDARD
        .decode(payload.trim())
        .map_err(|e| invalid(&e.to_string()))
}

/// Fetch an image and re-encode it as PNG.
pub fn embed_image(source: &dyn ImageSource, url: &str) -> Result<EmbeddedImage, ExportError> {
    let bytes = source.fetch(url)?;

    let decode_err = |e: image::ImageError| ExportError::ImageDecode {
        url: truncate(url),
        reason: e.to_string(),
    };

    let decoded = image::load_from_memory(&bytes).map_err(decode_err)?;
    let mut png = Vec::new();
    decoded
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(decode_err)?;

    Ok(EmbeddedImage {
        png,
        width: decoded.width(),
        height: decoded.height(),
    })
}

/// Keep `data:` URLs out of logs and error messages at full length.
fn truncate(url: &str) -> String {
    const MAX: usize = 64;
    match url.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}…", &url[..idx]),
        None => url.to_string(),
    }
}
