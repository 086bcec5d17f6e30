use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    #[error("template parse error: {0}")]
    TemplateParse(String),

    #[error("image fetch failed for {url}: {reason}")]
    ImageFetch { url: String, reason: String },

    #[error("image decode failed for {url}: {reason}")]
    ImageDecode { url: String, reason: String },

    #[error("PPTX generation failed: {0}")]
    Pptx(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tera::Error> for ExportError {
    fn from(e: tera::Error) -> Self {
        ExportError::TemplateRender(e.to_string())
    }
}

impl From<zip::result::ZipError> for ExportError {
    fn from(e: zip::result::ZipError) -> Self {
        ExportError::Pptx(e.to_string())
    }
}
