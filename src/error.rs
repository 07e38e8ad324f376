use thiserror::Error;

#[derive(Debug, Error)]
pub enum WhittleError {
    #[error("XML parsing error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Invalid path data: {0}")]
    InvalidPath(String),

    #[error("Invalid transform: {0}")]
    InvalidTransform(String),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
