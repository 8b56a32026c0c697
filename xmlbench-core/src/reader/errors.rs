use thiserror::Error;

/// Failure of one strategy while reading a document.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{0}")]
    QuickXml(#[from] quick_xml::Error),
    #[error("{0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
    #[error("{0}")]
    XmlRs(#[from] xml::reader::Error),
    #[error("{0}")]
    Binding(#[from] quick_xml::DeError),
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("Premature end of file: no document supplied")]
    Absent,
    #[error("internal error: document source is null")]
    NullSource,
    #[error("{0}")]
    Malformed(String),
}

impl ParseError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        ParseError::Malformed(msg.into())
    }
}

/// Failure while rendering a document through the shared stylesheet.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("failed to serialize bound document: {0}")]
    Emit(#[from] xml::writer::Error),
    #[error("serialized document is not UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("stylesheet error: {0}")]
    Stylesheet(String),
}
