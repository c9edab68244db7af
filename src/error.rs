use std::sync::Arc;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the EVE API bindings.
///
/// None of these are recovered from locally: a malformed response or an API-level error is
/// returned to the caller as is, without partial results.
#[derive(thiserror::Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// The API answered with an `<error>` envelope.
    #[error("EVE API error {code}: {message}")]
    Api {
        /// Numeric error code.
        code: i64,
        /// Human-readable message.
        message: String,
    },

    /// The server answered with a non-success status and no error envelope.
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),

    /// Invalid base URL configuration.
    #[error("invalid base_url configuration")]
    InvalidBaseUrl(#[source] url::ParseError),

    /// Network error.
    #[error(transparent)]
    // reqwest::Error is not clonable, so we're wrapping it in an Arc.
    Network(Arc<reqwest::Error>),

    /// The response body is not well-formed XML.
    #[error("malformed XML response")]
    Xml(#[source] Arc<quick_xml::Error>),

    /// The document ended inside an element.
    #[error("element <{0}> is never closed")]
    UnclosedElement(String),

    /// A required element is absent.
    #[error("missing element <{0}>")]
    MissingElement(String),

    /// A required attribute is absent.
    #[error("missing attribute `{attribute}` on <{element}>")]
    MissingAttribute {
        /// Tag of the element that lacks the attribute.
        element: String,
        /// Name of the missing attribute.
        attribute: String,
    },

    /// A required `<rowset>` is absent.
    #[error("missing rowset `{0}`")]
    MissingRowset(String),

    /// A value that should be numeric is not.
    #[error("invalid number `{value}`")]
    InvalidNumber {
        /// The offending value.
        value: String,
    },

    /// A value that should be a boolean is not.
    #[error("invalid boolean `{value}`")]
    InvalidBoolean {
        /// The offending value.
        value: String,
    },

    /// A value that is not in the `YYYY-MM-DD HH:MM:SS` format.
    #[error("invalid timestamp `{value}`")]
    InvalidTimestamp {
        /// The offending value.
        value: String,
    },

    /// A numeric code that has no entry in the corresponding lookup table.
    #[error("unknown {kind} value {value}")]
    UnknownEnumValue {
        /// Name of the lookup table.
        kind: &'static str,
        /// The code that was not found.
        value: i64,
    },
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::Network(Arc::new(value.without_url()))
    }
}

impl From<quick_xml::Error> for Error {
    fn from(value: quick_xml::Error) -> Self {
        Error::Xml(Arc::new(value))
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(value: quick_xml::events::attributes::AttrError) -> Self {
        Error::from(quick_xml::Error::from(value))
    }
}
