use thiserror::Error;

/// Errors that can occur while talking to the Factura.com API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FacturaError {
    /// Network or connection failure before a response was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with an unexpected HTTP status code.
    #[error("unexpected HTTP status {status}: {message}")]
    Http {
        /// HTTP status code returned by the server.
        status: u16,
        /// Message extracted from the response body, or the raw body.
        message: String,
    },

    /// HTTP succeeded but the API envelope signals failure.
    #[error("API error: {0}")]
    Api(String),

    /// Client-side validation rejected the request before any network call.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A success response could not be decoded into the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}
