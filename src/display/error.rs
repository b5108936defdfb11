use std::io;
use thiserror::Error;

/// Failure of a single display exchange.
///
/// A display that stays silent is not an error; the exchange simply yields
/// an empty response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("could not resolve display endpoint {endpoint}: {source}")]
    Resolve {
        endpoint: String,
        #[source]
        source: io::Error,
    },

    #[error("display endpoint {endpoint} is unavailable: {source}")]
    Unavailable {
        endpoint: String,
        #[source]
        source: io::Error,
    },

    #[error("display exchange with {endpoint} failed: {source}")]
    Io {
        endpoint: String,
        #[source]
        source: io::Error,
    },
}

impl TransportError {
    /// Classify a socket error raised after the session was opened.
    /// A refusal means nothing is listening on the display port.
    pub(crate) fn from_session(endpoint: &str, source: io::Error) -> Self {
        let endpoint = endpoint.to_string();
        match source.kind() {
            io::ErrorKind::ConnectionRefused
            | io::ErrorKind::HostUnreachable
            | io::ErrorKind::NetworkUnreachable => Self::Unavailable { endpoint, source },
            _ => Self::Io { endpoint, source },
        }
    }
}
